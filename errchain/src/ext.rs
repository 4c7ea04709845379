//! Extension trait for wrapping `Result` errors into chains

use crate::{Cause, ChainedError, Kind, Op, Result};

/// Wrap the error side of a `Result` in a new chain link.
///
/// ```rust
/// use errchain::{Kind, ResultExt};
///
/// fn load() -> errchain::Result<String> {
///     std::fs::read_to_string("/definitely/missing.toml").op("config.Load")
/// }
///
/// let err = load().unwrap_err();
/// assert_eq!(err.op(), "config.Load");
/// assert_eq!(err.dominant_kind(), Kind::Unknown);
/// ```
pub trait ResultExt<T> {
    /// Wrap the error with the operation that failed
    fn op(self, op: impl Into<Op>) -> Result<T>;

    /// Wrap the error with the operation that failed and classify it
    fn op_kind(self, op: impl Into<Op>, kind: Kind) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Cause>,
{
    fn op(self, op: impl Into<Op>) -> Result<T> {
        self.map_err(|err| ChainedError::builder().op(op).cause(err).build())
    }

    fn op_kind(self, op: impl Into<Op>, kind: Kind) -> Result<T> {
        self.map_err(|err| ChainedError::builder().op(op).kind(kind).cause(err).build())
    }
}
