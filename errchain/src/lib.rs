//! # errchain
//!
//! Structured error chains: every link records the operation that failed,
//! what kind of failure it was, how severe it is, and what it wraps.
//!
//! ## Design Philosophy
//!
//! - **Op**: Where it failed (e.g. `store.Put`), one per link
//! - **Kind**: What category of failure, reported once per chain
//! - **Severity**: How urgent, promoted outward as errors are wrapped
//! - **Cause**: Either another link or an opaque external error
//!
//! ## Usage
//!
//! ```rust
//! use errchain::{chain, Kind, Severity};
//!
//! let inner = chain!("db.Get", Kind::NotFound, anyhow::anyhow!("no rows"));
//! let err = chain!("store.Put", Severity::Warn, inner);
//!
//! assert_eq!(errchain::ops(&err), vec!["store.Put", "db.Get"]);
//! assert_eq!(errchain::kind(&err), Kind::NotFound);
//! assert!(errchain::is(Kind::NotFound, &err));
//! assert_eq!(err.to_string(), "store.Put: not found:\n\tdb.Get: no rows");
//! ```
//!
//! Arguments to [`chain!`] may come in any order. Anything that is not an
//! operation, kind, severity or cause is rejected at compile time:
//!
//! ```rust,compile_fail
//! use errchain::chain;
//!
//! let err = chain!("store.Put", 42u32);
//! ```
//!
//! ## Principles
//!
//! - Each wrapping call supplies a new operation and, optionally, a new kind
//! - Wrapping takes the inner chain by value, so later changes to the
//!   original never leak into a chain already built from it
//! - Severity is only for logging, never for control flow

mod error;
mod ext;
mod kind;
mod severity;

pub use error::{Arg, Builder, Cause, Chain, ChainedError, Op, SEPARATOR};
pub use ext::ResultExt;
pub use kind::Kind;
pub use severity::Severity;

use std::error::Error as StdError;

/// Result type alias using ChainedError
pub type Result<T> = std::result::Result<T, ChainedError>;

/// Build a [`ChainedError`] from any mix of operation, [`Kind`],
/// [`Severity`] and cause arguments.
///
/// Strings are operations. A cause is a `ChainedError`, an
/// `anyhow::Error` or a [`Cause`]. Each category is optional; if one is
/// given twice the last value wins.
#[macro_export]
macro_rules! chain {
    ($($arg:expr),* $(,)?) => {{
        let builder = $crate::ChainedError::builder();
        $( let builder = $crate::Arg::apply($arg, builder); )*
        builder.build()
    }};
}

/// Operations of every link, outermost first.
pub fn ops(err: &ChainedError) -> Vec<&str> {
    err.ops()
}

/// The chain's classified kind.
///
/// Returns `Kind::Unknown` when `err` is not a chain or no link was ever
/// classified.
pub fn kind(err: &(dyn StdError + 'static)) -> Kind {
    err.downcast_ref::<ChainedError>()
        .map_or(Kind::Unknown, ChainedError::dominant_kind)
}

/// Check whether some link of `err` carries `kind`.
///
/// Always false when `err` is not a chain.
pub fn is(kind: Kind, err: &(dyn StdError + 'static)) -> bool {
    err.downcast_ref::<ChainedError>()
        .is_some_and(|chained| chained.is(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_functions_on_chain() {
        let err = chain!("B", chain!("A", Kind::Internal));
        assert_eq!(ops(&err), vec!["B", "A"]);
        assert_eq!(kind(&err), Kind::Internal);
        assert!(is(Kind::Internal, &err));
        assert!(!is(Kind::Conflict, &err));
    }

    #[test]
    fn test_free_functions_on_opaque() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "exists");
        assert_eq!(kind(&io_err), Kind::Unknown);
        assert!(!is(Kind::Conflict, &io_err));
    }

    #[test]
    fn test_is_conflict_after_merge() {
        let err = chain!("outer", chain!("inner", Kind::Conflict));
        assert!(is(Kind::Conflict, &err));

        let err = chain!("outer", Kind::Conflict, chain!("inner", Kind::Conflict));
        assert!(is(Kind::Conflict, &err));
        assert_eq!(kind(&err), Kind::Conflict);
    }

    #[test]
    fn test_through_anyhow() {
        let err: anyhow::Error = chain!("svc.Call", Kind::Unauthorized).into();
        assert_eq!(kind(&*err), Kind::Unauthorized);
        assert!(is(Kind::Unauthorized, &*err));
    }
}
