//! The chained error type

use crate::{Kind, Severity};
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

/// Separator written between a link and its nested chained cause.
pub const SEPARATOR: &str = ":\n\t";

/// The logical operation that failed, e.g. `"store.Put"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Op(Cow<'static, str>);

impl Op {
    /// Create an operation label
    pub fn new(op: impl Into<Cow<'static, str>>) -> Self {
        Self(op.into())
    }

    /// Get the label as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the label is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&'static str> for Op {
    fn from(op: &'static str) -> Self {
        Self::new(op)
    }
}

impl From<String> for Op {
    fn from(op: String) -> Self {
        Self::new(op)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a link wraps.
///
/// A chained cause is owned by the link that wraps it. An opaque cause is
/// any error not built by this crate; it is shared as-is and treated as a
/// leaf with no further structure.
#[derive(Debug, Clone, Default)]
pub enum Cause {
    #[default]
    None,
    Chained(Box<ChainedError>),
    Opaque(Arc<anyhow::Error>),
}

impl Cause {
    /// Wrap an external error as a cause
    pub fn opaque<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from(anyhow::Error::new(err))
    }

    /// Check if there is no cause
    pub fn is_none(&self) -> bool {
        matches!(self, Cause::None)
    }

    /// The nested link, if the cause is one of ours
    pub fn as_chained(&self) -> Option<&ChainedError> {
        match self {
            Cause::Chained(prev) => Some(&**prev),
            _ => None,
        }
    }
}

impl From<ChainedError> for Cause {
    fn from(err: ChainedError) -> Self {
        Cause::Chained(Box::new(err))
    }
}

impl From<anyhow::Error> for Cause {
    /// A chain that travelled through `anyhow` is recovered as a chain.
    ///
    /// Only the outermost error counts: a chain under an anyhow context
    /// layer stays opaque so the context is kept.
    fn from(err: anyhow::Error) -> Self {
        if !(*err).is::<ChainedError>() {
            return Cause::Opaque(Arc::new(err));
        }
        match err.downcast::<ChainedError>() {
            Ok(chained) => chained.into(),
            Err(err) => Cause::Opaque(Arc::new(err)),
        }
    }
}

impl From<std::io::Error> for Cause {
    fn from(err: std::io::Error) -> Self {
        Cause::opaque(err)
    }
}

/// One link of an error chain.
///
/// Each link records the operation that failed, a [`Kind`], a [`Severity`]
/// and the [`Cause`] it wraps. Links are built once through [`Builder`] (or
/// the [`chain!`](crate::chain) macro) and never change afterwards.
///
/// Building a link over a chained cause merges the two:
/// - the kind is reported once, on the outermost link that carries it
/// - severity only ever goes up as errors are wrapped outward
///
/// # Example
///
/// ```rust
/// use errchain::{ChainedError, Kind, Severity};
///
/// let inner = ChainedError::builder()
///     .op("db.Get")
///     .kind(Kind::NotFound)
///     .severity(Severity::Warn)
///     .build();
///
/// let err = ChainedError::builder()
///     .op("store.Put")
///     .cause(inner)
///     .build();
///
/// assert_eq!(err.ops(), vec!["store.Put", "db.Get"]);
/// assert_eq!(err.dominant_kind(), Kind::NotFound);
/// assert_eq!(err.severity(), Severity::Warn);
/// assert_eq!(err.to_string(), "store.Put: not found:\n\tdb.Get");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChainedError {
    op: Op,
    kind: Kind,
    cause: Cause,
    severity: Severity,
}

impl ChainedError {
    /// Start building a new link
    pub fn builder() -> Builder {
        Builder::default()
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the operation that failed
    pub fn op(&self) -> &str {
        self.op.as_str()
    }

    /// Get the kind displayed on this link (after merging)
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Get the severity
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the wrapped cause
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// A zero link carries no information at all.
    pub fn is_zero(&self) -> bool {
        self.op.is_empty() && self.kind.is_other() && self.cause.is_none()
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Iterate over the links, outermost first.
    ///
    /// The walk ends at the first link whose cause is absent or opaque.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Operations from the outermost link to the innermost chained one.
    pub fn ops(&self) -> Vec<&str> {
        self.chain().map(ChainedError::op).collect()
    }

    /// The first classified kind in the chain, or `Unknown` if there is none.
    pub fn dominant_kind(&self) -> Kind {
        self.chain()
            .map(ChainedError::kind)
            .find(|kind| !kind.is_other())
            .unwrap_or(Kind::Unknown)
    }

    /// Check whether any link in the chain carries `kind`
    pub fn is(&self, kind: Kind) -> bool {
        self.chain().any(|link| link.kind == kind)
    }

    /// Emit this chain as a single `tracing` event at its severity.
    pub fn log(&self) {
        let kind = self.dominant_kind();
        match self.severity {
            Severity::Info => {
                tracing::info!(op = %self.op, %kind, severity = %self.severity, "{}", self)
            }
            Severity::Warn => {
                tracing::warn!(op = %self.op, %kind, severity = %self.severity, "{}", self)
            }
            Severity::Error | Severity::Panic | Severity::Fatal => {
                tracing::error!(op = %self.op, %kind, severity = %self.severity, "{}", self)
            }
        }
    }

    /// Append this link to `buf`. Separators only follow content written
    /// by this link, never content already in `buf`.
    fn render(&self, buf: &mut String) {
        let start = buf.len();
        if !self.op.is_empty() {
            buf.push_str(self.op.as_str());
        }
        if !self.kind.is_other() {
            pad(buf, start, ": ");
            buf.push_str(self.kind.as_str());
        }
        match &self.cause {
            Cause::Chained(prev) if !prev.is_zero() => {
                let mark = buf.len();
                pad(buf, start, SEPARATOR);
                let nested = buf.len();
                prev.render(buf);
                // a link with nothing to say takes its separator with it
                if buf.len() == nested {
                    buf.truncate(mark);
                }
            }
            Cause::Opaque(err) => {
                pad(buf, start, ": ");
                let _ = write!(buf, "{:#}", err);
            }
            Cause::Chained(_) | Cause::None => {}
        }
    }
}

fn pad(buf: &mut String, start: usize, separator: &str) {
    if buf.len() > start {
        buf.push_str(separator);
    }
}

/// Iterator over the links of a chain, see [`ChainedError::chain`].
pub struct Chain<'a> {
    next: Option<&'a ChainedError>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a ChainedError;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause.as_chained();
        Some(current)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`ChainedError`].
///
/// Every field is optional. A field set twice keeps the last value.
#[derive(Debug, Default)]
pub struct Builder {
    op: Op,
    kind: Kind,
    severity: Severity,
    cause: Cause,
}

impl Builder {
    /// Set the operation that failed
    pub fn op(mut self, op: impl Into<Op>) -> Self {
        self.op = op.into();
        self
    }

    /// Set the kind of failure
    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the severity
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Set the wrapped error.
    ///
    /// Passing a `ChainedError` moves it into the new link, so a caller that
    /// wants to keep using the original passes a clone.
    pub fn cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = cause.into();
        self
    }

    /// Finish the link, merging kind and severity with a chained cause.
    pub fn build(self) -> ChainedError {
        let mut err = ChainedError {
            op: self.op,
            kind: self.kind,
            cause: self.cause,
            severity: self.severity,
        };

        if let Cause::Chained(prev) = &mut err.cause {
            if !prev.kind.is_other() && prev.kind == err.kind {
                err.kind = Kind::Other;
            } else if err.kind.is_other() {
                err.kind = prev.kind;
                prev.kind = Kind::Other;
            }
            err.severity = err.severity.max(prev.severity);
        }

        err
    }
}

// =============================================================================
// Display - the rendered chain, one link per line
// =============================================================================

impl fmt::Display for ChainedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = String::new();
        self.render(&mut buf);
        if buf.is_empty() {
            return f.write_str("no error");
        }
        f.write_str(&buf)
    }
}

impl StdError for ChainedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.cause {
            Cause::Chained(prev) => {
                let prev: &(dyn StdError + 'static) = &**prev;
                Some(prev)
            }
            Cause::Opaque(err) => {
                let err: &(dyn StdError + 'static) = &***err;
                Some(err)
            }
            Cause::None => None,
        }
    }
}

impl From<std::io::Error> for ChainedError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => Kind::NotFound,
            std::io::ErrorKind::PermissionDenied => Kind::Unauthorized,
            std::io::ErrorKind::AlreadyExists => Kind::Conflict,
            std::io::ErrorKind::InvalidInput | std::io::ErrorKind::InvalidData => Kind::Invalid,
            _ => Kind::Internal,
        };
        ChainedError::builder().op("io").kind(kind).cause(err).build()
    }
}

// =============================================================================
// Argument dispatch for the `chain!` macro
// =============================================================================

mod sealed {
    pub trait Sealed {}
}

/// A value `chain!` knows where to put.
///
/// Only the four argument categories implement this trait, so passing
/// anything else to `chain!` fails to compile.
pub trait Arg: sealed::Sealed {
    fn apply(self, builder: Builder) -> Builder;
}

macro_rules! impl_arg {
    ($($ty:ty => $setter:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Arg for $ty {
                fn apply(self, builder: Builder) -> Builder {
                    builder.$setter(self)
                }
            }
        )*
    };
}

impl_arg! {
    Op => op,
    &'static str => op,
    String => op,
    Kind => kind,
    Severity => severity,
    ChainedError => cause,
    Cause => cause,
    anyhow::Error => cause,
}
