//! Severity levels carried along a chain

use std::fmt;

/// How urgent an error is, in increasing order.
///
/// Severity never drives control flow. Wrapping promotes it to the maximum
/// of the wrapper and the cause, so the outermost link always carries the
/// highest severity seen in the chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    #[default]
    Info,
    Warn,
    Error,
    Panic,
    Fatal,
}

impl Severity {
    /// Returns the severity as a lowercase static string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Panic => "panic",
            Severity::Fatal => "fatal",
        }
    }

    /// The `tracing` level an error of this severity is logged at.
    ///
    /// `tracing` has nothing above ERROR, so panic and fatal collapse into it.
    /// [`ChainedError::log`](crate::ChainedError::log) follows the same
    /// mapping; this is for collaborators that need the level as a value,
    /// e.g. to compare it against a `LevelFilter`.
    pub fn level(&self) -> tracing::Level {
        match self {
            Severity::Info => tracing::Level::INFO,
            Severity::Warn => tracing::Level::WARN,
            Severity::Error | Severity::Panic | Severity::Fatal => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
