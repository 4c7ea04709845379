//! Error kinds for chained errors

use std::fmt;

/// The category of failure attached to a chain link.
///
/// `Other` is the unclassified, pass-through kind and the default for every
/// link. When a chain is built, the merge step moves the kind outward so that
/// at most one link per chain reports a given category.
///
/// `Unknown` is never set by callers in practice. Inspection returns it when
/// the inspected error is not a chain, or when no link was ever classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Unclassified error
    #[default]
    Other,

    /// The requested item does not exist
    NotFound,

    /// Malformed or invalid input
    Invalid,

    /// The item already exists or is in a conflicting state
    Conflict,

    /// The caller is not authenticated
    Unauthorized,

    /// Internal failure
    Internal,

    /// No classification could be determined
    Unknown,
}

impl Kind {
    /// Returns the lowercase phrase used when rendering a chain
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Other => "other error",
            Kind::NotFound => "not found",
            Kind::Invalid => "invalid",
            Kind::Conflict => "conflict",
            Kind::Unauthorized => "unauthorized",
            Kind::Internal => "internal",
            Kind::Unknown => "unknown",
        }
    }

    /// Numeric code for collaborators that translate kinds into their own
    /// status vocabulary. `Unknown` has no stable code of its own.
    pub fn code(&self) -> u8 {
        match self {
            Kind::Other => 0,
            Kind::NotFound => 1,
            Kind::Invalid => 2,
            Kind::Conflict => 3,
            Kind::Unauthorized => 4,
            Kind::Internal => 5,
            Kind::Unknown => u8::MAX,
        }
    }

    /// Decode a numeric code; anything out of range is `Unknown`.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Kind::Other,
            1 => Kind::NotFound,
            2 => Kind::Invalid,
            3 => Kind::Conflict,
            4 => Kind::Unauthorized,
            5 => Kind::Internal,
            _ => Kind::Unknown,
        }
    }

    /// Check if this is the unclassified kind
    pub fn is_other(&self) -> bool {
        matches!(self, Kind::Other)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
