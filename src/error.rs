//! Crate-wide error taxonomy.
//!
//! Every fallible operation returns `Result<_, GeoError>`. Validation errors
//! are raised before any partial mutation of caller data; the only
//! recoverable condition (an ambiguous fuzzy match) is not an error at all
//! but a structured warning on the result, see `resolver::AmbiguousMatch`.

use std::fmt;

/// Errors produced by the standardization, region and augmentation layers.
#[derive(Debug)]
pub enum GeoError {
    /// Unsupported enum value, unknown field/region/standard, or a requested
    /// field colliding with an existing column without `overload`.
    InvalidKey(String),
    /// No authoritative match for a location name, even after fuzzy search.
    Lookup(String),
    /// An external reference source no longer matches the expected shape.
    /// Always fail-closed: partial drift is drift.
    SchemaDrift(String),
    /// Transport-level failure while fetching a reference source.
    Network(String),
    /// A reference source answered with something unparseable.
    InvalidResponse(String),
    /// Local cache I/O failure.
    Io(String),
    /// Catch-all wrapping unexpected lower-level failures, never swallowed.
    Unclassified(String),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey(msg) => write!(f, "Invalid key: {}", msg),
            Self::Lookup(q) => write!(f, "No country matches '{}'", q),
            Self::SchemaDrift(msg) => write!(f, "Reference source schema drift: {}", msg),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid source response: {}", msg),
            Self::Io(msg) => write!(f, "Cache I/O error: {}", msg),
            Self::Unclassified(msg) => write!(f, "Unexpected error: {}", msg),
        }
    }
}

impl std::error::Error for GeoError {}

impl From<std::io::Error> for GeoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for GeoError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}
