//! Free-text location standardization.
//!
//! Converts heterogeneous country spellings to a canonical ISO 3166 standard,
//! optionally expanding region names into their member countries and applying
//! per-dataset override tables for known naming quirks.

pub mod overrides;
#[allow(clippy::module_inception)]
pub mod resolver;
pub mod types;

pub use resolver::{title_case, NameResolver};
pub use types::{
    AmbiguousMatch, OutputFormat, SourceDb, Standard, StandardOutput, Standardized,
    StandardizeOptions,
};
