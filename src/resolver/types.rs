//! Core types for the standardization subsystem.

use crate::error::GeoError;
use crate::table::DataTable;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Supported country-naming standards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Standard {
    Iso2,
    Iso3,
    Name,
    Numeric,
}

impl Standard {
    /// The column/key name used in mapping and table outputs.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Iso2 => "iso2",
            Self::Iso3 => "iso3",
            Self::Name => "name",
            Self::Numeric => "numeric",
        }
    }

    pub fn all() -> &'static [Standard] {
        &[Self::Iso2, Self::Iso3, Self::Name, Self::Numeric]
    }
}

impl Default for Standard {
    fn default() -> Self {
        Self::Iso2
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Standard {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iso2" => Ok(Self::Iso2),
            "iso3" => Ok(Self::Iso3),
            "name" => Ok(Self::Name),
            "numeric" | "num" => Ok(Self::Numeric),
            other => Err(GeoError::InvalidKey(format!(
                "unsupported standard '{}' (expected iso2, iso3, name or numeric)",
                other
            ))),
        }
    }
}

/// Output shaping for [`NameResolver::to_standard`].
///
/// [`NameResolver::to_standard`]: super::NameResolver::to_standard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Standardized values in processing order (post-expansion).
    List,
    /// Original input → standardized value. Incompatible with region
    /// interpretation, which breaks the 1:1 correspondence.
    Mapping,
    /// Two-column table of (input, standardized value).
    Table,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::List
    }
}

impl FromStr for OutputFormat {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "list" => Ok(Self::List),
            "mapping" | "dict" => Ok(Self::Mapping),
            "table" => Ok(Self::Table),
            other => Err(GeoError::InvalidKey(format!(
                "unsupported output format '{}' (expected list, mapping or table)",
                other
            ))),
        }
    }
}

/// Source datasets with hand-curated naming override tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceDb {
    Jhu,
    Worldometers,
    Owid,
}

impl fmt::Display for SourceDb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jhu => write!(f, "jhu"),
            Self::Worldometers => write!(f, "worldometers"),
            Self::Owid => write!(f, "owid"),
        }
    }
}

impl FromStr for SourceDb {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jhu" => Ok(Self::Jhu),
            "worldometers" => Ok(Self::Worldometers),
            "owid" => Ok(Self::Owid),
            other => Err(GeoError::InvalidKey(format!(
                "unknown source database '{}' (expected jhu, worldometers or owid)",
                other
            ))),
        }
    }
}

/// Options for a standardization call.
#[derive(Debug, Clone, Default)]
pub struct StandardizeOptions {
    pub output: OutputFormat,
    /// Apply this dataset's override table before catalogue lookup.
    pub db: Option<SourceDb>,
    /// Expand region display names into their member iso3 codes.
    /// Requires `output == OutputFormat::List`.
    pub interpret_region: bool,
}

/// A non-fatal ambiguity: several catalogue entries matched a fuzzy search.
/// The first-ranked candidate was chosen deterministically.
#[derive(Debug, Clone, Serialize)]
pub struct AmbiguousMatch {
    pub query: String,
    pub candidates: Vec<String>,
    pub chosen: String,
}

impl fmt::Display for AmbiguousMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "more than one country matches '{}': {}; using '{}'",
            self.query,
            self.candidates.join(", "),
            self.chosen
        )
    }
}

/// Shaped standardization output.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StandardOutput {
    List(Vec<String>),
    /// Ordered pairs; a duplicated input key keeps its first position with
    /// the last value, matching dict semantics.
    Mapping(Vec<(String, String)>),
    Table(DataTable),
}

impl StandardOutput {
    /// The list payload, when shaped as a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }
}

/// Result of a standardization call: the shaped output plus any structured
/// ambiguity warnings collected along the way.
#[derive(Debug, Clone, Serialize)]
pub struct Standardized {
    pub output: StandardOutput,
    pub warnings: Vec<AmbiguousMatch>,
}
