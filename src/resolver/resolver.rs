//! The name resolver — free text in, canonical codes out.
//!
//! Flow: title-case → per-dataset override → region expansion (opt-in, via
//! an explicit work queue) → exact catalogue lookup → fuzzy fallback with
//! deterministic first-ranked pick → projection to the active standard.

use super::overrides;
use super::types::{
    AmbiguousMatch, OutputFormat, Standard, StandardOutput, Standardized, StandardizeOptions,
};
use crate::catalogue;
use crate::error::GeoError;
use crate::fetch::SourceCache;
use crate::region::RegionCatalog;
use crate::table::DataTable;
use serde_json::Value;
use std::collections::VecDeque;

/// Title-case a name: first letter of each word upper, the rest lower.
/// A "word" starts after any non-alphabetic character, so "south korea"
/// becomes "South Korea" and "cote d'ivoire" becomes "Cote D'Ivoire".
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Converts free-text location names to a canonical standard.
///
/// Holds the active [`Standard`] and, once region interpretation has been
/// requested, the [`RegionCatalog`]. Construction is cheap; the catalog is
/// built lazily on first region use (two reference fetches through the
/// on-disk source cache).
pub struct NameResolver {
    standard: Standard,
    catalog: Option<RegionCatalog>,
}

impl NameResolver {
    pub fn new(standard: Standard) -> Self {
        Self {
            standard,
            catalog: None,
        }
    }

    /// Create a resolver with a prebuilt region catalog (for testing, or to
    /// share one catalog between consumers).
    pub fn with_catalog(standard: Standard, catalog: RegionCatalog) -> Self {
        Self {
            standard,
            catalog: Some(catalog),
        }
    }

    pub fn standard(&self) -> Standard {
        self.standard
    }

    pub fn set_standard(&mut self, standard: Standard) {
        self.standard = standard;
    }

    /// The region catalog, built on first use.
    pub fn region_catalog(&mut self) -> Result<&RegionCatalog, GeoError> {
        if self.catalog.is_none() {
            let mut cache = SourceCache::load();
            self.catalog = Some(RegionCatalog::load(&mut cache)?);
        }
        // Freshly set above when absent.
        self.catalog
            .as_ref()
            .ok_or_else(|| GeoError::Unclassified("region catalog unavailable".into()))
    }

    /// Standardize a single name under the active standard.
    pub fn to_standard_one(&mut self, location: &str) -> Result<String, GeoError> {
        let result = self.to_standard(&[location], &StandardizeOptions::default())?;
        match result.output {
            StandardOutput::List(mut v) if !v.is_empty() => Ok(v.remove(0)),
            _ => Err(GeoError::Unclassified("empty standardization result".into())),
        }
    }

    /// Standardize a list of free-text location names.
    ///
    /// With `interpret_region` set, an input exactly matching a region
    /// display name is replaced in place by that region's member iso3 codes;
    /// the relative order of expanded members and of pending inputs is
    /// preserved. Members are not re-examined as regions, so a region
    /// containing another region is not expanded further.
    ///
    /// The `List` output follows processing order and may be longer than the
    /// input; `Mapping` and `Table` keep the 1:1 input correspondence and are
    /// therefore unavailable with region interpretation.
    pub fn to_standard<S: AsRef<str>>(
        &mut self,
        locations: &[S],
        opts: &StandardizeOptions,
    ) -> Result<Standardized, GeoError> {
        if opts.interpret_region && opts.output != OutputFormat::List {
            return Err(GeoError::InvalidKey(
                "region interpretation is incompatible with non-list output".into(),
            ));
        }

        let titled: Vec<String> = locations
            .iter()
            .map(|l| title_case(l.as_ref()))
            .collect();
        // Mapping/table keys are the title-cased originals, before overrides.
        let originals = titled.clone();

        let inputs: Vec<String> = match opts.db {
            Some(db) => titled.iter().map(|n| overrides::apply(db, n)).collect(),
            None => titled,
        };

        let mut warnings: Vec<AmbiguousMatch> = Vec::new();
        let mut values: Vec<String> = Vec::new();
        let mut queue: VecDeque<String> = inputs.into();

        while let Some(item) = queue.pop_front() {
            if opts.interpret_region {
                if let Some(members) = self.expand_region(&item)? {
                    for m in members.into_iter().rev() {
                        queue.push_front(m);
                    }
                    continue;
                }
            }
            values.push(self.resolve_one(&item, &mut warnings)?);
        }

        let output = match opts.output {
            OutputFormat::List => StandardOutput::List(values),
            OutputFormat::Mapping => {
                let mut pairs: Vec<(String, String)> = Vec::new();
                for (key, value) in originals.into_iter().zip(values) {
                    match pairs.iter_mut().find(|(k, _)| *k == key) {
                        Some(pair) => pair.1 = value,
                        None => pairs.push((key, value)),
                    }
                }
                StandardOutput::Mapping(pairs)
            }
            OutputFormat::Table => {
                let mut table = DataTable::new(&["input", self.standard.key()]);
                for (key, value) in originals.into_iter().zip(values) {
                    table.push_row(vec![Value::String(key), Value::String(value)])?;
                }
                StandardOutput::Table(table)
            }
        };

        Ok(Standardized { output, warnings })
    }

    /// Member list when `name` is a known region display name.
    fn expand_region(&mut self, name: &str) -> Result<Option<Vec<String>>, GeoError> {
        let catalog = self.region_catalog()?;
        if catalog.is_region(name) {
            Ok(Some(catalog.countries_for(name)?))
        } else {
            Ok(None)
        }
    }

    fn resolve_one(
        &self,
        name: &str,
        warnings: &mut Vec<AmbiguousMatch>,
    ) -> Result<String, GeoError> {
        if name.is_empty() {
            return Ok(String::new());
        }

        let record = match catalogue::lookup(name) {
            Some(r) => r,
            None => {
                let candidates = catalogue::search_fuzzy(name);
                match candidates.len() {
                    0 => return Err(GeoError::Lookup(name.to_string())),
                    1 => candidates[0],
                    _ => {
                        let warning = AmbiguousMatch {
                            query: name.to_string(),
                            candidates: candidates.iter().map(|r| r.name.to_string()).collect(),
                            chosen: candidates[0].name.to_string(),
                        };
                        tracing::warn!(%warning, "ambiguous country name");
                        warnings.push(warning);
                        candidates[0]
                    }
                }
            }
        };

        Ok(match self.standard {
            Standard::Iso2 => record.iso2.to_string(),
            Standard::Iso3 => record.iso3.to_string(),
            Standard::Name => record.name.to_string(),
            Standard::Numeric => record.numeric.to_string(),
        })
    }
}
