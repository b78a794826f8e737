//! The region catalog.
//!
//! Built once from two reference fetches (UN M49 numeric codes, UN geoscheme
//! country memberships) joined into a flattened (iso3, capital, code,
//! region name) relation, plus the static bloc literals which always take
//! precedence over scraped content.

use super::blocs;
use super::wiki::{self, GeoSchemeRow};
use crate::error::GeoError;
use crate::fetch::SourceCache;
use crate::resolver::title_case;
use std::collections::BTreeSet;

/// Revision-pinned M49 reference (the live page reshuffled its tables).
pub const M49_URL: &str = "https://en.wikipedia.org/w/index.php?title=UN_M49&oldid=986603718";
pub const GEOSCHEME_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_countries_by_United_Nations_geoscheme";

/// One row of the flattened dynamic relation.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRow {
    pub iso3: String,
    pub capital: String,
    pub code: u32,
    pub region_name: String,
}

/// Region membership queries over static blocs and the dynamic relation.
pub struct RegionCatalog {
    rows: Vec<RegionRow>,
    dynamic_names: Vec<String>,
}

impl RegionCatalog {
    /// Build the catalog, fetching both reference documents through the
    /// source cache (network only on a cold or stale cache).
    pub fn load(cache: &mut SourceCache) -> Result<Self, GeoError> {
        let m49_html = cache.get_or_fetch(M49_URL)?;
        let geo_html = cache.get_or_fetch(GEOSCHEME_URL)?;
        let m49 = wiki::parse_m49(&m49_html)?;
        let geo = wiki::parse_geoscheme(&geo_html)?;
        Ok(Self::from_parts(m49, geo))
    }

    /// Build the catalog from already-parsed source tables (for testing).
    pub fn from_parts(m49: Vec<(u32, String)>, geo: Vec<GeoSchemeRow>) -> Self {
        let mut dynamic_names = Vec::new();
        for (_, name) in &m49 {
            if !dynamic_names.contains(name) {
                dynamic_names.push(name.clone());
            }
        }

        let mut rows = Vec::new();
        for entry in geo {
            for code in &entry.codes {
                let region_name = m49
                    .iter()
                    .find(|(c, _)| c == code)
                    .map(|(_, n)| n.clone())
                    .unwrap_or_default();
                rows.push(RegionRow {
                    iso3: entry.iso3.clone(),
                    capital: entry.capital.clone(),
                    code: *code,
                    region_name,
                });
            }
        }

        Self { rows, dynamic_names }
    }

    /// All known region display names: static blocs first, then dynamic.
    pub fn region_names(&self) -> Vec<String> {
        let mut names: Vec<String> = blocs::BLOCS.iter().map(|b| b.name.to_string()).collect();
        for name in &self.dynamic_names {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    /// Whether `name` (title-cased) is a known region display name.
    pub fn is_region(&self, name: &str) -> bool {
        let name = title_case(name);
        blocs::find(&name).is_some() || self.dynamic_names.contains(&name)
    }

    /// The member iso3 codes of a region: the pinned literal for a static
    /// bloc, otherwise the sorted deduplicated dynamic members. Unknown
    /// names fail with `InvalidKey`.
    pub fn countries_for(&self, name: &str) -> Result<Vec<String>, GeoError> {
        let name = title_case(name);

        if let Some(bloc) = blocs::find(&name) {
            let mut members: Vec<String> = bloc.members.iter().map(|m| m.to_string()).collect();
            members.sort();
            return Ok(members);
        }

        if !self.dynamic_names.contains(&name) {
            return Err(GeoError::InvalidKey(format!("unknown region '{}'", name)));
        }

        let members: BTreeSet<String> = self
            .rows
            .iter()
            .filter(|r| r.region_name == name)
            .map(|r| r.iso3.clone())
            .collect();
        Ok(members.into_iter().collect())
    }

    /// The flattened relation, for the augmenter's region-list and capital
    /// fields.
    pub fn rows(&self) -> &[RegionRow] {
        &self.rows
    }

    /// Provenance of the external region sources.
    pub fn sources() -> &'static [(&'static str, &'static str)] {
        &[("UN M49", M49_URL), ("UN geoscheme", GEOSCHEME_URL)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::wiki::tests::{GEOSCHEME_FIXTURE, M49_FIXTURE};

    fn fixture_catalog() -> RegionCatalog {
        let m49 = wiki::parse_m49(M49_FIXTURE).unwrap();
        let geo = wiki::parse_geoscheme(GEOSCHEME_FIXTURE).unwrap();
        RegionCatalog::from_parts(m49, geo)
    }

    #[test]
    fn test_dynamic_membership() {
        let catalog = fixture_catalog();
        assert_eq!(catalog.countries_for("Europe").unwrap(), vec!["FRA", "ITA"]);
        assert_eq!(catalog.countries_for("Southern Europe").unwrap(), vec!["ITA"]);
    }

    #[test]
    fn test_membership_sorted_dedup() {
        let m49 = vec![(150, "Europe".to_string())];
        let geo = vec![
            GeoSchemeRow {
                country: "Italy".into(),
                capital: "Rome".into(),
                iso3: "ITA".into(),
                codes: vec![150, 150],
            },
            GeoSchemeRow {
                country: "France".into(),
                capital: "Paris".into(),
                iso3: "FRA".into(),
                codes: vec![150],
            },
        ];
        let catalog = RegionCatalog::from_parts(m49, geo);
        assert_eq!(catalog.countries_for("Europe").unwrap(), vec!["FRA", "ITA"]);
    }

    #[test]
    fn test_static_bloc_precedence_over_dynamic() {
        // A dynamic row claiming bloc membership must not leak through.
        let m49 = vec![(999, "European Union".to_string())];
        let geo = vec![GeoSchemeRow {
            country: "Narnia".into(),
            capital: "Cair Paravel".into(),
            iso3: "NRN".into(),
            codes: vec![999],
        }];
        let catalog = RegionCatalog::from_parts(m49, geo);
        let members = catalog.countries_for("European Union").unwrap();
        assert_eq!(members.len(), 27);
        assert!(!members.contains(&"NRN".to_string()));
    }

    #[test]
    fn test_eu_members_exactly_27() {
        let catalog = fixture_catalog();
        let members = catalog.countries_for("european union").unwrap();
        assert_eq!(members.len(), 27);
        let dedup: BTreeSet<_> = members.iter().collect();
        assert_eq!(dedup.len(), 27);
        assert!(members.contains(&"FRA".to_string()));
        assert!(!members.contains(&"GBR".to_string()));
    }

    #[test]
    fn test_unknown_region_invalid_key() {
        let catalog = fixture_catalog();
        assert!(matches!(
            catalog.countries_for("Middle Earth"),
            Err(GeoError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_region_names_union() {
        let catalog = fixture_catalog();
        let names = catalog.region_names();
        assert!(names.contains(&"G7".to_string()));
        assert!(names.contains(&"Europe".to_string()));
        assert!(names.contains(&"Africa".to_string()));
    }

    #[test]
    fn test_is_region_title_cases() {
        let catalog = fixture_catalog();
        assert!(catalog.is_region("g7"));
        assert!(catalog.is_region("EUROPE"));
        assert!(!catalog.is_region("France"));
    }

    #[test]
    fn test_rows_expose_capitals() {
        let catalog = fixture_catalog();
        assert!(catalog
            .rows()
            .iter()
            .any(|r| r.iso3 == "FRA" && r.capital == "Paris"));
    }
}
