//! Field augmentation over location-keyed tables.
//!
//! The [`ReferenceStore`] materializes each reference document at most once
//! per store lifetime (fetching through the source cache on first use); the
//! [`FieldAugmenter`] joins the requested fields onto the caller's table,
//! one value per input row.

use super::fields::Field;
use super::sources;
use crate::catalogue;
use crate::error::GeoError;
use crate::fetch::SourceCache;
use crate::resolver::{NameResolver, SourceDb, Standard, StandardOutput, StandardizeOptions};
use crate::table::DataTable;
use serde_json::Value;
use std::collections::HashMap;

/// Lazily-built reference data for the augmenter.
///
/// Each source is parsed once and kept in memory; repeated `add_fields`
/// calls against the same store never re-read or re-fetch a document.
pub struct ReferenceStore {
    cache: SourceCache,
    demographics: Option<DataTable>,
    geometry: Option<HashMap<String, Value>>,
    flags: Option<HashMap<String, String>>,
}

impl ReferenceStore {
    pub fn new() -> Self {
        Self::with_cache(SourceCache::load())
    }

    pub fn with_cache(cache: SourceCache) -> Self {
        Self {
            cache,
            demographics: None,
            geometry: None,
            flags: None,
        }
    }

    /// Inject an already-built demographic table (must carry an `iso3`
    /// column). For testing.
    pub fn preload_demographics(&mut self, table: DataTable) {
        self.demographics = Some(table);
    }

    pub fn preload_geometry(&mut self, geometry: HashMap<String, Value>) {
        self.geometry = Some(geometry);
    }

    pub fn preload_flags(&mut self, flags: HashMap<String, String>) {
        self.flags = Some(flags);
    }

    /// The demographic table, keyed by an added `iso3` column. Source
    /// country names go through the resolver with the worldometers override
    /// table; names the catalogue cannot place keep an empty code and simply
    /// never match an input row.
    fn demographics(&mut self, resolver: &mut NameResolver) -> Result<&DataTable, GeoError> {
        if self.demographics.is_none() {
            let html = self.cache.get_or_fetch(sources::DEMOGRAPHICS_URL)?;
            let mut table = sources::parse_demographics(&html)?;

            let names = table.column_as_strings("country")?;
            let opts = StandardizeOptions {
                db: Some(SourceDb::Worldometers),
                ..Default::default()
            };
            let saved = resolver.standard();
            resolver.set_standard(Standard::Iso3);
            let mut codes = Vec::with_capacity(names.len());
            for name in &names {
                match resolver.to_standard(&[name.as_str()], &opts) {
                    Ok(result) => match result.output {
                        StandardOutput::List(mut v) if !v.is_empty() => codes.push(v.remove(0)),
                        _ => codes.push(String::new()),
                    },
                    Err(GeoError::Lookup(_)) => codes.push(String::new()),
                    Err(e) => {
                        resolver.set_standard(saved);
                        return Err(e);
                    }
                }
            }
            resolver.set_standard(saved);

            table.set_column("iso3", codes.into_iter().map(Value::from).collect())?;
            tracing::info!(rows = table.n_rows(), "demographic reference loaded");
            self.demographics = Some(table);
        }
        self.demographics
            .as_ref()
            .ok_or_else(|| GeoError::Unclassified("demographic reference unavailable".into()))
    }

    /// The world map, iso3 -> geometry, with the per-country patches applied.
    fn geometry(&mut self) -> Result<&HashMap<String, Value>, GeoError> {
        if self.geometry.is_none() {
            let body = self.cache.get_or_fetch(sources::WORLD_GEOJSON_URL)?;
            let mut map = sources::parse_world_geojson(&body)?;
            for iso3 in sources::GEOJSON_PATCHES {
                let body = self.cache.get_or_fetch(&sources::country_geojson_url(iso3))?;
                map.insert(iso3.to_string(), sources::parse_country_geojson(&body)?);
            }
            tracing::info!(countries = map.len(), "world map reference loaded");
            self.geometry = Some(map);
        }
        self.geometry
            .as_ref()
            .ok_or_else(|| GeoError::Unclassified("world map reference unavailable".into()))
    }

    fn flags(&mut self) -> Result<&HashMap<String, String>, GeoError> {
        if self.flags.is_none() {
            let body = self.cache.get_or_fetch(sources::FLAGS_URL)?;
            let flags = sources::parse_flags(&body)?;
            tracing::info!(countries = flags.len(), "flag reference loaded");
            self.flags = Some(flags);
        }
        self.flags
            .as_ref()
            .ok_or_else(|| GeoError::Unclassified("flag reference unavailable".into()))
    }
}

impl Default for ReferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Adds per-country reference fields to location-keyed tables.
pub struct FieldAugmenter {
    resolver: NameResolver,
    store: ReferenceStore,
}

impl FieldAugmenter {
    pub fn new(resolver: NameResolver) -> Self {
        Self::with_store(resolver, ReferenceStore::new())
    }

    pub fn with_store(resolver: NameResolver, store: ReferenceStore) -> Self {
        Self { resolver, store }
    }

    /// Add the requested fields to `table`, keyed on the free-text location
    /// column `geo_column`. Exactly one value is produced per input row;
    /// rows without a reference counterpart get nulls (or empty lists for
    /// the region-list fields).
    ///
    /// A requested field whose column already exists fails with
    /// `InvalidKey` unless `overload` is set, in which case the column is
    /// recomputed in place.
    pub fn add_fields(
        &mut self,
        fields: &[Field],
        table: &DataTable,
        geo_column: &str,
        overload: bool,
    ) -> Result<DataTable, GeoError> {
        if fields.is_empty() {
            return Err(GeoError::InvalidKey("no fields requested".into()));
        }
        if !overload {
            for field in fields {
                if table.has_column(field.column_name()) {
                    return Err(GeoError::InvalidKey(format!(
                        "column '{}' already exists; pass overload to recompute it",
                        field.column_name()
                    )));
                }
            }
        }
        if !table.has_column(geo_column) {
            return Err(GeoError::InvalidKey(format!(
                "no location column '{}'",
                geo_column
            )));
        }

        let names = table.column_as_strings(geo_column)?;
        let (iso2, iso3) = self.canonical_codes(&names)?;

        let mut out = table.clone();
        for field in fields {
            let values = self.field_values(*field, &iso2, &iso3)?;
            out.set_column(field.column_name(), values)?;
        }
        Ok(out)
    }

    /// Both canonical code projections of the location column, resolved once
    /// up front. The active standard is restored afterwards either way.
    fn canonical_codes(
        &mut self,
        names: &[String],
    ) -> Result<(Vec<String>, Vec<String>), GeoError> {
        let saved = self.resolver.standard();
        let opts = StandardizeOptions::default();

        let mut project = |standard: Standard| -> Result<Vec<String>, GeoError> {
            self.resolver.set_standard(standard);
            match self.resolver.to_standard(names, &opts)?.output {
                StandardOutput::List(v) => Ok(v),
                _ => Err(GeoError::Unclassified("expected list output".into())),
            }
        };

        let codes = project(Standard::Iso2).and_then(|iso2| Ok((iso2, project(Standard::Iso3)?)));
        self.resolver.set_standard(saved);
        codes
    }

    fn field_values(
        &mut self,
        field: Field,
        iso2: &[String],
        iso3: &[String],
    ) -> Result<Vec<Value>, GeoError> {
        Ok(match field {
            Field::ContinentCode => iso2
                .iter()
                .map(|code| match catalogue::by_iso2(code) {
                    Some(r) => Value::from(r.continent.code()),
                    None => Value::Null,
                })
                .collect(),
            Field::ContinentName => iso2
                .iter()
                .map(|code| match catalogue::by_iso2(code) {
                    Some(r) => Value::from(r.continent.name()),
                    None => Value::Null,
                })
                .collect(),
            Field::CountryName => iso2
                .iter()
                .map(|code| match catalogue::by_iso2(code) {
                    Some(r) => Value::from(r.name),
                    None => Value::Null,
                })
                .collect(),

            Field::Population
            | Field::Area
            | Field::Fertility
            | Field::MedianAge
            | Field::UrbanRate => {
                let demo = self.store.demographics(&mut self.resolver)?;
                let keys = demo.column_as_strings("iso3")?;
                let idx = demo.column_index(field.column_name()).ok_or_else(|| {
                    GeoError::SchemaDrift(format!(
                        "demographic reference has no '{}' column",
                        field.column_name()
                    ))
                })?;
                let by_code: HashMap<&str, &Value> = keys
                    .iter()
                    .zip(&demo.rows)
                    .map(|(key, row)| (key.as_str(), &row[idx]))
                    .collect();
                iso3.iter()
                    .map(|code| by_code.get(code.as_str()).map_or(Value::Null, |v| (*v).clone()))
                    .collect()
            }

            Field::RegionCodeList => {
                let catalog = self.resolver.region_catalog()?;
                iso3.iter()
                    .map(|code| {
                        Value::Array(
                            catalog
                                .rows()
                                .iter()
                                .filter(|r| &r.iso3 == code)
                                .map(|r| Value::from(r.code))
                                .collect(),
                        )
                    })
                    .collect()
            }
            Field::RegionNameList => {
                let catalog = self.resolver.region_catalog()?;
                iso3.iter()
                    .map(|code| {
                        Value::Array(
                            catalog
                                .rows()
                                .iter()
                                .filter(|r| &r.iso3 == code && !r.region_name.is_empty())
                                .map(|r| Value::from(r.region_name.clone()))
                                .collect(),
                        )
                    })
                    .collect()
            }
            Field::Capital => {
                let catalog = self.resolver.region_catalog()?;
                iso3.iter()
                    .map(|code| {
                        catalog
                            .rows()
                            .iter()
                            .find(|r| &r.iso3 == code)
                            .map_or(Value::Null, |r| Value::from(r.capital.clone()))
                    })
                    .collect()
            }

            Field::Geometry => {
                let map = self.store.geometry()?;
                iso3.iter()
                    .map(|code| map.get(code).cloned().unwrap_or(Value::Null))
                    .collect()
            }
            Field::Flag => {
                let flags = self.store.flags()?;
                iso3.iter()
                    .map(|code| {
                        flags
                            .get(code)
                            .map_or(Value::Null, |url| Value::from(url.clone()))
                    })
                    .collect()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::sources::tests::{
        DEMOGRAPHICS_FIXTURE, FLAGS_FIXTURE, WORLD_GEOJSON_FIXTURE,
    };
    use super::*;
    use crate::region::wiki::{self, tests::{GEOSCHEME_FIXTURE, M49_FIXTURE}};
    use crate::region::RegionCatalog;
    use serde_json::json;
    use tempfile::TempDir;

    fn fixture_resolver() -> NameResolver {
        let m49 = wiki::parse_m49(M49_FIXTURE).unwrap();
        let geo = wiki::parse_geoscheme(GEOSCHEME_FIXTURE).unwrap();
        NameResolver::with_catalog(Standard::Iso2, RegionCatalog::from_parts(m49, geo))
    }

    fn preloaded_store() -> ReferenceStore {
        let dir = TempDir::new().unwrap();
        let mut store = ReferenceStore::with_cache(SourceCache::load_from(dir.path().to_path_buf()));

        let mut demo = DataTable::new(&[
            "country",
            "population",
            "area",
            "fertility",
            "median_age",
            "urban_rate",
            "iso3",
        ]);
        demo.push_row(vec![
            json!("France"),
            json!(65_273_511),
            json!(547_557),
            json!(1.9),
            json!(42),
            json!(82.0),
            json!("FRA"),
        ])
        .unwrap();
        store.preload_demographics(demo);

        let mut geometry = HashMap::new();
        geometry.insert("FRA".to_string(), json!({"type": "Polygon"}));
        store.preload_geometry(geometry);

        let mut flags = HashMap::new();
        flags.insert("FRA".to_string(), "http://flags.example/fra.svg".to_string());
        store.preload_flags(flags);

        store
    }

    fn input_table() -> DataTable {
        let mut t = DataTable::new(&["location", "cases"]);
        t.push_row(vec![json!("france"), json!(12)]).unwrap();
        t.push_row(vec![json!("Italy"), json!(7)]).unwrap();
        t
    }

    #[test]
    fn test_catalogue_backed_fields() {
        let mut a = FieldAugmenter::with_store(fixture_resolver(), preloaded_store());
        let out = a
            .add_fields(
                &[Field::ContinentCode, Field::ContinentName, Field::CountryName],
                &input_table(),
                "location",
                false,
            )
            .unwrap();
        assert_eq!(out.n_rows(), 2);
        assert_eq!(out.cell(0, "continent_code"), Some(&json!("EU")));
        assert_eq!(out.cell(1, "continent_name"), Some(&json!("Europe")));
        assert_eq!(out.cell(0, "country_name"), Some(&json!("France")));
        // Input columns are untouched.
        assert_eq!(out.cell(1, "cases"), Some(&json!(7)));
    }

    #[test]
    fn test_demographic_fields_with_reference_gap() {
        let mut a = FieldAugmenter::with_store(fixture_resolver(), preloaded_store());
        let out = a
            .add_fields(
                &[Field::Population, Field::MedianAge],
                &input_table(),
                "location",
                false,
            )
            .unwrap();
        assert_eq!(out.cell(0, "population"), Some(&json!(65_273_511)));
        assert_eq!(out.cell(0, "median_age"), Some(&json!(42)));
        // Italy is absent from the reference table: nulls, not an error.
        assert_eq!(out.cell(1, "population"), Some(&json!(null)));
        assert_eq!(out.cell(1, "median_age"), Some(&json!(null)));
    }

    #[test]
    fn test_region_list_and_capital_fields() {
        let mut a = FieldAugmenter::with_store(fixture_resolver(), preloaded_store());
        let out = a
            .add_fields(
                &[Field::RegionCodeList, Field::RegionNameList, Field::Capital],
                &input_table(),
                "location",
                false,
            )
            .unwrap();
        assert_eq!(out.cell(0, "region_code_list"), Some(&json!([1, 150])));
        // Code 1 has no name in the region source, so the name list skips it.
        assert_eq!(out.cell(0, "region_name_list"), Some(&json!(["Europe"])));
        assert_eq!(
            out.cell(1, "region_name_list"),
            Some(&json!(["Europe", "Southern Europe"]))
        );
        assert_eq!(out.cell(0, "capital"), Some(&json!("Paris")));
        assert_eq!(out.cell(1, "capital"), Some(&json!("Rome")));
    }

    #[test]
    fn test_geometry_and_flag_fields() {
        let mut a = FieldAugmenter::with_store(fixture_resolver(), preloaded_store());
        let out = a
            .add_fields(
                &[Field::Geometry, Field::Flag],
                &input_table(),
                "location",
                false,
            )
            .unwrap();
        assert_eq!(out.cell(0, "geometry"), Some(&json!({"type": "Polygon"})));
        assert_eq!(out.cell(0, "flag"), Some(&json!("http://flags.example/fra.svg")));
        assert_eq!(out.cell(1, "geometry"), Some(&json!(null)));
        assert_eq!(out.cell(1, "flag"), Some(&json!(null)));
    }

    #[test]
    fn test_existing_column_requires_overload() {
        let mut a = FieldAugmenter::with_store(fixture_resolver(), preloaded_store());
        let mut table = input_table();
        table
            .set_column("population", vec![json!(0), json!(0)])
            .unwrap();

        let err = a
            .add_fields(&[Field::Population], &table, "location", false)
            .unwrap_err();
        assert!(matches!(err, GeoError::InvalidKey(_)));

        // With overload the column is recomputed in place.
        let out = a
            .add_fields(&[Field::Population], &table, "location", true)
            .unwrap();
        assert_eq!(out.n_rows(), 2);
        assert_eq!(out.columns, table.columns);
        assert_eq!(out.cell(0, "population"), Some(&json!(65_273_511)));
    }

    #[test]
    fn test_empty_field_list_rejected() {
        let mut a = FieldAugmenter::with_store(fixture_resolver(), preloaded_store());
        let err = a
            .add_fields(&[], &input_table(), "location", false)
            .unwrap_err();
        assert!(matches!(err, GeoError::InvalidKey(_)));
    }

    #[test]
    fn test_missing_geo_column_rejected() {
        let mut a = FieldAugmenter::with_store(fixture_resolver(), preloaded_store());
        let err = a
            .add_fields(&[Field::Capital], &input_table(), "country", false)
            .unwrap_err();
        assert!(matches!(err, GeoError::InvalidKey(_)));
    }

    #[test]
    fn test_demographics_built_from_cached_source() {
        // A cache primed with the raw HTML serves the store without network,
        // and repeated calls reuse the parsed table.
        let dir = TempDir::new().unwrap();
        let mut cache = SourceCache::load_from(dir.path().to_path_buf());
        cache
            .put(sources::DEMOGRAPHICS_URL, DEMOGRAPHICS_FIXTURE)
            .unwrap();
        let store = ReferenceStore::with_cache(cache);

        let mut a = FieldAugmenter::with_store(fixture_resolver(), store);
        let mut table = DataTable::new(&["location"]);
        table.push_row(vec![json!("France")]).unwrap();

        let first = a
            .add_fields(&[Field::Population], &table, "location", false)
            .unwrap();
        assert_eq!(first.cell(0, "population"), Some(&json!(65_273_511)));

        let second = a
            .add_fields(&[Field::Area], &table, "location", false)
            .unwrap();
        assert_eq!(second.cell(0, "area"), Some(&json!(547_557)));
    }

    #[test]
    fn test_geometry_built_from_cached_source_with_patches() {
        let dir = TempDir::new().unwrap();
        let mut cache = SourceCache::load_from(dir.path().to_path_buf());
        cache
            .put(sources::WORLD_GEOJSON_URL, WORLD_GEOJSON_FIXTURE)
            .unwrap();
        for iso3 in sources::GEOJSON_PATCHES {
            cache
                .put(&sources::country_geojson_url(iso3), WORLD_GEOJSON_FIXTURE)
                .unwrap();
        }
        cache.put(sources::FLAGS_URL, FLAGS_FIXTURE).unwrap();
        let mut store = ReferenceStore::with_cache(cache);

        let map = store.geometry().unwrap();
        assert!(map.contains_key("FRA"));
        assert!(map.contains_key("SSD"));
        assert!(map.contains_key("SDN"));

        let flags = store.flags().unwrap();
        assert_eq!(flags["FRA"], "http://upload.example.org/flag_of_france.svg");
    }

    #[test]
    fn test_unresolvable_location_fails() {
        let mut a = FieldAugmenter::with_store(fixture_resolver(), preloaded_store());
        let mut table = DataTable::new(&["location"]);
        table.push_row(vec![json!("Atlantis Xqz")]).unwrap();
        let err = a
            .add_fields(&[Field::Capital], &table, "location", false)
            .unwrap_err();
        assert!(matches!(err, GeoError::Lookup(_)));
    }
}
