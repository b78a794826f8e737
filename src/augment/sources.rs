//! Parsers for the augmentation reference documents.
//!
//! Three external sources back the augmenter: a demographic HTML table, a
//! world GeoJSON map keyed by iso3, and a flag-icon index. Each parser
//! assumes a fixed document shape and fails closed with `SchemaDrift` when
//! the shape no longer matches.

use crate::error::GeoError;
use crate::region::wiki::extract_tables;
use crate::table::DataTable;
use serde_json::Value;
use std::collections::HashMap;

pub const DEMOGRAPHICS_URL: &str =
    "https://www.worldometers.info/world-population/population-by-country/";
pub const WORLD_GEOJSON_URL: &str =
    "https://github.com/johan/world.geo.json/raw/master/countries.geo.json";
pub const FLAGS_URL: &str =
    "https://github.com/linssen/country-flag-icons/raw/master/countries.json";

/// Countries missing from the world map, patched in from the per-country
/// files of the same repository.
pub const GEOJSON_PATCHES: &[&str] = &["SSD", "SDN"];

/// Per-country GeoJSON file URL for a patch entry.
pub fn country_geojson_url(iso3: &str) -> String {
    format!(
        "https://github.com/johan/world.geo.json/raw/master/countries/{}.geo.json",
        iso3
    )
}

/// Column positions this parser depends on, with the header prefix each one
/// must carry. A reshuffled source table fails here rather than silently
/// shifting values into the wrong fields.
const DEMOGRAPHIC_COLUMNS: &[(usize, &str, &str)] = &[
    (0, "", "idx"),
    (1, "Country", "country"),
    (2, "Population", "population"),
    (6, "Land Area", "area"),
    (8, "Fert", "fertility"),
    (9, "Med", "median_age"),
    (10, "Urban", "urban_rate"),
];

fn parse_count(cell: &str) -> Value {
    cell.replace(',', "")
        .parse::<i64>()
        .map(Value::from)
        .unwrap_or(Value::Null)
}

fn parse_rate(cell: &str) -> Value {
    cell.trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .map(Value::from)
        .unwrap_or(Value::Null)
}

/// Parse the demographic table: one row per country, columns
/// (country, population, area, fertility, median_age, urban_rate).
/// Unparseable numeric cells (e.g. "N.A.") become nulls; the country column
/// stays free-text for the augmenter to standardize.
pub fn parse_demographics(html: &str) -> Result<DataTable, GeoError> {
    let tables = extract_tables(html)?;
    let table = tables
        .first()
        .ok_or_else(|| GeoError::SchemaDrift("demographic page has no table".into()))?;

    let header = table
        .first()
        .ok_or_else(|| GeoError::SchemaDrift("demographic table is empty".into()))?;
    for (pos, prefix, field) in DEMOGRAPHIC_COLUMNS {
        let cell = header.get(*pos).ok_or_else(|| {
            GeoError::SchemaDrift(format!(
                "demographic table has no column {} (wanted '{}' for {})",
                pos, prefix, field
            ))
        })?;
        if !cell.starts_with(prefix) {
            return Err(GeoError::SchemaDrift(format!(
                "demographic column {} is '{}', expected prefix '{}' for {}",
                pos, cell, prefix, field
            )));
        }
    }

    let mut out = DataTable::new(&[
        "country",
        "population",
        "area",
        "fertility",
        "median_age",
        "urban_rate",
    ]);
    for row in &table[1..] {
        if row.len() <= 10 {
            return Err(GeoError::SchemaDrift(format!(
                "demographic table row has {} columns, expected at least 11",
                row.len()
            )));
        }
        out.push_row(vec![
            Value::from(row[1].clone()),
            parse_count(&row[2]),
            parse_count(&row[6]),
            parse_rate(&row[8]),
            parse_count(&row[9]),
            parse_rate(&row[10]),
        ])?;
    }

    if out.n_rows() == 0 {
        return Err(GeoError::SchemaDrift(
            "demographic table contains no country rows".into(),
        ));
    }
    Ok(out)
}

/// Parse the world map FeatureCollection into iso3 -> geometry.
pub fn parse_world_geojson(body: &str) -> Result<HashMap<String, Value>, GeoError> {
    let doc: Value = serde_json::from_str(body)?;
    let features = doc
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| GeoError::SchemaDrift("world map has no feature list".into()))?;

    let mut out = HashMap::new();
    for feature in features {
        let iso3 = feature
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| GeoError::SchemaDrift("world map feature without an id".into()))?;
        let geometry = feature
            .get("geometry")
            .cloned()
            .ok_or_else(|| GeoError::SchemaDrift("world map feature without geometry".into()))?;
        out.insert(iso3.to_string(), geometry);
    }
    Ok(out)
}

/// Extract the single geometry of a per-country GeoJSON file.
pub fn parse_country_geojson(body: &str) -> Result<Value, GeoError> {
    let doc: Value = serde_json::from_str(body)?;
    doc.get("features")
        .and_then(Value::as_array)
        .and_then(|f| f.first())
        .and_then(|f| f.get("geometry"))
        .cloned()
        .ok_or_else(|| GeoError::SchemaDrift("country file has no geometry feature".into()))
}

/// Parse the flag index into iso3 -> absolute image URL.
pub fn parse_flags(body: &str) -> Result<HashMap<String, String>, GeoError> {
    let doc: Value = serde_json::from_str(body)?;
    let entries = doc
        .as_array()
        .ok_or_else(|| GeoError::SchemaDrift("flag index is not a list".into()))?;

    let mut out = HashMap::new();
    for entry in entries {
        let iso3 = entry.get("alpha3").and_then(Value::as_str);
        let file_url = entry.get("file_url").and_then(Value::as_str);
        if let (Some(iso3), Some(file_url)) = (iso3, file_url) {
            out.insert(iso3.to_uppercase(), format!("http:{}", file_url));
        }
    }

    if out.is_empty() {
        return Err(GeoError::SchemaDrift("flag index contains no entries".into()));
    }
    Ok(out)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const DEMOGRAPHICS_FIXTURE: &str = r#"
        <html><body><table>
          <tr><th>#</th><th>Country (or dependency)</th><th>Population (2020)</th>
              <th>Yearly Change</th><th>Net Change</th><th>Density (P/Km2)</th>
              <th>Land Area (Km2)</th><th>Migrants (net)</th><th>Fert. Rate</th>
              <th>Med. Age</th><th>Urban Pop %</th><th>World Share</th></tr>
          <tr><td>1</td><td>France</td><td>65,273,511</td><td>0.22 %</td>
              <td>143,783</td><td>119</td><td>547,557</td><td>36,527</td>
              <td>1.9</td><td>42</td><td>82 %</td><td>0.84 %</td></tr>
          <tr><td>2</td><td>Holy See</td><td>801</td><td>0.25 %</td>
              <td>2</td><td>2,003</td><td>0</td><td></td>
              <td>N.A.</td><td>N.A.</td><td>N.A.</td><td>0.00 %</td></tr>
        </table></body></html>"#;

    pub(crate) const WORLD_GEOJSON_FIXTURE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": "FRA", "properties": {"name": "France"},
             "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]]}}
        ]}"#;

    pub(crate) const FLAGS_FIXTURE: &str = r#"[
        {"name": "France", "alpha2": "fr", "alpha3": "fra",
         "file_url": "//upload.example.org/flag_of_france.svg"},
        {"name": "Unrecognized", "alpha2": "xx"}
    ]"#;

    #[test]
    fn test_parse_demographics() {
        let table = parse_demographics(DEMOGRAPHICS_FIXTURE).unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.cell(0, "country"), Some(&Value::from("France")));
        assert_eq!(table.cell(0, "population"), Some(&Value::from(65_273_511)));
        assert_eq!(table.cell(0, "area"), Some(&Value::from(547_557)));
        assert_eq!(table.cell(0, "fertility"), Some(&Value::from(1.9)));
        assert_eq!(table.cell(0, "median_age"), Some(&Value::from(42)));
        assert_eq!(table.cell(0, "urban_rate"), Some(&Value::from(82.0)));
    }

    #[test]
    fn test_parse_demographics_na_becomes_null() {
        let table = parse_demographics(DEMOGRAPHICS_FIXTURE).unwrap();
        assert_eq!(table.cell(1, "fertility"), Some(&Value::Null));
        assert_eq!(table.cell(1, "median_age"), Some(&Value::Null));
        assert_eq!(table.cell(1, "urban_rate"), Some(&Value::Null));
    }

    #[test]
    fn test_parse_demographics_reshuffled_header_is_drift() {
        let html = r#"<table>
            <tr><th>#</th><th>Nation</th><th>Population</th><th>c</th><th>d</th>
                <th>e</th><th>Land Area</th><th>g</th><th>Fert</th><th>Med</th>
                <th>Urban</th></tr>
            <tr><td>1</td><td>France</td><td>1</td><td></td><td></td><td></td>
                <td>1</td><td></td><td>1</td><td>1</td><td>1</td></tr>
        </table>"#;
        let err = parse_demographics(html).unwrap_err();
        assert!(matches!(err, GeoError::SchemaDrift(_)));
    }

    #[test]
    fn test_parse_demographics_narrow_row_is_drift() {
        let html = r#"<table>
            <tr><th>#</th><th>Country</th><th>Population</th><th>c</th><th>d</th>
                <th>e</th><th>Land Area</th><th>g</th><th>Fert</th><th>Med</th>
                <th>Urban</th></tr>
            <tr><td>1</td><td>France</td></tr>
        </table>"#;
        let err = parse_demographics(html).unwrap_err();
        assert!(matches!(err, GeoError::SchemaDrift(_)));
    }

    #[test]
    fn test_parse_world_geojson() {
        let map = parse_world_geojson(WORLD_GEOJSON_FIXTURE).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["FRA"]["type"], Value::from("Polygon"));
    }

    #[test]
    fn test_parse_world_geojson_missing_features_is_drift() {
        let err = parse_world_geojson(r#"{"type": "x"}"#).unwrap_err();
        assert!(matches!(err, GeoError::SchemaDrift(_)));
    }

    #[test]
    fn test_parse_country_geojson() {
        let geometry = parse_country_geojson(WORLD_GEOJSON_FIXTURE).unwrap();
        assert_eq!(geometry["type"], Value::from("Polygon"));
    }

    #[test]
    fn test_parse_flags() {
        let flags = parse_flags(FLAGS_FIXTURE).unwrap();
        assert_eq!(
            flags["FRA"],
            "http://upload.example.org/flag_of_france.svg"
        );
        assert_eq!(flags.len(), 1);
    }
}
