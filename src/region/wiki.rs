//! HTML table extraction for the two Wikipedia reference documents.
//!
//! Both parsers assume a fixed page shape (which table, which columns) and
//! fail closed with `SchemaDrift` on any mismatch, partial or not.

use crate::error::GeoError;
use scraper::{Html, Selector};

fn selector(css: &str) -> Result<Selector, GeoError> {
    Selector::parse(css).map_err(|e| GeoError::Unclassified(format!("selector '{}': {}", css, e)))
}

/// Extract every `<table>` as rows of trimmed cell texts.
pub fn extract_tables(html: &str) -> Result<Vec<Vec<Vec<String>>>, GeoError> {
    let doc = Html::parse_document(html);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("th, td")?;

    let mut tables = Vec::new();
    for table in doc.select(&table_sel) {
        let mut rows = Vec::new();
        for row in table.select(&row_sel) {
            let cells: Vec<String> = row
                .select(&cell_sel)
                .map(|cell| {
                    cell.text()
                        .collect::<String>()
                        .split_whitespace()
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect();
            if !cells.is_empty() {
                rows.push(cells);
            }
        }
        tables.push(rows);
    }
    Ok(tables)
}

/// Parse the numeric-region-code table (second table on the M49 page):
/// (code, region display name), parenthetical annotations stripped.
pub fn parse_m49(html: &str) -> Result<Vec<(u32, String)>, GeoError> {
    let tables = extract_tables(html)?;
    let table = tables
        .get(1)
        .ok_or_else(|| GeoError::SchemaDrift("M49 page no longer has a second table".into()))?;

    let mut out = Vec::new();
    for row in table {
        if row.len() < 2 {
            return Err(GeoError::SchemaDrift(
                "M49 table row with fewer than two columns".into(),
            ));
        }
        // Header row: first cell is not a numeric code.
        let code = match row[0].parse::<u32>() {
            Ok(code) => code,
            Err(_) => continue,
        };
        let name = row[1]
            .split('(')
            .next()
            .unwrap_or("")
            .trim_end()
            .to_string();
        out.push((code, name));
    }

    if out.is_empty() {
        return Err(GeoError::SchemaDrift("M49 table contains no code rows".into()));
    }
    Ok(out)
}

/// One exploded geoscheme record: a country and the M49 codes it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoSchemeRow {
    pub country: String,
    pub capital: String,
    pub iso3: String,
    pub codes: Vec<u32>,
}

/// Marker used by the geoscheme source for entries without a standard iso3.
const NON_STANDARD_ISO3: &str = "\u{2013}"; // en dash

/// Parse the country→region multi-membership table (first table on the
/// geoscheme page): columns (country, capital, iso2, iso3, numeric, m49),
/// the m49 cell being a `<`-delimited chain of codes.
pub fn parse_geoscheme(html: &str) -> Result<Vec<GeoSchemeRow>, GeoError> {
    let tables = extract_tables(html)?;
    let table = tables
        .first()
        .ok_or_else(|| GeoError::SchemaDrift("geoscheme page has no table".into()))?;

    let mut out = Vec::new();
    let mut saw_header = false;
    for row in table {
        if row.len() != 6 {
            return Err(GeoError::SchemaDrift(format!(
                "geoscheme table row has {} columns, expected 6",
                row.len()
            )));
        }
        if !saw_header {
            // First row is the header; verify the leading column label.
            if !row[0].starts_with("Country") {
                return Err(GeoError::SchemaDrift(format!(
                    "geoscheme table header starts with '{}', expected 'Country'",
                    row[0]
                )));
            }
            saw_header = true;
            continue;
        }

        // Non-standard iso3 entries are skipped entirely.
        if row[3] == NON_STANDARD_ISO3 {
            continue;
        }

        let codes: Vec<u32> = row[5]
            .replace(' ', "")
            .split('<')
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u32>().map_err(|_| {
                    GeoError::SchemaDrift(format!("geoscheme m49 cell '{}' is not numeric", row[5]))
                })
            })
            .collect::<Result<_, _>>()?;

        out.push(GeoSchemeRow {
            country: row[0].clone(),
            capital: row[1].clone(),
            iso3: row[3].clone(),
            codes,
        });
    }

    if out.is_empty() {
        return Err(GeoError::SchemaDrift(
            "geoscheme table contains no country rows".into(),
        ));
    }
    Ok(out)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const M49_FIXTURE: &str = r#"
        <html><body>
        <table><tr><td>navigation box, ignored</td></tr></table>
        <table>
          <tr><th>Code</th><th>Region Name</th></tr>
          <tr><td>002</td><td>Africa</td></tr>
          <tr><td>150</td><td>Europe</td></tr>
          <tr><td>039</td><td>Southern Europe (and nearby)</td></tr>
        </table>
        </body></html>"#;

    pub(crate) const GEOSCHEME_FIXTURE: &str = r#"
        <html><body>
        <table>
          <tr><th>Country or Area</th><th>Capital</th><th>ISO2</th>
              <th>ISO3</th><th>Num</th><th>M49</th></tr>
          <tr><td>France</td><td>Paris</td><td>FR</td><td>FRA</td>
              <td>250</td><td>001 &lt; 150</td></tr>
          <tr><td>Italy</td><td>Rome</td><td>IT</td><td>ITA</td>
              <td>380</td><td>001 &lt; 150 &lt; 039</td></tr>
          <tr><td>Sark</td><td>Sark</td><td>&#8211;</td><td>&#8211;</td>
              <td>&#8211;</td><td>001</td></tr>
        </table>
        </body></html>"#;

    #[test]
    fn test_parse_m49_strips_parentheticals() {
        let rows = parse_m49(M49_FIXTURE).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], (2, "Africa".to_string()));
        assert_eq!(rows[2], (39, "Southern Europe".to_string()));
    }

    #[test]
    fn test_parse_m49_missing_table_is_drift() {
        let err = parse_m49("<html><table></table></html>").unwrap_err();
        assert!(matches!(err, GeoError::SchemaDrift(_)));
    }

    #[test]
    fn test_parse_geoscheme_explodes_codes() {
        let rows = parse_geoscheme(GEOSCHEME_FIXTURE).unwrap();
        assert_eq!(rows.len(), 2); // Sark skipped: non-standard iso3
        assert_eq!(rows[0].iso3, "FRA");
        assert_eq!(rows[0].capital, "Paris");
        assert_eq!(rows[0].codes, vec![1, 150]);
        assert_eq!(rows[1].codes, vec![1, 150, 39]);
    }

    #[test]
    fn test_parse_geoscheme_wrong_width_is_drift() {
        let html = r#"<table>
            <tr><th>Country</th><th>Capital</th></tr>
            <tr><td>France</td><td>Paris</td></tr>
        </table>"#;
        let err = parse_geoscheme(html).unwrap_err();
        assert!(matches!(err, GeoError::SchemaDrift(_)));
    }

    #[test]
    fn test_parse_geoscheme_header_drift() {
        let html = r#"<table>
            <tr><th>Nation</th><th>b</th><th>c</th><th>d</th><th>e</th><th>f</th></tr>
            <tr><td>France</td><td>Paris</td><td>FR</td><td>FRA</td><td>250</td><td>001</td></tr>
        </table>"#;
        let err = parse_geoscheme(html).unwrap_err();
        assert!(matches!(err, GeoError::SchemaDrift(_)));
    }

    #[test]
    fn test_extract_tables_collapses_whitespace() {
        let tables = extract_tables("<table><tr><td> a \n b </td></tr></table>").unwrap();
        assert_eq!(tables[0][0][0], "a b");
    }
}
