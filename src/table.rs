//! Minimal ordered-column table.
//!
//! The augmentation layer works on caller-supplied tabular data without
//! pulling in a dataframe dependency: a `DataTable` is a list of column names
//! plus rows of JSON values, serde round-trippable so the CLI can read and
//! write it as JSON directly.

use crate::error::GeoError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A location-keyed tabular dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl DataTable {
    /// An empty table with the given column names.
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Append a row. Fails if the width does not match the column count.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), GeoError> {
        if row.len() != self.columns.len() {
            return Err(GeoError::InvalidKey(format!(
                "row width {} does not match {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// The cell values of one column, as strings where possible.
    /// Non-string scalars (e.g. numeric codes) are coerced via Display.
    pub fn column_as_strings(&self, name: &str) -> Result<Vec<String>, GeoError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| GeoError::InvalidKey(format!("no column '{}'", name)))?;
        Ok(self
            .rows
            .iter()
            .map(|row| match &row[idx] {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect())
    }

    /// Add (or replace, when it already exists) a column with one value per
    /// row. Fails on a length mismatch: augmentation never partially fills.
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) -> Result<(), GeoError> {
        if values.len() != self.rows.len() {
            return Err(GeoError::Unclassified(format!(
                "column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }
        match self.column_index(name) {
            Some(idx) => {
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row[idx] = v;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row.push(v);
                }
            }
        }
        Ok(())
    }

    /// Drop a column if present. Missing columns are ignored.
    pub fn drop_column(&mut self, name: &str) {
        if let Some(idx) = self.column_index(name) {
            self.columns.remove(idx);
            for row in &mut self.rows {
                row.remove(idx);
            }
        }
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> DataTable {
        let mut t = DataTable::new(&["location", "cases"]);
        t.push_row(vec![json!("France"), json!(12)]).unwrap();
        t.push_row(vec![json!("Italy"), json!(7)]).unwrap();
        t
    }

    #[test]
    fn test_push_row_width_checked() {
        let mut t = DataTable::new(&["a", "b"]);
        assert!(t.push_row(vec![json!(1)]).is_err());
        assert!(t.push_row(vec![json!(1), json!(2)]).is_ok());
    }

    #[test]
    fn test_column_as_strings_coerces() {
        let t = sample();
        assert_eq!(t.column_as_strings("location").unwrap(), vec!["France", "Italy"]);
        assert_eq!(t.column_as_strings("cases").unwrap(), vec!["12", "7"]);
        assert!(t.column_as_strings("missing").is_err());
    }

    #[test]
    fn test_set_column_appends_and_replaces() {
        let mut t = sample();
        t.set_column("iso3", vec![json!("FRA"), json!("ITA")]).unwrap();
        assert_eq!(t.cell(0, "iso3"), Some(&json!("FRA")));

        t.set_column("iso3", vec![json!("X"), json!("Y")]).unwrap();
        assert_eq!(t.columns.len(), 3);
        assert_eq!(t.cell(1, "iso3"), Some(&json!("Y")));
    }

    #[test]
    fn test_set_column_length_mismatch() {
        let mut t = sample();
        assert!(t.set_column("iso3", vec![json!("FRA")]).is_err());
    }

    #[test]
    fn test_drop_column() {
        let mut t = sample();
        t.drop_column("cases");
        assert!(!t.has_column("cases"));
        assert_eq!(t.rows[0].len(), 1);
        t.drop_column("never-there"); // no-op
    }

    #[test]
    fn test_serde_round_trip() {
        let t = sample();
        let json = serde_json::to_string(&t).unwrap();
        let back: DataTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
