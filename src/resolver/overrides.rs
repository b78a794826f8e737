//! Per-dataset name override tables.
//!
//! Hand-curated corrections for known quirks of each source dataset's
//! country naming, applied verbatim before catalogue lookup. Keys are in
//! title case, i.e. after input normalization. Values may be a replacement
//! name, an iso3 code, or empty (entries to drop, e.g. cruise ships reported
//! as locations).

use super::types::SourceDb;

const JHU: &[(&str, &str)] = &[
    ("Congo (Brazzaville)", "Republic of the Congo"),
    ("Congo (Kinshasa)", "COD"),
    ("Korea, South", "KOR"),
    ("Taiwan*", "Taiwan"),
    ("Laos", "LAO"),
    ("West Bank And Gaza", "PSE"),
    ("Burma", "Myanmar"),
    ("Iran", "IRN"),
    // Boats, not countries.
    ("Diamond Princess", ""),
    ("Ms Zaandam", ""),
];

const WORLDOMETERS: &[(&str, &str)] = &[
    ("Dr Congo", "COD"),
    ("Congo", "COG"),
    ("Iran", "IRN"),
    ("South Korea", "KOR"),
    ("North Korea", "PRK"),
    ("Czech Republic (Czechia)", "CZE"),
    ("Laos", "LAO"),
    ("Sao Tome & Principe", "STP"),
    ("Channel Islands", "JEY"),
    ("St. Vincent & Grenadines", "VCT"),
    ("U.S. Virgin Islands", "VIR"),
    ("Saint Kitts & Nevis", "KNA"),
    ("Faeroe Islands", "FRO"),
    ("Caribbean Netherlands", "BES"),
    ("Wallis & Futuna", "WLF"),
    ("Saint Pierre & Miquelon", "SPM"),
    ("Sint Maarten", "SXM"),
];

const OWID: &[(&str, &str)] = &[
    ("Bonaire Sint Eustatius And Saba", "BES"),
    ("Cape Verde", "CPV"),
    ("Democratic Republic Of Congo", "COD"),
    ("Faeroe Islands", "FRO"),
    ("Laos", "LAO"),
    ("South Korea", "KOR"),
    ("Swaziland", "SWZ"),
    ("United States Virgin Islands", "VIR"),
    ("Iran", "IRN"),
];

fn table(db: SourceDb) -> &'static [(&'static str, &'static str)] {
    match db {
        SourceDb::Jhu => JHU,
        SourceDb::Worldometers => WORLDOMETERS,
        SourceDb::Owid => OWID,
    }
}

/// Apply the override table for `db` to a title-cased name. Names absent
/// from the table pass through unchanged.
pub fn apply(db: SourceDb, name: &str) -> String {
    table(db)
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| name.to_string())
}
