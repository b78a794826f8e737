//! The supported augmentation fields.
//!
//! A closed set: each variant carries its merge strategy in the augmenter's
//! exhaustive dispatch, so an unsupported field name can only fail here, at
//! parse time, before any fetch happens.

use crate::error::GeoError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ContinentCode,
    ContinentName,
    CountryName,
    Population,
    Area,
    Fertility,
    MedianAge,
    UrbanRate,
    RegionCodeList,
    RegionNameList,
    Capital,
    Geometry,
    Flag,
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[
            Self::ContinentCode,
            Self::ContinentName,
            Self::CountryName,
            Self::Population,
            Self::Area,
            Self::Fertility,
            Self::MedianAge,
            Self::UrbanRate,
            Self::RegionCodeList,
            Self::RegionNameList,
            Self::Capital,
            Self::Geometry,
            Self::Flag,
        ]
    }

    /// The column name added to the augmented table.
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::ContinentCode => "continent_code",
            Self::ContinentName => "continent_name",
            Self::CountryName => "country_name",
            Self::Population => "population",
            Self::Area => "area",
            Self::Fertility => "fertility",
            Self::MedianAge => "median_age",
            Self::UrbanRate => "urban_rate",
            Self::RegionCodeList => "region_code_list",
            Self::RegionNameList => "region_name_list",
            Self::Capital => "capital",
            Self::Geometry => "geometry",
            Self::Flag => "flag",
        }
    }

    /// Provenance of the data behind this field.
    pub fn source(&self) -> &'static str {
        match self {
            Self::ContinentCode | Self::ContinentName | Self::CountryName => {
                "built-in ISO 3166 catalogue"
            }
            Self::Population | Self::Area | Self::Fertility | Self::MedianAge | Self::UrbanRate => {
                super::sources::DEMOGRAPHICS_URL
            }
            Self::RegionCodeList | Self::RegionNameList | Self::Capital => {
                crate::region::catalog::GEOSCHEME_URL
            }
            Self::Geometry => super::sources::WORLD_GEOJSON_URL,
            Self::Flag => super::sources::FLAGS_URL,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

impl FromStr for Field {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::all()
            .iter()
            .find(|f| f.column_name() == s)
            .copied()
            .ok_or_else(|| {
                GeoError::InvalidKey(format!(
                    "unsupported field '{}'; known fields: {}",
                    s,
                    Field::all()
                        .iter()
                        .map(|f| f.column_name())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for field in Field::all() {
            assert_eq!(&field.column_name().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_field_is_invalid_key() {
        let err = "gdp".parse::<Field>().unwrap_err();
        assert!(matches!(err, GeoError::InvalidKey(_)));
    }

    #[test]
    fn test_sources_are_documented() {
        for field in Field::all() {
            assert!(!field.source().is_empty());
        }
    }
}
