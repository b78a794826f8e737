//! Region hierarchy: hardcoded political/economic blocs plus dynamic
//! UN M49 / geoscheme regions scraped from reference documents.

pub mod blocs;
#[allow(clippy::module_inception)]
pub mod catalog;
pub mod wiki;

pub use catalog::{RegionCatalog, RegionRow};
pub use wiki::GeoSchemeRow;
