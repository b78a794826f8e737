//! EpiGeo — geographic standardization for epidemiological datasets.
//!
//! Three cooperating layers:
//! - [`resolver`]: free-text country names to a canonical ISO 3166 standard,
//!   with per-dataset override tables and region expansion.
//! - [`region`]: static political/economic blocs plus dynamic UN M49 regions
//!   scraped from reference documents.
//! - [`augment`]: per-country reference fields (population, area, capital,
//!   geometry, flag, ...) merged onto location-keyed tables.
//!
//! External reference documents are fetched through an on-disk cache
//! ([`fetch::SourceCache`]) so repeated runs stay offline.

pub mod augment;
pub mod catalogue;
pub mod error;
pub mod fetch;
pub mod region;
pub mod resolver;
pub mod table;

pub use augment::{Field, FieldAugmenter, ReferenceStore};
pub use error::GeoError;
pub use region::RegionCatalog;
pub use resolver::{NameResolver, Standard, StandardizeOptions};
pub use table::DataTable;
