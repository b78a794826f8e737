//! Dataset augmentation: merge cached per-country reference attributes onto
//! a location-keyed table.

#[allow(clippy::module_inception)]
pub mod augmenter;
pub mod fields;
pub mod sources;

pub use augmenter::{FieldAugmenter, ReferenceStore};
pub use fields::Field;
