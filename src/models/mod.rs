pub mod catalog;
pub mod enums;
pub mod medication;
pub mod profile;
pub mod tags;

pub use catalog::CatalogItem;
pub use enums::{MedicationKind, MedicationStatus, Sex};
pub use medication::{MedicationEntry, MedicationId, MedicationInput};
pub use profile::{Profile, ProfileFields, TagKind};
pub use tags::TagList;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
