//! Items from the external scan/search/trending feeds.
//!
//! The profile manager never sees these directly; the presentation layer
//! maps a confirmed item into a `MedicationInput` and calls `add_medication`.

use serde::{Deserialize, Serialize};

use super::enums::{MedicationKind, MedicationStatus};
use super::medication::MedicationInput;

/// An opaque catalog record as delivered by the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MedicationKind,
    /// Stack-compatibility score, 0-100.
    #[serde(default)]
    pub score: Option<u8>,
    #[serde(default, alias = "risk", alias = "feedback")]
    pub risk_note: Option<String>,
    #[serde(default, alias = "cost")]
    pub cost_per_month: Option<u32>,
    #[serde(default, alias = "badges")]
    pub source_tags: Vec<String>,
}

impl CatalogItem {
    /// Medication input for a newly confirmed item: active, no course dates.
    pub fn to_medication_input(&self, dosage: impl Into<String>) -> MedicationInput {
        MedicationInput {
            name: self.name.clone(),
            dosage: dosage.into(),
            kind: self.kind,
            status: MedicationStatus::Active,
            start_date: None,
            end_date: None,
        }
    }
}
