use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{MedicationKind, MedicationStatus};
use crate::profile_state::ProfileError;

/// Stable identity of a stack entry, assigned when the entry enters the stack.
///
/// Entries are still addressed by position at the API surface; the id lets
/// a draft find its entry again after other entries moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicationId(Uuid);

impl MedicationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MedicationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MedicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One medication or supplement in the user's stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationEntry {
    pub id: MedicationId,
    pub name: String,
    pub dosage: String,
    pub kind: MedicationKind,
    pub status: MedicationStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl MedicationEntry {
    /// Build an entry from validated input under the given id.
    pub fn from_input(id: MedicationId, input: MedicationInput) -> Self {
        Self {
            id,
            name: input.name,
            dosage: input.dosage,
            kind: input.kind,
            status: input.status,
            start_date: input.start_date,
            end_date: input.end_date,
        }
    }

    /// The editable fields of this entry.
    pub fn to_input(&self) -> MedicationInput {
        MedicationInput {
            name: self.name.clone(),
            dosage: self.dosage.clone(),
            kind: self.kind,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == MedicationStatus::Active
    }
}

/// Medication fields as entered by the user (add form or edit draft).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationInput {
    pub name: String,
    pub dosage: String,
    pub kind: MedicationKind,
    pub status: MedicationStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl MedicationInput {
    /// Required name, and an end date no earlier than the start date.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::validation("name", "Medication name is required"));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ProfileError::validation(
                    "endDate",
                    format!("End date {end} is before start date {start}"),
                ));
            }
        }
        Ok(())
    }
}
