use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{MedicationEntry, MedicationId, MedicationKind, MedicationStatus, ProfileFields};

/// Label shown instead of the name while private mode is on.
pub const PRIVATE_NAME_LABEL: &str = "Private";
/// Label shown for a name that was never filled in.
pub const GUEST_NAME_LABEL: &str = "Guest";
/// Label shown for a hidden or unknown age.
pub const HIDDEN_AGE_LABEL: &str = "--";

// ═══════════════════════════════════════════
// View types, serialised to the presentation layer
// ═══════════════════════════════════════════

/// Display-ready profile header. Masked while private mode is on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    pub display_name: String,
    pub age_label: String,
    pub sex_label: String,
    pub goals: Vec<String>,
    pub conditions: Vec<String>,
    pub allergies: Vec<String>,
    pub private_mode: bool,
}

impl ProfileView {
    pub(crate) fn masked() -> Self {
        Self {
            display_name: PRIVATE_NAME_LABEL.into(),
            age_label: HIDDEN_AGE_LABEL.into(),
            sex_label: String::new(),
            goals: Vec::new(),
            conditions: Vec::new(),
            allergies: Vec::new(),
            private_mode: true,
        }
    }

    pub(crate) fn from_fields(fields: &ProfileFields) -> Self {
        let display_name = if fields.name.trim().is_empty() {
            GUEST_NAME_LABEL.to_string()
        } else {
            fields.name.clone()
        };
        let age_label = if fields.age > 0 {
            fields.age.to_string()
        } else {
            HIDDEN_AGE_LABEL.to_string()
        };
        Self {
            display_name,
            age_label,
            sex_label: fields.sex.map(|s| s.as_str().to_string()).unwrap_or_default(),
            goals: fields.goals.as_slice().to_vec(),
            conditions: fields.conditions.as_slice().to_vec(),
            allergies: fields.allergies.as_slice().to_vec(),
            private_mode: false,
        }
    }
}

/// A stack entry for the list view, carrying its position in the full stack.
///
/// `index` is what edit/delete gestures pass back to the manager, so it is
/// the stack position rather than the position in the filtered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationCard {
    pub index: usize,
    pub id: MedicationId,
    pub name: String,
    pub dosage: String,
    pub kind: MedicationKind,
    pub status: MedicationStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl MedicationCard {
    pub(crate) fn new(index: usize, entry: &MedicationEntry) -> Self {
        Self {
            index,
            id: entry.id,
            name: entry.name.clone(),
            dosage: entry.dosage.clone(),
            kind: entry.kind,
            status: entry.status,
            start_date: entry.start_date,
            end_date: entry.end_date,
        }
    }
}

/// Stack totals for the list header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationCounts {
    pub active: u32,
    pub inactive: u32,
}
