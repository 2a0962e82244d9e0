//! Initial-state boundary: the profile snapshot and where it comes from.
//!
//! A `SnapshotProvider` supplies the starting profile, the stack and the
//! autosuggest catalogs, and takes the committed state back for storage.
//! The JSON shape follows the app's seed dataset (`user.stack[].type`,
//! `start`, `end`, `common_goals`).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::models::{
    MedicationEntry, MedicationId, MedicationInput, MedicationKind, MedicationStatus, Profile,
    ProfileFields, Sex, TagList,
};
use crate::profile_state::ProfileError;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid snapshot: {0}")]
    Invalid(#[from] ProfileError),
}

// ═══════════════════════════════════════════
// Snapshot records
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub user: UserRecord,
    #[serde(default = "default_private_mode")]
    pub private_mode: bool,
    #[serde(default)]
    pub common_goals: Vec<String>,
    #[serde(default)]
    pub common_conditions: Vec<String>,
}

fn default_private_mode() -> bool {
    config::DEFAULT_PRIVATE_MODE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub sex: Option<Sex>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub stack: Vec<StackRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MedicationId>,
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(rename = "type")]
    pub kind: MedicationKind,
    pub status: MedicationStatus,
    #[serde(default, rename = "start", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, rename = "end", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl StackRecord {
    fn into_entry(self) -> Result<MedicationEntry, ProfileError> {
        let id = self.id.unwrap_or_default();
        let input = MedicationInput {
            name: self.name,
            dosage: self.dosage,
            kind: self.kind,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
        };
        input.validate()?;
        Ok(MedicationEntry::from_input(id, input))
    }

    fn from_entry(entry: &MedicationEntry) -> Self {
        Self {
            id: Some(entry.id),
            name: entry.name.clone(),
            dosage: entry.dosage.clone(),
            kind: entry.kind,
            status: entry.status,
            start_date: entry.start_date,
            end_date: entry.end_date,
        }
    }
}

impl ProfileSnapshot {
    /// Validate and convert into a live profile.
    ///
    /// Blank and repeated tags are dropped. A negative age or an invalid
    /// stack entry rejects the whole snapshot.
    pub fn to_profile(&self) -> Result<Profile, ProfileError> {
        let user = &self.user;
        if user.age < 0 {
            return Err(ProfileError::validation("age", "must not be negative"));
        }

        let mut dropped = 0;
        let mut tags = |raw: &[String]| {
            let (list, n) = TagList::sanitized(raw);
            dropped += n;
            list
        };
        let goals = tags(&user.goals);
        let conditions = tags(&user.conditions);
        let allergies = tags(&user.allergies);
        if dropped > 0 {
            tracing::warn!(dropped, "Dropped blank or duplicate tags from snapshot");
        }

        let stack = user
            .stack
            .iter()
            .cloned()
            .map(StackRecord::into_entry)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Profile {
            fields: ProfileFields {
                name: user.name.clone(),
                age: user.age,
                sex: user.sex,
                goals,
                conditions,
                allergies,
            },
            stack,
        })
    }

    /// Snapshot of committed state, ready for storage.
    pub fn from_profile(
        profile: &Profile,
        private_mode: bool,
        common_goals: &[String],
        common_conditions: &[String],
    ) -> Self {
        let fields = &profile.fields;
        Self {
            user: UserRecord {
                name: fields.name.clone(),
                age: fields.age,
                sex: fields.sex,
                goals: fields.goals.as_slice().to_vec(),
                conditions: fields.conditions.as_slice().to_vec(),
                allergies: fields.allergies.as_slice().to_vec(),
                stack: profile.stack.iter().map(StackRecord::from_entry).collect(),
            },
            private_mode,
            common_goals: common_goals.to_vec(),
            common_conditions: common_conditions.to_vec(),
        }
    }
}

// ═══════════════════════════════════════════
// Providers
// ═══════════════════════════════════════════

/// Source of the starting profile and sink for committed state.
pub trait SnapshotProvider {
    fn load(&self) -> Result<ProfileSnapshot, SnapshotError>;
    fn store(&self, snapshot: &ProfileSnapshot) -> Result<(), SnapshotError>;
}

/// Snapshot kept as a JSON file on the device.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/PharmaGuide/profile.json`.
    pub fn default_location() -> Self {
        Self::new(config::snapshot_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotProvider for JsonFileSnapshotStore {
    fn load(&self) -> Result<ProfileSnapshot, SnapshotError> {
        let bytes = fs::read(&self.path)?;
        let snapshot: ProfileSnapshot = serde_json::from_slice(&bytes)?;
        tracing::info!(
            path = %self.path.display(),
            entries = snapshot.user.stack.len(),
            "Loaded profile snapshot"
        );
        Ok(snapshot)
    }

    /// Write to a sibling temp file, then rename over the target.
    fn store(&self, snapshot: &ProfileSnapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(snapshot)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;
        tracing::info!(path = %self.path.display(), "Stored profile snapshot");
        Ok(())
    }
}

// ═══════════════════════════════════════════
// Demo seed
// ═══════════════════════════════════════════

/// The built-in demo profile, in snapshot JSON form.
pub const DEMO_SNAPSHOT_JSON: &str = r#"{
  "user": {
    "name": "Sarah Chen",
    "age": 45,
    "sex": "Female",
    "goals": ["Manage diabetes", "Boost immunity", "Improve sleep"],
    "conditions": ["Type 2 Diabetes", "Iodine allergy"],
    "allergies": ["Iodine"],
    "stack": [
      { "name": "Metformin", "dosage": "500mg twice daily", "start": "2025-06-03", "type": "Prescription", "status": "Active" },
      { "name": "Fish Oil", "dosage": "1000mg daily", "start": "2025-06-03", "type": "Supplement", "status": "Active" },
      { "name": "Multivitamin", "dosage": "1 tablet daily (4000 IU Vitamin D)", "start": "2025-06-03", "type": "Supplement", "status": "Active" },
      { "name": "Ibuprofen", "dosage": "200mg as needed", "start": "2024-12-01", "end": "2024-12-31", "type": "Prescription", "status": "Inactive" }
    ]
  },
  "common_goals": ["Manage diabetes", "Boost immunity", "Fitness", "Heart health"],
  "common_conditions": ["Type 2 Diabetes", "Hypertension", "Asthma", "High cholesterol"]
}"#;

/// Provider serving the built-in demo profile. Stores are discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSnapshotProvider;

impl SnapshotProvider for DemoSnapshotProvider {
    fn load(&self) -> Result<ProfileSnapshot, SnapshotError> {
        Ok(serde_json::from_str(DEMO_SNAPSHOT_JSON)?)
    }

    fn store(&self, _snapshot: &ProfileSnapshot) -> Result<(), SnapshotError> {
        Ok(())
    }
}
