use serde::{Deserialize, Serialize};

use super::enums::Sex;
use super::medication::MedicationEntry;
use super::tags::TagList;

/// Which tag list of the profile an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Goals,
    Conditions,
    Allergies,
}

impl TagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goals => "goals",
            Self::Conditions => "conditions",
            Self::Allergies => "allergies",
        }
    }
}

/// The editable identity and health fields of a profile.
///
/// This is exactly what a profile draft covers: committing a draft
/// replaces these fields and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub name: String,
    /// Years. Committed profiles always hold `age >= 0`.
    pub age: i32,
    pub sex: Option<Sex>,
    pub goals: TagList,
    pub conditions: TagList,
    pub allergies: TagList,
}

impl ProfileFields {
    pub fn tags(&self, kind: TagKind) -> &TagList {
        match kind {
            TagKind::Goals => &self.goals,
            TagKind::Conditions => &self.conditions,
            TagKind::Allergies => &self.allergies,
        }
    }

    pub fn tags_mut(&mut self, kind: TagKind) -> &mut TagList {
        match kind {
            TagKind::Goals => &mut self.goals,
            TagKind::Conditions => &mut self.conditions,
            TagKind::Allergies => &mut self.allergies,
        }
    }
}

/// The user's health profile together with their medication stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(flatten)]
    pub fields: ProfileFields,
    pub stack: Vec<MedicationEntry>,
}
