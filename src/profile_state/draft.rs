//! Staged edits for the profile fields and for single stack entries.
//!
//! A draft is a buffered copy handed out by the manager. It is not `Clone`:
//! the only ways to end its life are `commit_*` and `discard_*` on the
//! manager that opened it, both of which take it by value.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;

use super::error::ProfileError;
use crate::models::{
    MedicationId, MedicationInput, MedicationKind, MedicationStatus, ProfileFields, Sex, TagKind,
};

/// What a draft edits. At most one draft per target is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftTarget {
    Profile,
    Medication(MedicationId),
}

impl fmt::Display for DraftTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profile => write!(f, "profile"),
            Self::Medication(id) => write!(f, "medication {id}"),
        }
    }
}

/// Handle the manager uses to recognise the draft it handed out.
///
/// Ids are unique across every manager in the process, so a draft is only
/// ever accepted by the manager that opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DraftId(u64);

static NEXT_DRAFT_ID: AtomicU64 = AtomicU64::new(1);

impl DraftId {
    pub(crate) fn next() -> Self {
        Self(NEXT_DRAFT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
pub struct Draft<T> {
    id: DraftId,
    target: DraftTarget,
    buffer: T,
    dirty: bool,
}

pub type ProfileDraft = Draft<ProfileFields>;
pub type MedicationDraft = Draft<MedicationInput>;

impl<T: PartialEq> Draft<T> {
    pub(crate) fn open(id: DraftId, target: DraftTarget, buffer: T) -> Self {
        Self {
            id,
            target,
            buffer,
            dirty: false,
        }
    }

    pub fn id(&self) -> DraftId {
        self.id
    }

    pub fn target(&self) -> DraftTarget {
        self.target
    }

    /// Whether any setter changed the buffer since the draft was opened.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The buffered values.
    pub fn value(&self) -> &T {
        &self.buffer
    }

    pub(crate) fn into_value(self) -> T {
        self.buffer
    }

    /// Apply `f` to the buffer, marking the draft dirty if it changed anything.
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R
    where
        T: Clone,
    {
        let before = self.buffer.clone();
        let out = f(&mut self.buffer);
        if self.buffer != before {
            self.dirty = true;
        }
        out
    }
}

// ── Profile draft setters ───────────────────────────────────

impl Draft<ProfileFields> {
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.update(|fields| fields.name = name);
    }

    /// Store the age as entered. Negative values are caught at commit.
    pub fn set_age(&mut self, age: i32) {
        self.update(|fields| fields.age = age);
    }

    /// Parse the age edit field. Unparsable text leaves the draft unchanged.
    pub fn set_age_text(&mut self, text: &str) -> Result<(), ProfileError> {
        let age = text
            .trim()
            .parse::<i32>()
            .map_err(|_| ProfileError::validation("age", format!("'{text}' is not a whole number")))?;
        self.set_age(age);
        Ok(())
    }

    pub fn set_sex(&mut self, sex: Option<Sex>) {
        self.update(|fields| fields.sex = sex);
    }

    /// Add a tag. No-op for blank or already present values.
    pub fn add_tag(&mut self, kind: TagKind, value: &str) -> bool {
        self.update(|fields| fields.tags_mut(kind).add(value))
    }

    /// Remove a tag. Idempotent.
    pub fn remove_tag(&mut self, kind: TagKind, value: &str) -> bool {
        self.update(|fields| fields.tags_mut(kind).remove(value))
    }

    /// Chip tap: remove when present, add otherwise.
    pub fn toggle_tag(&mut self, kind: TagKind, value: &str) -> bool {
        self.update(|fields| fields.tags_mut(kind).toggle(value))
    }
}

// ── Medication draft setters ────────────────────────────────

impl Draft<MedicationInput> {
    /// Identity of the stack entry this draft edits.
    pub fn medication_id(&self) -> Option<MedicationId> {
        match self.target {
            DraftTarget::Medication(id) => Some(id),
            DraftTarget::Profile => None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.update(|input| input.name = name);
    }

    pub fn set_dosage(&mut self, dosage: impl Into<String>) {
        let dosage = dosage.into();
        self.update(|input| input.dosage = dosage);
    }

    pub fn set_kind(&mut self, kind: MedicationKind) {
        self.update(|input| input.kind = kind);
    }

    pub fn set_status(&mut self, status: MedicationStatus) {
        self.update(|input| input.status = status);
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.update(|input| input.start_date = date);
    }

    pub fn set_end_date(&mut self, date: Option<NaiveDate>) {
        self.update(|input| input.end_date = date);
    }
}
