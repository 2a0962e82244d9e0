//! Health profile and medication stack state.
//!
//! `ProfileStateManager` owns the committed profile and stack, gates every
//! read and write behind private mode, and hands out drafts so that an
//! in-progress edit never leaks into committed state.
//!
//! Key properties:
//! - While private, reads come back masked and every mutation except
//!   `set_private_mode` fails with `PrivacyLocked`
//! - Turning private mode on discards every open draft
//! - One open draft per target (the profile fields, or one stack entry)
//! - A failed commit leaves committed state untouched and returns the draft

pub mod draft;
pub mod error;
pub mod view;

pub use draft::{Draft, DraftId, DraftTarget, MedicationDraft, ProfileDraft};
pub use error::{ProfileError, Rejected};
pub use view::{MedicationCard, MedicationCounts, ProfileView};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{
    MedicationEntry, MedicationId, MedicationInput, MedicationStatus, Profile, ProfileFields, Sex,
    TagKind,
};
use crate::snapshot::ProfileSnapshot;
use crate::suggestions;

/// Direct allergy edit outside a profile draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllergyAction {
    Add,
    Remove,
}

// ═══════════════════════════════════════════════════════════
// ProfileStateManager
// ═══════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct ProfileStateManager {
    profile: Profile,
    private_mode: bool,
    /// Autosuggest catalogs. Read-only reference data, never masked.
    common_goals: Vec<String>,
    common_conditions: Vec<String>,
    /// Open drafts by target; a draft is open iff its id is recorded here.
    open_drafts: HashMap<DraftTarget, DraftId>,
}

impl ProfileStateManager {
    /// Create a manager from the session's initial snapshot.
    pub fn from_snapshot(snapshot: &ProfileSnapshot) -> Result<Self, ProfileError> {
        let profile = snapshot.to_profile()?;
        Ok(Self {
            profile,
            private_mode: snapshot.private_mode,
            common_goals: snapshot.common_goals.clone(),
            common_conditions: snapshot.common_conditions.clone(),
            open_drafts: HashMap::new(),
        })
    }

    /// Export committed state (drafts are not included).
    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot::from_profile(
            &self.profile,
            self.private_mode,
            &self.common_goals,
            &self.common_conditions,
        )
    }

    // ── Private mode ────────────────────────────────────────

    pub fn is_private(&self) -> bool {
        self.private_mode
    }

    /// Always permitted. Turning private mode on discards all open drafts.
    pub fn set_private_mode(&mut self, enabled: bool) {
        if enabled == self.private_mode {
            return;
        }
        if enabled {
            let discarded = self.open_drafts.len();
            self.open_drafts.clear();
            if discarded > 0 {
                tracing::info!(discarded, "Private mode on, open drafts discarded");
            }
        }
        self.private_mode = enabled;
        tracing::info!(private_mode = enabled, "Private mode changed");
    }

    fn ensure_unlocked(&self) -> Result<(), ProfileError> {
        if self.private_mode {
            Err(ProfileError::PrivacyLocked)
        } else {
            Ok(())
        }
    }

    // ── Read path (masked while private) ────────────────────

    pub fn name(&self) -> Option<&str> {
        self.unmasked().map(|f| f.name.as_str())
    }

    pub fn age(&self) -> Option<i32> {
        self.unmasked().map(|f| f.age)
    }

    pub fn sex(&self) -> Option<Sex> {
        self.unmasked().and_then(|f| f.sex)
    }

    /// Tags of one list, or an empty slice while private.
    pub fn tags(&self, kind: TagKind) -> &[String] {
        self.unmasked()
            .map(|f| f.tags(kind).as_slice())
            .unwrap_or(&[])
    }

    pub fn goals(&self) -> &[String] {
        self.tags(TagKind::Goals)
    }

    pub fn conditions(&self) -> &[String] {
        self.tags(TagKind::Conditions)
    }

    pub fn allergies(&self) -> &[String] {
        self.tags(TagKind::Allergies)
    }

    /// The whole stack, or an empty slice while private.
    pub fn stack(&self) -> &[MedicationEntry] {
        if self.private_mode {
            &[]
        } else {
            &self.profile.stack
        }
    }

    /// Display-ready profile header.
    pub fn view(&self) -> ProfileView {
        match self.unmasked() {
            Some(fields) => ProfileView::from_fields(fields),
            None => ProfileView::masked(),
        }
    }

    pub fn common_goals(&self) -> &[String] {
        &self.common_goals
    }

    pub fn common_conditions(&self) -> &[String] {
        &self.common_conditions
    }

    /// Autosuggest for a draft's goal or condition picker. Allergies have no catalog.
    pub fn suggest_tags(&self, kind: TagKind, query: &str, draft: &ProfileDraft) -> Vec<&str> {
        let catalog = match kind {
            TagKind::Goals => &self.common_goals,
            TagKind::Conditions => &self.common_conditions,
            TagKind::Allergies => return Vec::new(),
        };
        suggestions::suggest(catalog, query, draft.value().tags(kind).as_slice())
    }

    fn unmasked(&self) -> Option<&ProfileFields> {
        (!self.private_mode).then_some(&self.profile.fields)
    }

    // ── Profile drafts ──────────────────────────────────────

    pub fn open_profile_draft(&mut self) -> Result<ProfileDraft, ProfileError> {
        self.ensure_unlocked()?;
        let id = self.claim(DraftTarget::Profile)?;
        Ok(Draft::open(id, DraftTarget::Profile, self.profile.fields.clone()))
    }

    /// Validate and apply a profile draft. The stack is left untouched.
    pub fn commit_profile_draft(
        &mut self,
        draft: ProfileDraft,
    ) -> Result<&Profile, Rejected<ProfileDraft>> {
        if let Err(error) = self.check_commit(&draft) {
            return Err(Rejected::new(error, draft));
        }
        if draft.value().age < 0 {
            let error = ProfileError::validation("age", "must not be negative");
            return Err(Rejected::new(error, draft));
        }

        self.open_drafts.remove(&DraftTarget::Profile);
        let dirty = draft.is_dirty();
        self.profile.fields = draft.into_value();
        tracing::debug!(dirty, "Profile draft committed");
        Ok(&self.profile)
    }

    /// Close a profile draft without effect. No-op if it is already closed.
    pub fn discard_profile_draft(&mut self, draft: ProfileDraft) {
        self.release(&draft);
    }

    /// Add or remove an allergy directly on the committed profile.
    /// Returns whether the list changed.
    ///
    /// This does not touch an open profile draft. Committing that draft
    /// afterwards replaces the allergy list with the draft's copy, which
    /// drops any change made here in the meantime.
    pub fn toggle_allergy(&mut self, action: AllergyAction, value: &str) -> Result<bool, ProfileError> {
        self.ensure_unlocked()?;
        let allergies = &mut self.profile.fields.allergies;
        let changed = match action {
            AllergyAction::Add => allergies.add(value),
            AllergyAction::Remove => allergies.remove(value),
        };
        Ok(changed)
    }

    // ── Medication stack ────────────────────────────────────

    /// Entries with the given status, in stack order. Empty while private.
    pub fn list_medications(&self, filter: MedicationStatus) -> Vec<&MedicationEntry> {
        self.stack()
            .iter()
            .filter(|entry| entry.status == filter)
            .collect()
    }

    /// Same selection as `list_medications`, with stack positions attached.
    pub fn medication_cards(&self, filter: MedicationStatus) -> Vec<MedicationCard> {
        self.stack()
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.status == filter)
            .map(|(index, entry)| MedicationCard::new(index, entry))
            .collect()
    }

    /// Active/inactive totals. Zero while private.
    pub fn medication_counts(&self) -> MedicationCounts {
        self.stack()
            .iter()
            .fold(MedicationCounts::default(), |mut counts, entry| {
                match entry.status {
                    MedicationStatus::Active => counts.active += 1,
                    MedicationStatus::Inactive => counts.inactive += 1,
                }
                counts
            })
    }

    /// Current stack position of an entry.
    pub fn medication_index(&self, id: MedicationId) -> Option<usize> {
        self.profile.stack.iter().position(|entry| entry.id == id)
    }

    pub fn open_medication_draft(&mut self, index: usize) -> Result<MedicationDraft, ProfileError> {
        self.ensure_unlocked()?;
        let entry = self.entry_at(index)?;
        let (target, input) = (DraftTarget::Medication(entry.id), entry.to_input());
        let id = self.claim(target)?;
        Ok(Draft::open(id, target, input))
    }

    /// Validate and apply a medication draft in place, keeping the entry's
    /// position and identity.
    pub fn commit_medication_draft(
        &mut self,
        draft: MedicationDraft,
    ) -> Result<&MedicationEntry, Rejected<MedicationDraft>> {
        if let Err(error) = self.check_commit(&draft) {
            return Err(Rejected::new(error, draft));
        }
        if let Err(error) = draft.value().validate() {
            return Err(Rejected::new(error, draft));
        }
        let Some(med_id) = draft.medication_id() else {
            let error = ProfileError::Conflict {
                target: draft.target(),
                reason: "not a medication draft",
            };
            return Err(Rejected::new(error, draft));
        };
        // Deleting an entry closes its draft, so this only trips on a foreign draft.
        let Some(index) = self.medication_index(med_id) else {
            let error = ProfileError::Conflict {
                target: draft.target(),
                reason: "entry is no longer in the stack",
            };
            return Err(Rejected::new(error, draft));
        };

        self.open_drafts.remove(&draft.target());
        self.profile.stack[index] = MedicationEntry::from_input(med_id, draft.into_value());
        tracing::debug!(index, id = %med_id, "Medication draft committed");
        Ok(&self.profile.stack[index])
    }

    /// Close a medication draft without effect. No-op if it is already closed.
    pub fn discard_medication_draft(&mut self, draft: MedicationDraft) {
        self.release(&draft);
    }

    /// Validate and append a new entry. Returns its index.
    pub fn add_medication(&mut self, input: MedicationInput) -> Result<usize, ProfileError> {
        self.ensure_unlocked()?;
        input.validate()?;
        let id = MedicationId::new();
        self.profile.stack.push(MedicationEntry::from_input(id, input));
        let index = self.profile.stack.len() - 1;
        tracing::debug!(index, id = %id, "Medication added");
        Ok(index)
    }

    /// Remove the entry at `index`; later entries shift down by one.
    /// A draft open on the removed entry is closed.
    pub fn delete_medication(&mut self, index: usize) -> Result<MedicationEntry, ProfileError> {
        self.ensure_unlocked()?;
        self.entry_at(index)?;
        let removed = self.profile.stack.remove(index);
        if self
            .open_drafts
            .remove(&DraftTarget::Medication(removed.id))
            .is_some()
        {
            tracing::debug!(id = %removed.id, "Closed draft of deleted medication");
        }
        tracing::debug!(index, id = %removed.id, "Medication deleted");
        Ok(removed)
    }

    // ── Draft bookkeeping ───────────────────────────────────

    pub fn is_draft_open(&self, target: DraftTarget) -> bool {
        self.open_drafts.contains_key(&target)
    }

    pub fn open_draft_count(&self) -> usize {
        self.open_drafts.len()
    }

    fn entry_at(&self, index: usize) -> Result<&MedicationEntry, ProfileError> {
        let len = self.profile.stack.len();
        self.profile
            .stack
            .get(index)
            .ok_or(ProfileError::IndexOutOfRange { index, len })
    }

    /// Record a new open draft for `target`, failing if one is already open.
    fn claim(&mut self, target: DraftTarget) -> Result<DraftId, ProfileError> {
        if self.open_drafts.contains_key(&target) {
            return Err(ProfileError::Conflict {
                target,
                reason: "a draft is already open",
            });
        }
        let id = DraftId::next();
        self.open_drafts.insert(target, id);
        Ok(id)
    }

    /// Private mode first, then whether this exact draft is still open.
    fn check_commit<T: PartialEq>(&self, draft: &Draft<T>) -> Result<(), ProfileError> {
        self.ensure_unlocked()?;
        if self.open_drafts.get(&draft.target()) != Some(&draft.id()) {
            return Err(ProfileError::Conflict {
                target: draft.target(),
                reason: "draft is no longer open",
            });
        }
        Ok(())
    }

    fn release<T: PartialEq>(&mut self, draft: &Draft<T>) {
        if self.open_drafts.get(&draft.target()) == Some(&draft.id()) {
            self.open_drafts.remove(&draft.target());
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
