use pharmaguide_lib::models::{MedicationInput, Sex, TagKind};
use pharmaguide_lib::ProfileError;
use proptest::prelude::*;

use crate::support::{arb_input, arb_valid_input, manager};

#[derive(Debug, Clone)]
enum Edit {
    Name(String),
    Age(i32),
    Sex(Option<Sex>),
    AddTag(TagKind, String),
    RemoveTag(TagKind, String),
}

fn arb_tag_kind() -> impl Strategy<Value = TagKind> {
    prop_oneof![
        Just(TagKind::Goals),
        Just(TagKind::Conditions),
        Just(TagKind::Allergies),
    ]
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        "[A-Za-z ]{0,12}".prop_map(Edit::Name),
        (-50i32..120).prop_map(Edit::Age),
        prop_oneof![
            Just(None),
            Just(Some(Sex::Female)),
            Just(Some(Sex::Male)),
            Just(Some(Sex::Other)),
        ]
        .prop_map(Edit::Sex),
        (arb_tag_kind(), "[A-Za-z ]{0,10}").prop_map(|(k, v)| Edit::AddTag(k, v)),
        (arb_tag_kind(), prop_oneof![Just("Iodine".to_string()), Just("Improve sleep".to_string())])
            .prop_map(|(k, v)| Edit::RemoveTag(k, v)),
    ]
}

fn apply(draft: &mut pharmaguide_lib::profile_state::ProfileDraft, edit: Edit) {
    match edit {
        Edit::Name(name) => draft.set_name(name),
        Edit::Age(age) => draft.set_age(age),
        Edit::Sex(sex) => draft.set_sex(sex),
        Edit::AddTag(kind, value) => {
            draft.add_tag(kind, &value);
        }
        Edit::RemoveTag(kind, value) => {
            draft.remove_tag(kind, &value);
        }
    }
}

fn apply_input(draft: &mut pharmaguide_lib::profile_state::MedicationDraft, input: MedicationInput) {
    draft.set_name(input.name);
    draft.set_dosage(input.dosage);
    draft.set_kind(input.kind);
    draft.set_status(input.status);
    draft.set_start_date(input.start_date);
    draft.set_end_date(input.end_date);
}

proptest! {
    /// Open, mutate, discard: committed state is identical.
    #[test]
    fn prop_profile_discard_isolated(edits in proptest::collection::vec(arb_edit(), 0..12)) {
        let mut mgr = manager(false);
        let before = mgr.snapshot();

        let mut draft = mgr.open_profile_draft().unwrap();
        for edit in edits {
            apply(&mut draft, edit);
        }
        mgr.discard_profile_draft(draft);

        prop_assert_eq!(mgr.snapshot(), before);
        prop_assert_eq!(mgr.open_draft_count(), 0);
    }

    #[test]
    fn prop_medication_discard_isolated(index in 0usize..4, input in arb_input()) {
        let mut mgr = manager(false);
        let before = mgr.snapshot();

        let mut draft = mgr.open_medication_draft(index).unwrap();
        apply_input(&mut draft, input);
        mgr.discard_medication_draft(draft);

        prop_assert_eq!(mgr.snapshot(), before);
    }

    /// A rejected profile commit changes nothing; an accepted one replaces
    /// exactly the profile fields and leaves the stack alone.
    #[test]
    fn prop_profile_commit_atomic(edits in proptest::collection::vec(arb_edit(), 0..12)) {
        let mut mgr = manager(false);
        let before = mgr.snapshot();

        let mut draft = mgr.open_profile_draft().unwrap();
        for edit in edits {
            apply(&mut draft, edit);
        }
        let expected = draft.value().clone();

        match mgr.commit_profile_draft(draft) {
            Ok(profile) => {
                prop_assert!(expected.age >= 0);
                prop_assert_eq!(&profile.fields, &expected);
                let after = mgr.snapshot();
                prop_assert_eq!(after.user.stack, before.user.stack);
                prop_assert_eq!(after.private_mode, before.private_mode);
            }
            Err(rejected) => {
                prop_assert!(expected.age < 0);
                prop_assert_eq!(rejected.error.field(), Some("age"));
                prop_assert_eq!(mgr.snapshot(), before);
            }
        }
    }

    /// Same for a stack entry: failure is a no-op, success rewrites one slot.
    #[test]
    fn prop_medication_commit_atomic(index in 0usize..4, input in arb_input()) {
        let mut mgr = manager(false);
        let before = mgr.snapshot();
        let id = mgr.stack()[index].id;

        let mut draft = mgr.open_medication_draft(index).unwrap();
        apply_input(&mut draft, input.clone());

        match mgr.commit_medication_draft(draft) {
            Ok(entry) => {
                prop_assert_eq!(entry.id, id);
                prop_assert!(input.validate().is_ok());
                let after = mgr.snapshot();
                for (i, (a, b)) in after.user.stack.iter().zip(&before.user.stack).enumerate() {
                    if i != index {
                        prop_assert_eq!(a, b);
                    }
                }
                prop_assert_eq!(&after.user.stack[index].name, &input.name);
                prop_assert_eq!(after.user.name, before.user.name);
                prop_assert_eq!(after.user.allergies, before.user.allergies);
                prop_assert_eq!(after.user.stack.len(), before.user.stack.len());
            }
            Err(rejected) => {
                let is_validation = matches!(rejected.error, ProfileError::Validation { .. });
                prop_assert!(is_validation);
                prop_assert_eq!(mgr.snapshot(), before);
            }
        }
    }

    /// Valid inputs always commit.
    #[test]
    fn prop_valid_medication_commits(index in 0usize..4, input in arb_valid_input()) {
        let mut mgr = manager(false);
        let mut draft = mgr.open_medication_draft(index).unwrap();
        apply_input(&mut draft, input);
        prop_assert!(mgr.commit_medication_draft(draft).is_ok());
    }
}
