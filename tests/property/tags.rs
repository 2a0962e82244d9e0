use pharmaguide_lib::models::{TagKind, TagList};
use pharmaguide_lib::AllergyAction;
use proptest::prelude::*;

use crate::support::manager;

fn arb_kind() -> impl Strategy<Value = TagKind> {
    prop_oneof![
        Just(TagKind::Goals),
        Just(TagKind::Conditions),
        Just(TagKind::Allergies),
    ]
}

proptest! {
    /// add(v) twice yields the same list as add(v) once.
    #[test]
    fn prop_add_is_idempotent(
        seed in proptest::collection::vec("[A-Za-z ]{0,8}", 0..6),
        value in "[A-Za-z ]{0,8}",
    ) {
        let (mut once, _) = TagList::sanitized(&seed);
        once.add(&value);
        let mut twice = once.clone();
        twice.add(&value);
        prop_assert_eq!(once, twice);
    }

    /// Whitespace-only values never enter any list.
    #[test]
    fn prop_blank_add_is_noop(kind in arb_kind(), blank in "[ \t]{0,6}") {
        let mut mgr = manager(false);
        let mut draft = mgr.open_profile_draft().unwrap();
        let before = draft.value().clone();

        prop_assert!(!draft.add_tag(kind, &blank));
        prop_assert_eq!(draft.value(), &before);
        prop_assert!(!draft.is_dirty());

        let allergies = mgr.allergies().to_vec();
        prop_assert!(!mgr.toggle_allergy(AllergyAction::Add, &blank).unwrap());
        prop_assert_eq!(mgr.allergies(), allergies.as_slice());
    }

    /// Lists never hold duplicates or blank entries, whatever is added.
    #[test]
    fn prop_lists_stay_clean(values in proptest::collection::vec("[ab ]{0,3}", 0..20)) {
        let mut mgr = manager(false);
        for value in &values {
            mgr.toggle_allergy(AllergyAction::Add, value).unwrap();
        }
        let allergies = mgr.allergies();
        for (i, a) in allergies.iter().enumerate() {
            prop_assert!(!a.trim().is_empty());
            prop_assert!(!allergies[i + 1..].contains(a));
        }
    }
}
