use pharmaguide_lib::models::MedicationStatus;
use pharmaguide_lib::ProfileError;
use proptest::prelude::*;

use crate::support::{arb_valid_input, manager_with_stack};

fn arb_stack_and_index() -> impl Strategy<Value = (Vec<pharmaguide_lib::models::MedicationInput>, usize)> {
    proptest::collection::vec(arb_valid_input(), 1..10).prop_flat_map(|stack| {
        let len = stack.len();
        (Just(stack), 0..len)
    })
}

proptest! {
    /// Entries before the deleted index keep their positions; later ones
    /// move down by exactly one.
    #[test]
    fn prop_delete_shifts_only_later_entries((inputs, index) in arb_stack_and_index()) {
        let mut mgr = manager_with_stack(&inputs);
        let before = mgr.stack().to_vec();

        let removed = mgr.delete_medication(index).unwrap();
        prop_assert_eq!(&removed, &before[index]);

        let after = mgr.stack();
        prop_assert_eq!(after.len(), before.len() - 1);
        prop_assert_eq!(&after[..index], &before[..index]);
        prop_assert_eq!(&after[index..], &before[index + 1..]);
    }

    /// Out-of-range deletes fail and leave the stack alone.
    #[test]
    fn prop_delete_out_of_range(inputs in proptest::collection::vec(arb_valid_input(), 0..6), extra in 0usize..4) {
        let mut mgr = manager_with_stack(&inputs);
        let len = inputs.len();
        let before = mgr.snapshot();

        prop_assert_eq!(
            mgr.delete_medication(len + extra),
            Err(ProfileError::IndexOutOfRange { index: len + extra, len })
        );
        prop_assert_eq!(mgr.snapshot(), before);
    }

    /// Adds land at the end and the filters partition the stack.
    #[test]
    fn prop_add_appends_and_filters_partition(
        inputs in proptest::collection::vec(arb_valid_input(), 0..6),
        extra in arb_valid_input(),
    ) {
        let mut mgr = manager_with_stack(&inputs);
        let index = mgr.add_medication(extra.clone()).unwrap();
        prop_assert_eq!(index, inputs.len());
        prop_assert_eq!(&mgr.stack()[index].name, &extra.name);

        let active = mgr.list_medications(MedicationStatus::Active).len();
        let inactive = mgr.list_medications(MedicationStatus::Inactive).len();
        prop_assert_eq!(active + inactive, mgr.stack().len());

        let counts = mgr.medication_counts();
        prop_assert_eq!((counts.active as usize, counts.inactive as usize), (active, inactive));
    }

    /// A draft keeps editing the same entry after earlier entries are deleted.
    #[test]
    fn prop_draft_follows_entry_across_deletes((inputs, index) in arb_stack_and_index(), dosage in "[0-9]{1,3}mg") {
        let mut mgr = manager_with_stack(&inputs);
        let id = mgr.stack()[index].id;
        let mut draft = mgr.open_medication_draft(index).unwrap();
        draft.set_dosage(dosage.clone());

        for _ in 0..index {
            mgr.delete_medication(0).unwrap();
        }

        let entry = mgr.commit_medication_draft(draft).unwrap();
        prop_assert_eq!(entry.id, id);
        prop_assert_eq!(&entry.dosage, &dosage);
        prop_assert_eq!(mgr.medication_index(id), Some(0));
    }
}
