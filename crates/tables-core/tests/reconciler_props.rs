use proptest::prelude::*;
use std::sync::Arc;
use tables_core::{DisplayMode, MutationEvent, RowId};
use tables_test_utils::{recording_reconciler, store_with_values};

fn mode() -> impl Strategy<Value = DisplayMode> {
    prop_oneof![Just(DisplayMode::Immediate), Just(DisplayMode::BatchedSorted)]
}

proptest! {
    #[test]
    fn prop_valid_event_replaces_row(
        values in prop::collection::vec(-50i64..50, 1..40),
        pick in any::<prop::sample::Index>(),
        value in any::<i64>(),
        name in "[A-Z]{1,8} [A-Z]{1,8}",
        mode in mode(),
    ) {
        let mut r = recording_reconciler(&values, mode);
        let id = pick.index(values.len());
        let row_id = RowId(u32::try_from(id).unwrap());
        let before = Arc::clone(r.store().get(row_id).unwrap());

        r.apply(MutationEvent::new(i64::try_from(id).unwrap(), value, name.clone())).unwrap();

        let after = r.store().get(row_id).unwrap();
        prop_assert_eq!(after.id, row_id);
        prop_assert_eq!(after.value, value);
        prop_assert_eq!(&after.name, &name);
        prop_assert!(!Arc::ptr_eq(&before, after));
    }

    #[test]
    fn prop_invalid_event_is_a_no_op(
        values in prop::collection::vec(any::<i64>(), 1..40),
        offset in 0i64..10_000,
        negative in any::<bool>(),
        mode in mode(),
    ) {
        let mut r = recording_reconciler(&values, mode);
        let len = i64::try_from(values.len()).unwrap();
        let id = if negative { -1 - offset } else { len + offset };
        let before: Vec<_> = r.store().rows().to_vec();

        prop_assert!(r.apply(MutationEvent::new(id, 1, "A B")).is_err());

        prop_assert_eq!(r.store().len(), values.len());
        prop_assert_eq!(r.painter().count(), 0);
        prop_assert!(r.store().rows().iter().zip(&before).all(|(a, b)| Arc::ptr_eq(a, b)));
    }

    #[test]
    fn prop_apply_is_idempotent(
        values in prop::collection::vec(-50i64..50, 1..40),
        pick in any::<prop::sample::Index>(),
        value in -50i64..50,
    ) {
        let id = i64::try_from(pick.index(values.len())).unwrap();
        let event = MutationEvent::new(id, value, "SAME NAME");

        let mut once = recording_reconciler(&values, DisplayMode::BatchedSorted);
        once.apply(event.clone()).unwrap();
        once.refresh();

        let mut twice = recording_reconciler(&values, DisplayMode::BatchedSorted);
        twice.apply(event.clone()).unwrap();
        twice.apply(event).unwrap();
        twice.refresh();

        prop_assert_eq!(once.painter().last().unwrap().values(), twice.painter().last().unwrap().values());
        prop_assert_eq!(once.store().ids(), twice.store().ids());
    }

    #[test]
    fn prop_sort_is_stable_and_repeatable(
        values in prop::collection::vec(0i64..5, 1..60),
    ) {
        let mut store = store_with_values(&values);
        store.sort_by_value_desc();
        let first = store.ids();
        store.sort_by_value_desc();
        prop_assert_eq!(&store.ids(), &first);

        // descending by value, ties ascending by original id
        for pair in store.rows().windows(2) {
            prop_assert!(pair[0].value >= pair[1].value);
            if pair[0].value == pair[1].value {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }
}
