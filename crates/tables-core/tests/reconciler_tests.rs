use std::sync::Arc;
use tables_core::{Applied, DisplayMode, MutationEvent, RowId};
use tables_test_utils::{recording_reconciler, store_with_values};

#[test]
fn test_seed_sort_orders_ids() {
    let mut store = store_with_values(&[3, 1, 4, 1, 5]);
    store.sort_by_value_desc();

    assert_eq!(
        store.ids(),
        vec![RowId(4), RowId(2), RowId(0), RowId(1), RowId(3)]
    );
}

#[test]
fn test_immediate_event_repaints_synchronously() {
    let mut r = recording_reconciler(&[3, 1, 4, 1, 5], DisplayMode::Immediate);
    let before = Arc::clone(r.store().get(RowId(2)).unwrap());

    let outcome = r.apply(MutationEvent::new(2, 99, "X Y")).unwrap();

    // repaint happened inside apply(), before it returned
    assert_eq!(outcome, Applied::Repainted);
    assert_eq!(r.painter().count(), 1);

    let after = r.store().get(RowId(2)).unwrap();
    assert_eq!(after.value, 99);
    assert_eq!(after.name, "X Y");
    assert!(!Arc::ptr_eq(&before, after));

    // untouched rows keep their identity in the painted frame
    let frame = r.painter().last().unwrap();
    let untouched = frame.rows.iter().filter(|row| row.id != RowId(2));
    for row in untouched {
        assert!(Arc::ptr_eq(row, r.store().get(row.id).unwrap()));
    }
}

#[test]
fn test_batched_events_coalesce_into_one_repaint() {
    let mut r = recording_reconciler(&[0; 10], DisplayMode::BatchedSorted);

    for id in 0..10i64 {
        let outcome = r.apply(MutationEvent::new(id, id * 10, format!("NAME {id}"))).unwrap();
        assert_eq!(outcome, Applied::Deferred);
    }
    assert_eq!(r.painter().count(), 0);

    assert!(r.refresh());

    assert_eq!(r.painter().count(), 1);
    let frame = r.painter().last().unwrap();
    assert_eq!(frame.values(), vec![90, 80, 70, 60, 50, 40, 30, 20, 10, 0]);
    assert_eq!(frame.rows[0].name, "NAME 9");
    assert_eq!(r.stats().applied, 10);
}

#[test]
fn test_refresh_repaints_even_without_events() {
    let mut r = recording_reconciler(&[1, 2], DisplayMode::BatchedSorted);

    assert!(r.refresh());
    assert!(r.refresh());

    assert_eq!(r.painter().count(), 2);
}

#[test]
fn test_out_of_range_event_discarded() {
    let mut r = recording_reconciler(&[3, 1, 4, 1, 5], DisplayMode::Immediate);
    let before: Vec<_> = r.store().rows().to_vec();

    let err = r.apply(MutationEvent::new(999, 1, "A B")).unwrap_err();

    assert!(err.is_out_of_range());
    assert_eq!(r.store().len(), 5);
    assert_eq!(r.painter().count(), 0);
    assert!(r
        .store()
        .rows()
        .iter()
        .zip(&before)
        .all(|(a, b)| Arc::ptr_eq(a, b)));
}

#[test]
fn test_payload_path_matches_decoded_path() {
    let mut r = recording_reconciler(&[1, 2, 3], DisplayMode::Immediate);

    r.apply_payload(r#"{"id": 0, "value": 50, "name": "MARY SMITH"}"#).unwrap();
    assert!(r.apply_payload(r#"{"id": 3, "value": 50, "name": "MARY SMITH"}"#).is_err());
    assert!(r.apply_payload("init").is_err());

    let stats = r.stats();
    assert_eq!((stats.applied, stats.rejected, stats.malformed), (1, 1, 1));
    assert_eq!(r.store().get(RowId(0)).unwrap().name, "MARY SMITH");
}
