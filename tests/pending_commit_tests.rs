use chrono::NaiveDate;
use std::collections::HashMap;
use yardboard::{CommitResult, PendingChangeSet, SkipReason};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn size_counts_distinct_keys_not_gestures() {
    let mut pending = PendingChangeSet::new();
    for day in 1..=5 {
        pending.stage_edit(1, 7, d(2024, 2, day), d(2024, 2, day + 4));
    }
    pending.stage_edit(1, 8, d(2024, 2, 1), d(2024, 2, 3));
    pending.stage_edit(2, 7, d(2024, 2, 1), d(2024, 2, 3));
    assert_eq!(pending.len(), 3);
}

#[test]
fn discard_all_touches_no_persisted_state() {
    let mut store: HashMap<(i32, i32), (NaiveDate, NaiveDate)> = HashMap::new();
    store.insert((1, 7), (d(2024, 2, 1), d(2024, 2, 5)));
    let before = store.clone();

    let mut pending = PendingChangeSet::new();
    pending.stage_edit(1, 7, d(2024, 3, 1), d(2024, 3, 5));
    pending.discard_all();

    assert!(pending.is_empty());
    assert_eq!(store, before);
}

#[test]
fn commit_applies_every_entry_and_clears_the_set() {
    let mut store: HashMap<(i32, i32), (NaiveDate, NaiveDate)> = HashMap::new();
    store.insert((1, 7), (d(2024, 2, 1), d(2024, 2, 5)));
    store.insert((2, 3), (d(2024, 2, 10), d(2024, 2, 12)));

    let mut pending = PendingChangeSet::new();
    pending.stage_edit(1, 7, d(2024, 2, 6), d(2024, 2, 10));
    pending.stage_edit(2, 3, d(2024, 2, 1), d(2024, 2, 3));

    let outcomes = pending.commit_all(|unit_id, stage_id, new_start, new_end| {
        store.insert((unit_id, stage_id), (new_start, new_end));
        Ok(())
    });

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes
        .iter()
        .all(|outcome| outcome.result == CommitResult::Committed));
    assert!(pending.is_empty());
    assert_eq!(store[&(1, 7)], (d(2024, 2, 6), d(2024, 2, 10)));
    assert_eq!(store[&(2, 3)], (d(2024, 2, 1), d(2024, 2, 3)));
}

#[test]
fn a_skip_does_not_abort_the_remaining_entries() {
    let mut applied: Vec<(i32, i32)> = Vec::new();
    let mut pending = PendingChangeSet::new();
    pending.stage_edit(1, 7, d(2024, 2, 6), d(2024, 2, 10));
    pending.stage_edit(99, 1, d(2024, 2, 1), d(2024, 2, 3));
    pending.stage_edit(2, 3, d(2024, 2, 1), d(2024, 2, 3));

    let outcomes = pending.commit_all(|unit_id, stage_id, _, _| {
        if unit_id == 99 {
            return Err(SkipReason::UnitNotFound);
        }
        applied.push((unit_id, stage_id));
        Ok(())
    });

    let skipped: Vec<_> = outcomes
        .iter()
        .filter(|outcome| outcome.result == CommitResult::Skipped(SkipReason::UnitNotFound))
        .collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].unit_id, 99);
    assert_eq!(applied, vec![(1, 7), (2, 3)]);
    assert!(pending.is_empty());
}

#[test]
fn discard_after_commit_cannot_undo_the_writes() {
    let mut store: HashMap<(i32, i32), (NaiveDate, NaiveDate)> = HashMap::new();

    let mut pending = PendingChangeSet::new();
    pending.stage_edit(1, 7, d(2024, 2, 6), d(2024, 2, 10));
    pending.commit_all(|unit_id, stage_id, new_start, new_end| {
        store.insert((unit_id, stage_id), (new_start, new_end));
        Ok(())
    });
    pending.discard_all();

    assert_eq!(store[&(1, 7)], (d(2024, 2, 6), d(2024, 2, 10)));
}

#[test]
fn committing_an_empty_set_reports_nothing() {
    let mut pending = PendingChangeSet::new();
    let outcomes = pending.commit_all(|_, _, _, _| Ok(()));
    assert!(outcomes.is_empty());
}

#[test]
fn discard_of_a_single_entry_leaves_the_rest_staged() {
    let mut pending = PendingChangeSet::new();
    pending.stage_edit(1, 7, d(2024, 2, 6), d(2024, 2, 10));
    pending.stage_edit(1, 8, d(2024, 2, 1), d(2024, 2, 2));

    assert!(pending.discard(1, 7));
    assert!(!pending.discard(1, 7));
    assert_eq!(pending.len(), 1);
    assert!(pending.get(1, 8).is_some());
}
