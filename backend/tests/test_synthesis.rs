//! Tests for record synthesis
//!
//! Every anomaly kind is checked against the records it produced.

use chrono::Duration;
use std::collections::BTreeMap;

use txn_fixture_core::planner::{AnomalyPlan, PairRole, PlanEntry};
use txn_fixture_core::reference::{
    category_range, is_domestic, is_international, merchant_category, ALL_LOCATIONS,
    ANOMALOUS_RANGE, MAX_ACCOUNT_ID,
};
use txn_fixture_core::{CoverageWindow, RecordSynthesizer, RngManager, TransactionRecord};

fn synthesize(num_rows: usize, fraction: f64, seed: u64) -> (AnomalyPlan, Vec<TransactionRecord>) {
    let window = CoverageWindow::default();
    let mut rng = RngManager::new(seed);
    let mut plan = AnomalyPlan::build(num_rows, fraction, &window, &mut rng);
    let records = RecordSynthesizer::new(window).synthesize(&mut plan, &mut rng);
    (plan, records)
}

#[test]
fn test_high_amount_rows_in_anomalous_range() {
    let (plan, records) = synthesize(500, 0.3, 42);

    let mut seen = 0;
    for (row, entry) in plan.iter() {
        if matches!(entry, PlanEntry::HighAmount) {
            let amount = records[row].amount();
            assert!(amount >= 500_000 && amount <= 5_000_000, "row {}: {}", row, amount);
            assert!(ALL_LOCATIONS.contains(&records[row].location()));
            seen += 1;
        }
    }
    assert_eq!(seen, plan.summary().high_amount);
}

#[test]
fn test_location_pairs_cross_border_within_five_minutes() {
    let (plan, records) = synthesize(500, 0.3, 7);

    for (row, entry) in plan.iter() {
        if let PlanEntry::LocationPair(slot) = entry {
            if slot.role == PairRole::Second {
                let first = &records[slot.partner];
                let second = &records[row];

                let gap = second.timestamp() - first.timestamp();
                assert!(
                    gap >= Duration::minutes(1) && gap <= Duration::minutes(5),
                    "pair {} gap {:?}",
                    slot.pair_id,
                    gap
                );
                assert!(is_domestic(first.location()), "{}", first.location());
                assert!(is_international(second.location()), "{}", second.location());
            }
        }
    }
}

#[test]
fn test_first_pair_timestamp_written_back_into_plan() {
    let (plan, records) = synthesize(500, 0.3, 8);

    for (row, entry) in plan.iter() {
        if let PlanEntry::LocationPair(slot) = entry {
            if slot.role == PairRole::First {
                assert_eq!(slot.first_timestamp, Some(records[row].timestamp()));
            }
        }
    }
}

#[test]
fn test_small_groups_share_merchant_location_amount() {
    let (plan, records) = synthesize(500, 0.3, 13);
    let mut groups: BTreeMap<usize, Vec<&TransactionRecord>> = BTreeMap::new();

    for (row, entry) in plan.iter() {
        if let PlanEntry::RepeatedSmall(slot) = entry {
            groups.entry(slot.group_id).or_default().push(&records[row]);
            assert_eq!(records[row].timestamp(), txn_fixture_core::synthesis::group_member_time(slot));
        }
    }

    assert_eq!(groups.len(), plan.summary().small_groups);
    for (group_id, members) in groups {
        assert_eq!(members.len(), 3);
        let head = members[0];
        for member in &members {
            assert_eq!(member.merchant(), head.merchant(), "group {}", group_id);
            assert_eq!(member.location(), head.location(), "group {}", group_id);
            assert_eq!(member.amount(), head.amount(), "group {}", group_id);
            assert_eq!(
                member.category(),
                merchant_category(head.merchant()).unwrap_or("Shopping")
            );
            assert!(member.amount() >= 99 && member.amount() <= 500);
        }

        for pair in members.windows(2) {
            assert!(pair[0].timestamp() <= pair[1].timestamp(), "group {} out of order", group_id);
        }
        let span = members[2].timestamp() - members[0].timestamp();
        assert!(span <= Duration::hours(1), "group {} spans {:?}", group_id, span);
    }
}

#[test]
fn test_normal_and_pair_amounts_within_category_range() {
    let (plan, records) = synthesize(2000, 0.1, 21);

    for (row, record) in records.iter().enumerate() {
        match plan.entry(row) {
            None | Some(PlanEntry::LocationPair(_)) => {
                let range = category_range(record.category());
                assert!(
                    range.contains(record.amount()),
                    "row {} {} amount {} outside {:?}",
                    row,
                    record.category(),
                    record.amount(),
                    range
                );
                assert!(record.amount() < ANOMALOUS_RANGE.min);
            }
            _ => {}
        }
    }
}

#[test]
fn test_normal_rows_use_mapped_category_and_known_location() {
    let (plan, records) = synthesize(500, 0.05, 3);

    for (row, record) in records.iter().enumerate() {
        if plan.entry(row).is_none() {
            assert_eq!(merchant_category(record.merchant()), Some(record.category()));
            assert!(ALL_LOCATIONS.contains(&record.location()));
        }
    }
}

#[test]
fn test_normal_rows_lean_domestic() {
    // 0.7 + 0.3 * 8/20 = 0.82 expected domestic share
    let (plan, records) = synthesize(5000, 0.0, 55);
    assert_eq!(plan.summary().planned_rows, 0);

    let domestic = records.iter().filter(|r| is_domestic(r.location())).count();
    let share = domestic as f64 / records.len() as f64;
    assert!(share > 0.77 && share < 0.87, "domestic share {}", share);
}

#[test]
fn test_accounts_and_timestamps_bounded() {
    let window = CoverageWindow::default();
    let (_, records) = synthesize(1000, 0.05, 77);

    for record in &records {
        let account: i64 = record.account_id()[3..].parse().unwrap();
        assert!(account >= 1 && account <= MAX_ACCOUNT_ID);
        assert_eq!(record.account_id().len(), 7);
    }

    // pairs can spill up to 5 minutes past the window, groups up to 40
    let slack = Duration::hours(1);
    for record in &records {
        assert!(record.timestamp() >= window.start());
        assert!(record.timestamp() <= window.end() + slack);
    }
}

#[test]
fn test_zero_rows_synthesizes_nothing() {
    let (_, records) = synthesize(0, 0.05, 1);
    assert!(records.is_empty());
}
