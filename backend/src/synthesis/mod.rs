//! Record synthesis
//!
//! Walks rows `0..N` in order and emits exactly one [`TransactionRecord`]
//! per row, dispatching on the row's [`PlanEntry`]:
//!
//! - no entry: a normal transaction
//! - `HighAmount`: amount from the anomalous range, everything else random
//! - `LocationPair`: domestic first half, international second half
//!   1–5 minutes later
//! - `RepeatedSmall`: the group's shared merchant, location and amount at
//!   `base_time + ordinal * step`
//!
//! The only state carried between rows is the first-half timestamp of each
//! pair, written into the plan so the second half can read it.

use chrono::{Duration, NaiveDateTime};
use tracing::warn;

use crate::amounts::{anomalous_amount, normal_amount};
use crate::core::time::CoverageWindow;
use crate::models::TransactionRecord;
use crate::planner::{AnomalyPlan, GroupSlot, PairRole, PairSlot, PlanEntry};
use crate::reference::{
    merchant_category, ALL_LOCATIONS, CATEGORIES, DEFAULT_SMALL_CATEGORY, DOMESTIC_LOCATIONS,
    INTERNATIONAL_LOCATIONS, MAX_ACCOUNT_ID, MERCHANTS,
};
use crate::rng::RngManager;

/// Probability a normal row samples the domestic list directly
///
/// The remaining rows sample the combined list, which also holds the
/// domestic cities, so the effective domestic share is higher.
pub const DOMESTIC_WEIGHT: f64 = 0.7;

/// Bounds (minutes, inclusive) between the two halves of a location pair
pub const PAIR_GAP_MINUTES: (i64, i64) = (1, 5);

/// Turns an anomaly plan into records
#[derive(Debug, Clone, Default)]
pub struct RecordSynthesizer {
    window: CoverageWindow,
}

/// Merchant, category and amount of a normally-priced purchase
struct Purchase {
    merchant: &'static str,
    category: &'static str,
    amount: i64,
}

impl RecordSynthesizer {
    pub fn new(window: CoverageWindow) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &CoverageWindow {
        &self.window
    }

    /// Synthesize one record per row of `plan`
    pub fn synthesize(&self, plan: &mut AnomalyPlan, rng: &mut RngManager) -> Vec<TransactionRecord> {
        let num_rows = plan.num_rows();
        let mut records = Vec::with_capacity(num_rows);

        for row in 0..num_rows {
            let record = match plan.entry(row).copied() {
                None => self.normal_row(row, rng),
                Some(PlanEntry::HighAmount) => self.high_amount_row(row, rng),
                Some(PlanEntry::LocationPair(slot)) => self.pair_row(row, slot, plan, rng),
                Some(PlanEntry::RepeatedSmall(slot)) => self.group_row(row, slot, rng),
            };
            records.push(record);
        }

        records
    }

    fn normal_row(&self, row: usize, rng: &mut RngManager) -> TransactionRecord {
        let account = random_account(rng);
        let purchase = random_purchase(rng);
        let location = if rng.chance(DOMESTIC_WEIGHT) {
            *rng.choose(&DOMESTIC_LOCATIONS)
        } else {
            *rng.choose(&ALL_LOCATIONS)
        };
        let timestamp = self.window.random_timestamp(rng);

        TransactionRecord::new(
            row,
            account,
            purchase.amount,
            purchase.merchant,
            purchase.category,
            timestamp,
            location,
        )
    }

    fn high_amount_row(&self, row: usize, rng: &mut RngManager) -> TransactionRecord {
        let account = random_account(rng);
        let amount = anomalous_amount(rng);
        let merchant = *rng.choose(&MERCHANTS);
        let category = category_or_random(merchant, rng);
        let location = *rng.choose(&ALL_LOCATIONS);
        let timestamp = self.window.random_timestamp(rng);

        TransactionRecord::new(row, account, amount, merchant, category, timestamp, location)
    }

    fn pair_row(
        &self,
        row: usize,
        slot: PairSlot,
        plan: &mut AnomalyPlan,
        rng: &mut RngManager,
    ) -> TransactionRecord {
        let account = random_account(rng);
        let purchase = random_purchase(rng);

        let (location, timestamp) = match slot.role {
            PairRole::First => {
                let location = *rng.choose(&DOMESTIC_LOCATIONS);
                let timestamp = self.window.random_timestamp(rng);
                plan.record_first_timestamp(row, timestamp);
                (location, timestamp)
            }
            PairRole::Second => {
                let location = *rng.choose(&INTERNATIONAL_LOCATIONS);
                let timestamp = match plan.first_timestamp_for(row) {
                    Some(first) => {
                        let gap = rng.range_inclusive(PAIR_GAP_MINUTES.0, PAIR_GAP_MINUTES.1);
                        first + Duration::minutes(gap)
                    }
                    None => {
                        warn!(row, pair_id = slot.pair_id, "first half of pair not synthesized yet");
                        self.window.random_timestamp(rng)
                    }
                };
                (location, timestamp)
            }
        };

        TransactionRecord::new(
            row,
            account,
            purchase.amount,
            purchase.merchant,
            purchase.category,
            timestamp,
            location,
        )
    }

    fn group_row(&self, row: usize, slot: GroupSlot, rng: &mut RngManager) -> TransactionRecord {
        let account = random_account(rng);
        let category = merchant_category(slot.merchant).unwrap_or(DEFAULT_SMALL_CATEGORY);

        TransactionRecord::new(
            row,
            account,
            slot.amount,
            slot.merchant,
            category,
            group_member_time(&slot),
            slot.location,
        )
    }
}

/// Timestamp of a group member: base time plus `ordinal` steps
pub fn group_member_time(slot: &GroupSlot) -> NaiveDateTime {
    slot.base_time + Duration::minutes(slot.ordinal as i64 * slot.step_minutes)
}

fn random_account(rng: &mut RngManager) -> i64 {
    rng.range_inclusive(1, MAX_ACCOUNT_ID)
}

fn random_purchase(rng: &mut RngManager) -> Purchase {
    let merchant = *rng.choose(&MERCHANTS);
    let category = category_or_random(merchant, rng);
    let amount = normal_amount(category, rng);
    Purchase {
        merchant,
        category,
        amount,
    }
}

fn category_or_random(merchant: &str, rng: &mut RngManager) -> &'static str {
    merchant_category(merchant).unwrap_or_else(|| *rng.choose(&CATEGORIES))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::AnomalyCounts;
    use crate::reference::{is_domestic, is_international};

    fn plan_only(counts: AnomalyCounts, rows: usize, seed: u64) -> (AnomalyPlan, RngManager) {
        let mut rng = RngManager::new(seed);
        let plan = AnomalyPlan::build_with_counts(rows, counts, &CoverageWindow::default(), &mut rng);
        (plan, rng)
    }

    #[test]
    fn test_one_record_per_row_in_order() {
        let (mut plan, mut rng) = plan_only(AnomalyCounts::for_budget(10), 50, 1);
        let records = RecordSynthesizer::default().synthesize(&mut plan, &mut rng);

        assert_eq!(records.len(), 50);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.transaction_id(), format!("TXN{:06}", i + 1));
        }
    }

    #[test]
    fn test_pair_halves_linked() {
        let counts = AnomalyCounts {
            high_amount: 0,
            location_pairs: 5,
            small_groups: 0,
        };
        let (mut plan, mut rng) = plan_only(counts, 40, 77);
        let records = RecordSynthesizer::default().synthesize(&mut plan, &mut rng);

        for (row, entry) in plan.iter() {
            if let PlanEntry::LocationPair(slot) = entry {
                if slot.role == PairRole::Second {
                    let first = &records[slot.partner];
                    let second = &records[row];
                    let gap = second.timestamp() - first.timestamp();
                    assert!(gap >= Duration::minutes(1) && gap <= Duration::minutes(5));
                    assert!(is_domestic(first.location()));
                    assert!(is_international(second.location()));
                }
            }
        }
    }

    #[test]
    fn test_group_member_time_steps() {
        let base = CoverageWindow::default().start();
        let slot = GroupSlot {
            group_id: 0,
            ordinal: 2,
            merchant: "Netflix",
            location: "Paris, France",
            amount: 199,
            base_time: base,
            step_minutes: 20,
        };
        assert_eq!(group_member_time(&slot), base + Duration::minutes(40));
    }

    #[test]
    fn test_unmapped_merchant_falls_back_to_category_list() {
        let mut rng = RngManager::new(4);
        for _ in 0..50 {
            assert!(CATEGORIES.contains(&category_or_random("Corner Store", &mut rng)));
        }
        assert_eq!(category_or_random("Shell", &mut rng), "Gas");
    }
}
