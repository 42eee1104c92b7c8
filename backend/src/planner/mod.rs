//! Anomaly planning
//!
//! Decides, before any record is synthesized, which rows become anomalies
//! and of what kind. The plan is an arena indexed by row: slot `i` holds the
//! [`PlanEntry`] governing row `i`, or `None` for a normal row.
//!
//! # Key Principles
//!
//! 1. **Disjoint slots**: every row carries at most one anomaly role
//! 2. **Plan first**: the whole plan exists before synthesis starts
//! 3. **Fixed group metadata**: a repeated-small group's merchant, location,
//!    amount, base time and step are drawn once, at plan time
//!
//! # Budget
//!
//! For `N` rows and fraction `f` the budget is `floor(N * f)` rows, split as
//! `high = budget / 3`, `pairs = (budget / 3) / 2` and
//! `groups = (budget - high - 2 * pairs) / 3`. Rows lost to flooring stay
//! normal.
//!
//! # Example
//!
//! ```
//! use txn_fixture_core::planner::AnomalyPlan;
//! use txn_fixture_core::{CoverageWindow, RngManager};
//!
//! let mut rng = RngManager::new(42);
//! let plan = AnomalyPlan::build(500, 0.05, &CoverageWindow::default(), &mut rng);
//!
//! let summary = plan.summary();
//! assert_eq!(summary.high_amount, 8);
//! assert_eq!(summary.location_pairs, 4);
//! assert_eq!(summary.small_groups, 3);
//! assert_eq!(summary.planned_rows, 25);
//! ```

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::amounts::small_repeated_amount;
use crate::core::time::CoverageWindow;
use crate::reference::{ALL_LOCATIONS, MERCHANTS};
use crate::rng::RngManager;

/// Members per repeated-small group
pub const GROUP_SIZE: usize = 3;

/// Bounds (minutes, inclusive) of the step between consecutive group members
pub const GROUP_STEP_MINUTES: (i64, i64) = (5, 20);

/// Position of a row within a location-change pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PairRole {
    /// Domestic transaction; its timestamp anchors the pair
    First,
    /// International transaction a few minutes after the first
    Second,
}

/// One half of a rapid location-change pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairSlot {
    pub pair_id: usize,
    pub role: PairRole,
    /// Row index of the other half of the pair
    pub partner: usize,
    /// Set on the first half once it has been synthesized
    pub first_timestamp: Option<NaiveDateTime>,
}

/// One member of a repeated-small-charge group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSlot {
    pub group_id: usize,
    /// 0-indexed position within the group
    pub ordinal: usize,
    pub merchant: &'static str,
    pub location: &'static str,
    /// Shared amount in cents
    pub amount: i64,
    pub base_time: NaiveDateTime,
    /// Minutes between consecutive members
    pub step_minutes: i64,
}

/// Anomaly variant assigned to a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanEntry {
    HighAmount,
    LocationPair(PairSlot),
    RepeatedSmall(GroupSlot),
}

/// How many anomalies of each kind a budget buys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnomalyCounts {
    pub high_amount: usize,
    pub location_pairs: usize,
    pub small_groups: usize,
}

impl AnomalyCounts {
    /// Split a budget of anomalous rows across the three kinds
    pub fn for_budget(total: usize) -> Self {
        let high_amount = total / 3;
        let location_pairs = (total / 3) / 2;
        let small_groups = (total - high_amount - 2 * location_pairs) / GROUP_SIZE;
        Self {
            high_amount,
            location_pairs,
            small_groups,
        }
    }

    pub fn rows(&self) -> usize {
        self.high_amount + 2 * self.location_pairs + GROUP_SIZE * self.small_groups
    }
}

/// Number of anomalous rows requested for `num_rows` at `fraction`
///
/// The fraction is clamped into [0, 1]; NaN plans nothing.
pub fn anomaly_budget(num_rows: usize, fraction: f64) -> usize {
    if fraction.is_nan() {
        return 0;
    }
    let fraction = fraction.clamp(0.0, 1.0);
    ((num_rows as f64) * fraction).floor() as usize
}

/// What a finished plan actually contains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub high_amount: usize,
    pub location_pairs: usize,
    pub small_groups: usize,
    pub planned_rows: usize,
}

/// Row-indexed arena of anomaly assignments
#[derive(Debug, Clone)]
pub struct AnomalyPlan {
    slots: Vec<Option<PlanEntry>>,
    summary: PlanSummary,
}

/// Hands out rows from a shuffled permutation, never the same row twice
struct RowCursor {
    rows: Vec<usize>,
    next: usize,
}

impl RowCursor {
    /// Take the next `n` rows in ascending order, or None if fewer remain
    fn take(&mut self, n: usize) -> Option<Vec<usize>> {
        let end = self.next.checked_add(n)?;
        let mut taken = self.rows.get(self.next..end)?.to_vec();
        self.next = end;
        taken.sort_unstable();
        Some(taken)
    }
}

impl AnomalyPlan {
    /// Plan anomalies for `num_rows` rows at the given fraction
    pub fn build(
        num_rows: usize,
        fraction: f64,
        window: &CoverageWindow,
        rng: &mut RngManager,
    ) -> Self {
        let counts = AnomalyCounts::for_budget(anomaly_budget(num_rows, fraction));
        Self::build_with_counts(num_rows, counts, window, rng)
    }

    /// Plan exactly `counts`, skipping whatever no longer fits in `num_rows`
    ///
    /// Slots are filled in priority order (high amounts, pairs, groups). The
    /// first slot that cannot be filled ends planning: it and every slot
    /// after it stay unplanned.
    pub fn build_with_counts(
        num_rows: usize,
        counts: AnomalyCounts,
        window: &CoverageWindow,
        rng: &mut RngManager,
    ) -> Self {
        let mut rows: Vec<usize> = (0..num_rows).collect();
        rng.shuffle(&mut rows);

        let mut plan = Self {
            slots: vec![None; num_rows],
            summary: PlanSummary::default(),
        };
        let mut cursor = RowCursor { rows, next: 0 };

        if plan.fill(counts, &mut cursor, window, rng).is_none() {
            debug!(num_rows, ?counts, "row space exhausted before plan was complete");
        }

        debug!(summary = ?plan.summary, "anomaly plan built");
        plan
    }

    fn fill(
        &mut self,
        counts: AnomalyCounts,
        cursor: &mut RowCursor,
        window: &CoverageWindow,
        rng: &mut RngManager,
    ) -> Option<()> {
        for _ in 0..counts.high_amount {
            let rows = cursor.take(1)?;
            self.assign(rows[0], PlanEntry::HighAmount);
            self.summary.high_amount += 1;
        }

        for pair_id in 0..counts.location_pairs {
            let rows = cursor.take(2)?;
            let (first, second) = (rows[0], rows[1]);
            self.assign(
                first,
                PlanEntry::LocationPair(PairSlot {
                    pair_id,
                    role: PairRole::First,
                    partner: second,
                    first_timestamp: None,
                }),
            );
            self.assign(
                second,
                PlanEntry::LocationPair(PairSlot {
                    pair_id,
                    role: PairRole::Second,
                    partner: first,
                    first_timestamp: None,
                }),
            );
            self.summary.location_pairs += 1;
        }

        for group_id in 0..counts.small_groups {
            let rows = cursor.take(GROUP_SIZE)?;
            let merchant = *rng.choose(&MERCHANTS);
            let location = *rng.choose(&ALL_LOCATIONS);
            let amount = small_repeated_amount(rng);
            let base_time = window.random_hour(rng);
            let step_minutes = rng.range_inclusive(GROUP_STEP_MINUTES.0, GROUP_STEP_MINUTES.1);

            for (ordinal, row) in rows.into_iter().enumerate() {
                self.assign(
                    row,
                    PlanEntry::RepeatedSmall(GroupSlot {
                        group_id,
                        ordinal,
                        merchant,
                        location,
                        amount,
                        base_time,
                        step_minutes,
                    }),
                );
            }
            self.summary.small_groups += 1;
        }

        Some(())
    }

    fn assign(&mut self, row: usize, entry: PlanEntry) {
        debug_assert!(self.slots[row].is_none(), "row {} planned twice", row);
        self.slots[row] = Some(entry);
        self.summary.planned_rows += 1;
    }

    /// Number of rows the plan covers (planned or not)
    pub fn num_rows(&self) -> usize {
        self.slots.len()
    }

    pub fn entry(&self, row: usize) -> Option<&PlanEntry> {
        self.slots.get(row).and_then(Option::as_ref)
    }

    /// Planned rows in ascending row order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &PlanEntry)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(row, slot)| slot.as_ref().map(|entry| (row, entry)))
    }

    pub fn summary(&self) -> PlanSummary {
        self.summary
    }

    /// Store the synthesized timestamp of a pair's first row
    ///
    /// Returns false if `row` is not the first half of a pair.
    pub fn record_first_timestamp(&mut self, row: usize, ts: NaiveDateTime) -> bool {
        match self.slots.get_mut(row) {
            Some(Some(PlanEntry::LocationPair(slot))) if slot.role == PairRole::First => {
                slot.first_timestamp = Some(ts);
                true
            }
            _ => false,
        }
    }

    /// Timestamp already recorded for the first half of `row`'s pair
    pub fn first_timestamp_for(&self, row: usize) -> Option<NaiveDateTime> {
        match self.entry(row)? {
            PlanEntry::LocationPair(slot) => match slot.role {
                PairRole::First => slot.first_timestamp,
                PairRole::Second => match self.entry(slot.partner)? {
                    PlanEntry::LocationPair(first) => first.first_timestamp,
                    _ => None,
                },
            },
            _ => None,
        }
    }
}
