//! Amount generation
//!
//! Produces transaction amounts in cents. Sampling directly in cents keeps
//! every value at exactly 2 decimal places with no float rounding step.
//!
//! # Example
//!
//! ```
//! use txn_fixture_core::amounts::{anomalous_amount, normal_amount};
//! use txn_fixture_core::reference::{category_range, ANOMALOUS_RANGE};
//! use txn_fixture_core::RngManager;
//!
//! let mut rng = RngManager::new(42);
//! let groceries = normal_amount("Groceries", &mut rng);
//! assert!(category_range("Groceries").contains(groceries));
//!
//! let big = anomalous_amount(&mut rng);
//! assert!(ANOMALOUS_RANGE.contains(big));
//! ```

use crate::reference::{category_range, AmountRange, ANOMALOUS_RANGE, SMALL_REPEATED_RANGE};
use crate::rng::RngManager;

/// Uniform amount within the category's range (default range if unknown)
pub fn normal_amount(category: &str, rng: &mut RngManager) -> i64 {
    sample(category_range(category), rng)
}

/// Uniform amount in the elevated anomaly range
pub fn anomalous_amount(rng: &mut RngManager) -> i64 {
    sample(ANOMALOUS_RANGE, rng)
}

/// Uniform micro-charge amount shared by a repeated-small group
pub fn small_repeated_amount(rng: &mut RngManager) -> i64 {
    sample(SMALL_REPEATED_RANGE, rng)
}

fn sample(range: AmountRange, rng: &mut RngManager) -> i64 {
    rng.range_inclusive(range.min, range.max)
}
