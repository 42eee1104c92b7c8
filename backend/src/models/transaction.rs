//! Transaction record model
//!
//! A single row of a fixture file. Each record has:
//! - Sequential transaction id (`TXN000001`, ...)
//! - Account id (`ACC0001` .. `ACC0050`)
//! - Amount (i64 cents, written with 2 decimal places)
//! - Merchant, category and location
//! - Second-precision timestamp
//!
//! Records are immutable once created.
//!
//! CRITICAL: All money values are i64 (cents)

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column names in the order they are written
pub const CSV_HEADER: [&str; 7] = [
    "TransactionID",
    "AccountID",
    "Amount",
    "Merchant",
    "Category",
    "Timestamp",
    "Location",
];

/// Errors when parsing a formatted amount back into cents
#[derive(Debug, Error, PartialEq)]
pub enum AmountParseError {
    #[error("amount '{0}' is not a decimal with 2 fractional digits")]
    Malformed(String),

    #[error("amount '{0}' is out of range")]
    Overflow(String),
}

/// A synthesized transaction
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use txn_fixture_core::TransactionRecord;
///
/// let ts = NaiveDate::from_ymd_opt(2023, 3, 14)
///     .unwrap()
///     .and_hms_opt(9, 26, 0)
///     .unwrap();
/// let record = TransactionRecord::new(0, 7, 4_250, "Starbucks", "Restaurants", ts, "Seattle, USA");
///
/// assert_eq!(record.transaction_id(), "TXN000001");
/// assert_eq!(record.account_id(), "ACC0007");
/// assert_eq!(record.amount_display(), "42.50");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "TransactionID")]
    transaction_id: String,

    #[serde(rename = "AccountID")]
    account_id: String,

    #[serde(rename = "Amount", with = "cents")]
    amount: i64,

    #[serde(rename = "Merchant")]
    merchant: String,

    #[serde(rename = "Category")]
    category: String,

    #[serde(rename = "Timestamp", with = "timestamp")]
    timestamp: NaiveDateTime,

    #[serde(rename = "Location")]
    location: String,
}

impl TransactionRecord {
    /// Create a record for row `row` (0-indexed)
    ///
    /// # Panics
    /// Panics if amount is negative
    pub fn new(
        row: usize,
        account: i64,
        amount: i64,
        merchant: impl Into<String>,
        category: impl Into<String>,
        timestamp: NaiveDateTime,
        location: impl Into<String>,
    ) -> Self {
        assert!(amount >= 0, "amount must be non-negative");

        Self {
            transaction_id: format!("TXN{:06}", row + 1),
            account_id: format!("ACC{:04}", account),
            amount,
            merchant: merchant.into(),
            category: category.into(),
            timestamp,
            location: location.into(),
        }
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Amount in cents
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Amount as written to fixture files, e.g. `"1234.50"`
    pub fn amount_display(&self) -> String {
        format_cents(self.amount)
    }

    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Format cents as a decimal with exactly 2 fractional digits
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Parse a non-negative decimal with exactly 2 fractional digits into cents
pub fn parse_cents(text: &str) -> Result<i64, AmountParseError> {
    let malformed = || AmountParseError::Malformed(text.to_string());

    let (whole, frac) = text.split_once('.').ok_or_else(malformed)?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || frac.len() != 2 || !all_digits(frac) {
        return Err(malformed());
    }

    let overflow = || AmountParseError::Overflow(text.to_string());
    let whole: i64 = whole.parse().map_err(|_| overflow())?;
    let frac: i64 = frac.parse().map_err(|_| malformed())?;
    whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac))
        .ok_or_else(overflow)
}

mod cents {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_cents(*amount))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_cents(&text).map_err(de::Error::custom)
    }
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::core::time::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(99), "0.99");
        assert_eq!(format_cents(500), "5.00");
        assert_eq!(format_cents(123_456), "1234.56");
        assert_eq!(format_cents(5_000_000), "50000.00");
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("0.99"), Ok(99));
        assert_eq!(parse_cents("1234.56"), Ok(123_456));
        assert_eq!(parse_cents("50000.00"), Ok(5_000_000));
    }

    #[test]
    fn test_parse_cents_rejects_malformed() {
        for bad in ["12", "12.5", "12.345", ".50", "1a.00", "-1.00", ""] {
            assert!(
                matches!(parse_cents(bad), Err(AmountParseError::Malformed(_))),
                "'{}' should be rejected",
                bad
            );
        }
        assert!(matches!(
            parse_cents("99999999999999999999.00"),
            Err(AmountParseError::Overflow(_))
        ));
    }

    #[test]
    fn test_ids_zero_padded() {
        let ts = crate::core::time::CoverageWindow::default().start();
        let record = TransactionRecord::new(499, 50, 100, "Uber", "Transportation", ts, "Boston, USA");
        assert_eq!(record.transaction_id(), "TXN000500");
        assert_eq!(record.account_id(), "ACC0050");
    }

    #[test]
    #[should_panic(expected = "amount must be non-negative")]
    fn test_negative_amount_panics() {
        let ts = crate::core::time::CoverageWindow::default().start();
        TransactionRecord::new(0, 1, -1, "Uber", "Transportation", ts, "Boston, USA");
    }
}
