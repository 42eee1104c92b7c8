//! Domain models for the fixture generator

pub mod transaction;

// Re-exports
pub use transaction::{format_cents, parse_cents, AmountParseError, TransactionRecord, CSV_HEADER};
