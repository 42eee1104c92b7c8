//! Transaction Fixture Generator - Rust Engine
//!
//! Synthesizes fixed-size CSV fixtures of card transactions with a
//! controlled share of labeled anomalies, for exercising fraud-detection
//! code.
//!
//! # Architecture
//!
//! - **reference**: Static merchants, categories, locations and amount ranges
//! - **amounts**: Normal, anomalous and micro-charge amount sampling
//! - **planner**: Anomaly plan (which rows are anomalous, and how)
//! - **synthesis**: One record per row, driven by the plan
//! - **output**: CSV encoding, atomic file writes, reading fixtures back
//! - **orchestrator**: Config validation and the end-to-end run
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. All randomness is deterministic (seeded RNG, seeded once)
//! 3. No row carries more than one anomaly role

// Module declarations
pub mod amounts;
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod output;
pub mod planner;
pub mod reference;
pub mod rng;
pub mod synthesis;

// Re-exports for convenience
pub use crate::core::time::{CoverageWindow, TIMESTAMP_FORMAT};
pub use models::{format_cents, parse_cents, AmountParseError, TransactionRecord, CSV_HEADER};
pub use orchestrator::{
    Generated, GenerationReport, GenerationRun, GeneratorConfig, GeneratorError, Orchestrator,
};
pub use output::{read_transactions, write_transactions, OutputError};
pub use planner::{AnomalyPlan, PlanEntry, PlanSummary};
pub use rng::RngManager;
pub use synthesis::RecordSynthesizer;
