//! Orchestrator Engine
//!
//! Runs the whole generation pipeline for one configuration:
//!
//! ```text
//! 1. Validate and normalize config, resolve the seed
//! 2. Build the anomaly plan (complete before any record exists)
//! 3. Synthesize rows 0..N against the plan
//! 4. Encode CSV, write to a temp file, rename over the destination
//! 5. Report seed, plan breakdown, output digest and config hash
//! ```
//!
//! # Example
//!
//! ```rust
//! use txn_fixture_core::orchestrator::{GeneratorConfig, Orchestrator};
//!
//! let config = GeneratorConfig {
//!     num_rows: 100,
//!     seed: Some(42),
//!     ..GeneratorConfig::default()
//! };
//!
//! let generated = Orchestrator::new(config).unwrap().generate();
//! assert_eq!(generated.records.len(), 100);
//! // budget 5 → 1 high-amount row + 1 group of 3; flooring drops the rest
//! assert_eq!(generated.plan.planned_rows, 4);
//! ```

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::time::CoverageWindow;
use crate::models::TransactionRecord;
use crate::orchestrator::digest::{compute_config_hash, sha256_hex};
use crate::output::{write_transactions, OutputError};
use crate::planner::{AnomalyPlan, PlanSummary};
use crate::rng::RngManager;
use crate::synthesis::RecordSynthesizer;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of records to generate
    pub num_rows: usize,

    /// Share of rows to turn into anomalies, clamped into [0, 1]
    pub anomaly_fraction: f64,

    /// Destination CSV file
    pub output_path: PathBuf,

    /// RNG seed; derived from the system clock when absent
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_rows: 500,
            anomaly_fraction: 0.05,
            output_path: PathBuf::from("transactions.csv"),
            seed: None,
        }
    }
}

/// Generator error types
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Configuration validation error
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Fixture could not be encoded or written
    #[error(transparent)]
    Output(#[from] OutputError),

    /// Config could not be serialized for hashing
    #[error("serialization error: {0}")]
    Serialization(String),
}

// ============================================================================
// Results
// ============================================================================

/// Records produced in memory, before anything is written
#[derive(Debug, Clone)]
pub struct Generated {
    pub seed: u64,
    pub plan: PlanSummary,
    pub records: Vec<TransactionRecord>,
}

/// What a completed run wrote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub rows_written: usize,
    pub plan: PlanSummary,
    pub output_path: PathBuf,
    /// SHA-256 of the bytes written
    pub sha256: String,
    /// SHA-256 of the normalized config (seed resolved)
    pub config_hash: String,
}

/// A completed run: the report plus the records it wrote
#[derive(Debug, Clone)]
pub struct GenerationRun {
    pub report: GenerationReport,
    pub records: Vec<TransactionRecord>,
}

// ============================================================================
// Orchestrator
// ============================================================================

/// One generation run, seeded once and consumed by `generate` or `run`
#[derive(Debug)]
pub struct Orchestrator {
    config: GeneratorConfig,
    seed: u64,
    rng: RngManager,
    synthesizer: RecordSynthesizer,
}

impl Orchestrator {
    /// Validate the config and seed the RNG
    ///
    /// Out-of-range fractions are clamped with a warning; non-finite
    /// fractions and empty output paths are rejected.
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        Self::with_window(config, CoverageWindow::default())
    }

    /// Like [`Orchestrator::new`] with a custom coverage window
    pub fn with_window(config: GeneratorConfig, window: CoverageWindow) -> Result<Self, GeneratorError> {
        let mut config = Self::validate_config(config)?;

        let seed = config.seed.unwrap_or_else(seed_from_clock);
        config.seed = Some(seed);

        Ok(Self {
            config,
            seed,
            rng: RngManager::new(seed),
            synthesizer: RecordSynthesizer::new(window),
        })
    }

    fn validate_config(mut config: GeneratorConfig) -> Result<GeneratorConfig, GeneratorError> {
        if !config.anomaly_fraction.is_finite() {
            return Err(GeneratorError::InvalidConfig(format!(
                "anomaly_fraction must be finite, got {}",
                config.anomaly_fraction
            )));
        }

        let clamped = config.anomaly_fraction.clamp(0.0, 1.0);
        if clamped != config.anomaly_fraction {
            warn!(
                requested = config.anomaly_fraction,
                clamped, "anomaly_fraction outside [0, 1], clamping"
            );
            config.anomaly_fraction = clamped;
        }

        if config.output_path.as_os_str().is_empty() {
            return Err(GeneratorError::InvalidConfig(
                "output_path must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Normalized config, with the resolved seed filled in
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Plan and synthesize all records in memory
    pub fn generate(mut self) -> Generated {
        let num_rows = self.config.num_rows;
        info!(seed = self.seed, num_rows, fraction = self.config.anomaly_fraction, "generating transactions");

        let mut plan = AnomalyPlan::build(
            num_rows,
            self.config.anomaly_fraction,
            self.synthesizer.window(),
            &mut self.rng,
        );
        let summary = plan.summary();
        let records = self.synthesizer.synthesize(&mut plan, &mut self.rng);

        Generated {
            seed: self.seed,
            plan: summary,
            records,
        }
    }

    /// Generate, write the fixture file and report on it
    pub fn run(self) -> Result<GenerationRun, GeneratorError> {
        let config_hash = compute_config_hash(&self.config)?;
        let output_path = self.config.output_path.clone();

        let generated = self.generate();
        let bytes = write_transactions(&output_path, &generated.records)?;

        let report = GenerationReport {
            seed: generated.seed,
            rows_written: generated.records.len(),
            plan: generated.plan,
            output_path,
            sha256: sha256_hex(&bytes),
            config_hash,
        };
        info!(
            path = %report.output_path.display(),
            rows = report.rows_written,
            sha256 = %report.sha256,
            "fixture written"
        );

        Ok(GenerationRun {
            report,
            records: generated.records,
        })
    }
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
