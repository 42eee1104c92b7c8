//! txn-fixture CLI
//!
//! Generates a CSV fixture of transactions with injected anomalies and
//! prints a short summary of what was written.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use txn_fixture_core::{GenerationRun, GeneratorConfig, Orchestrator, TransactionRecord};

/// Amounts above this (in cents) are listed as high-value in the summary
const HIGH_VALUE_CENTS: i64 = 500_000;

#[derive(Parser, Debug)]
#[command(name = "txn-fixture")]
#[command(about = "Generate transaction fixtures with labeled anomalies", long_about = None)]
struct Args {
    /// Number of transactions to generate
    #[arg(short = 'n', long, default_value_t = 500)]
    rows: usize,

    /// Share of rows to turn into anomalies (clamped into [0, 1])
    #[arg(short = 'f', long, default_value_t = 0.05, allow_negative_numbers = true)]
    anomaly_fraction: f64,

    /// Destination CSV file
    #[arg(short, long, default_value = "transactions.csv")]
    output: PathBuf,

    /// Seed for reproducible output (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,
}

impl From<Args> for GeneratorConfig {
    fn from(args: Args) -> Self {
        Self {
            num_rows: args.rows,
            anomaly_fraction: args.anomaly_fraction,
            output_path: args.output,
            seed: args.seed,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let output = args.output.clone();

    let run = Orchestrator::new(args.into())
        .context("invalid generator configuration")?
        .run()
        .with_context(|| format!("failed to generate {}", output.display()))?;

    print_summary(&run);
    Ok(())
}

fn print_summary(run: &GenerationRun) {
    let report = &run.report;
    println!(
        "Successfully generated {} transactions in {}",
        report.rows_written,
        report.output_path.display()
    );
    println!(
        "Seed {} | anomalies planned: {} high-amount, {} location pairs, {} small-charge groups",
        report.seed, report.plan.high_amount, report.plan.location_pairs, report.plan.small_groups
    );
    println!("SHA-256 {}", report.sha256);

    println!("\nSample transactions:");
    for (i, txn) in run.records.iter().take(5).enumerate() {
        println!(
            "{}. {}: ${} at {} ({})",
            i + 1,
            txn.transaction_id(),
            txn.amount_display(),
            txn.merchant(),
            txn.location()
        );
    }

    let high_value: Vec<&TransactionRecord> = run
        .records
        .iter()
        .filter(|t| t.amount() > HIGH_VALUE_CENTS)
        .collect();
    println!("\nHigh-value transactions (>$5000): {}", high_value.len());
    if !high_value.is_empty() {
        println!("Sample high-value transactions:");
        for txn in high_value.iter().take(3) {
            println!(
                "  {}: ${} at {}",
                txn.transaction_id(),
                txn.amount_display(),
                txn.merchant()
            );
        }
    }
}
