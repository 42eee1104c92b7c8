//! Orchestrator - end-to-end fixture generation
//!
//! See `engine.rs` for the pipeline and `digest.rs` for run fingerprints.

pub mod digest;
pub mod engine;

// Re-export main types for convenience
pub use engine::{
    Generated, GenerationReport, GenerationRun, GeneratorConfig, GeneratorError, Orchestrator,
};
