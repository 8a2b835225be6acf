//! stakeout-core: shared foundation for the Stakeout enforcement analysis engine.
//!
//! This crate provides the non-algorithmic fabric shared by the analysis
//! crates:
//! - Types: stop events, the immutable per-run event set, grid cell identity
//! - Config: TOML-based layered configuration with typed validation
//! - Errors: one `thiserror` enum per subsystem
//! - Tracing: `tracing` setup with env-filtered per-subsystem levels
//! - Constants: compiled defaults for every tunable

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-exports for convenience
pub use config::{AnomalyConfig, GridConfig, PatternConfig, SignatureConfig, StakeoutConfig};
pub use errors::{ConfigError, EventError, PipelineError};
pub use types::{round_to_grid, EventSet, GridKey, StopEvent};
