//! Structured span field definitions for Stakeout metrics.
//!
//! These constants define the standard field names used in tracing spans
//! across the analysis subsystems. Using consistent field names enables
//! structured log queries across runs.

/// Grid indexer: cells produced by the partition pass.
pub const GRID_CELL_COUNT: &str = "grid_cell_count";

/// Signature builder: qualifying cells that earned a signature.
pub const SIGNATURE_COUNT: &str = "signature_count";

/// Signature builder: build phase duration in milliseconds.
pub const SIGNATURE_BUILD_TIME: &str = "signature_build_time";

/// Feature generator: feature vectors produced.
pub const FEATURE_VECTOR_COUNT: &str = "feature_vector_count";

/// Pattern discovery: patterns found across all sub-analyses.
pub const PATTERN_COUNT: &str = "pattern_count";

/// Pattern discovery: discovery phase duration in milliseconds.
pub const DISCOVERY_TIME: &str = "discovery_time";

/// Anomaly detectors: anomalies kept after ranking and truncation.
pub const ANOMALY_COUNT: &str = "anomaly_count";

/// Pipeline: full run duration in milliseconds.
pub const PIPELINE_TIME: &str = "pipeline_time";
