//! stakeout-analysis: the Stakeout analysis engine.
//!
//! Turns a validated set of geo-tagged enforcement stop events into:
//! - Per-location statistical signatures (temporal shape, method mix,
//!   strictness, significance, human-readable insight)
//! - Per-event feature vectors for downstream models
//! - Discovered patterns (time clusters, method zones, day-of-week
//!   patterns, month-end quota effect)
//! - Ranked anomalies (temporal spikes, recent rate changes)
//!
//! `pipeline::AnalysisPipeline` runs the whole flow; each phase is also
//! usable on its own.

pub mod anomalies;
pub mod baseline;
pub mod features;
pub mod grid;
pub mod patterns;
pub mod pipeline;
pub mod signatures;
pub mod stats;

// Re-exports for convenience
pub use anomalies::{Anomaly, AnomalyType, RecentChangeDetector, SpikeDetector};
pub use baseline::GlobalBaseline;
pub use features::{FeatureGenerator, FeatureVector, FEATURE_COLUMNS};
pub use grid::{CellStats, GridIndexer};
pub use patterns::{DiscoveredPattern, DiscoverySummary, PatternEngine, PatternType};
pub use pipeline::{AnalysisPipeline, AnalysisReport};
pub use signatures::{LocationSignature, SignatureBuilder, Strictness};
