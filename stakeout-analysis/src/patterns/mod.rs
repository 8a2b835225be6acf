//! Cross-location pattern discovery.
//!
//! Four independent sub-analyses over the signature set: temporal clustering,
//! detection-method zoning, day-of-week zoning, and the end-of-month quota
//! test.

pub mod day_patterns;
pub mod engine;
pub mod kmeans;
pub mod method_zones;
pub mod quota;
pub mod time_clusters;
pub mod types;

pub use engine::{DiscoveryResult, PatternEngine};
pub use types::{
    DiscoveredPattern, DiscoverySummary, PatternLocation, PatternStatistics, PatternType,
};
