//! Pattern discovery orchestration.

use tracing::debug;

use stakeout_core::config::PatternConfig;
use stakeout_core::types::collections::FxHashMap;
use stakeout_core::types::{EventSet, GridKey};

use crate::grid::GridIndexer;
use crate::signatures::LocationSignature;

use super::types::{DiscoveredPattern, DiscoverySummary};
use super::{day_patterns, method_zones, quota, time_clusters};

/// Outcome of one discovery run.
#[derive(Debug, Clone)]
pub struct DiscoveryResult {
    pub patterns: Vec<DiscoveredPattern>,
    pub summary: DiscoverySummary,
}

/// Runs every discovery sub-analysis over the signature set.
#[derive(Debug, Clone)]
pub struct PatternEngine {
    config: PatternConfig,
}

impl PatternEngine {
    pub fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    /// Run all sub-analyses and concatenate their results.
    ///
    /// The quota pattern is appended only when detected. The summary's
    /// anomaly count is filled in by the pipeline once detectors have run.
    pub fn discover(
        &self,
        events: &EventSet,
        signatures: &FxHashMap<GridKey, LocationSignature>,
        indexer: &GridIndexer,
    ) -> DiscoveryResult {
        let min_locations = self.config.effective_min_locations();

        let clusters = time_clusters::discover(
            signatures,
            self.config.effective_time_clusters(),
            min_locations,
        );
        debug!(count = clusters.len(), "time cluster discovery complete");

        let zones = method_zones::discover(
            signatures,
            self.config.effective_method_zone_share(),
            min_locations,
        );
        debug!(count = zones.len(), "method zone discovery complete");

        let days = day_patterns::discover(signatures, &self.config);
        debug!(count = days.len(), "day pattern discovery complete");

        let quota_pattern = quota::test_quota_effect(events, indexer);
        debug!(detected = quota_pattern.is_some(), "quota effect test complete");

        let mut summary = DiscoverySummary {
            time_clusters: clusters.len(),
            method_zones: zones.len(),
            day_patterns: days.len(),
            quota_effect_detected: quota_pattern.is_some(),
            ..DiscoverySummary::default()
        };

        let mut patterns = clusters;
        patterns.extend(zones);
        patterns.extend(days);
        if let Some(pattern) = quota_pattern {
            patterns.push(pattern);
        }
        summary.total_patterns = patterns.len();

        DiscoveryResult { patterns, summary }
    }
}
