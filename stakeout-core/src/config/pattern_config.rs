//! Pattern discovery configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DAY_CONCENTRATION_MIN, DEFAULT_METHOD_ZONE_SHARE, DEFAULT_MIN_PATTERN_LOCATIONS,
    DEFAULT_SPECIFIC_DAY_SHARE, DEFAULT_TIME_CLUSTERS, DEFAULT_WEEKEND_HEAVY_SHARE,
};

/// Configuration for the pattern discovery engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PatternConfig {
    /// Number of temporal clusters. Default: 5.
    pub time_clusters: Option<usize>,
    /// Minimum member locations per pattern. Default: 3.
    pub min_locations: Option<usize>,
    /// Dominant-method share for method-zone membership. Default: 0.7.
    pub method_zone_share: Option<f64>,
    /// Day-concentration gate for day-pattern consideration. Default: 0.3.
    pub day_concentration_min: Option<f64>,
    /// Weekend share above which a location reads as weekend-heavy.
    /// Empirically chosen default: 0.4 (a uniform week puts ~0.29 on weekends).
    pub weekend_heavy_share: Option<f64>,
    /// Single-day share above which a location reads as day-specific.
    /// Empirically chosen default: 0.25.
    pub specific_day_share: Option<f64>,
}

impl PatternConfig {
    /// Returns the effective cluster count, defaulting to 5.
    pub fn effective_time_clusters(&self) -> usize {
        self.time_clusters.unwrap_or(DEFAULT_TIME_CLUSTERS)
    }

    /// Returns the effective minimum member locations, defaulting to 3.
    pub fn effective_min_locations(&self) -> usize {
        self.min_locations.unwrap_or(DEFAULT_MIN_PATTERN_LOCATIONS)
    }

    /// Returns the effective method-zone share, defaulting to 0.7.
    pub fn effective_method_zone_share(&self) -> f64 {
        self.method_zone_share.unwrap_or(DEFAULT_METHOD_ZONE_SHARE)
    }

    /// Returns the effective day-concentration gate, defaulting to 0.3.
    pub fn effective_day_concentration_min(&self) -> f64 {
        self.day_concentration_min.unwrap_or(DEFAULT_DAY_CONCENTRATION_MIN)
    }

    /// Returns the effective weekend-heavy share, defaulting to 0.4.
    pub fn effective_weekend_heavy_share(&self) -> f64 {
        self.weekend_heavy_share.unwrap_or(DEFAULT_WEEKEND_HEAVY_SHARE)
    }

    /// Returns the effective specific-day share, defaulting to 0.25.
    pub fn effective_specific_day_share(&self) -> f64 {
        self.specific_day_share.unwrap_or(DEFAULT_SPECIFIC_DAY_SHARE)
    }
}
