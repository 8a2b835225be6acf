//! Anomaly detector configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COMPARISON_DAYS, DEFAULT_LOOKBACK_DAYS, DEFAULT_SPIKE_Z_THRESHOLD,
};

/// Configuration for the anomaly detectors.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnomalyConfig {
    /// Z-score threshold for temporal spike anomalies. Default: 2.0.
    pub z_threshold: Option<f64>,
    /// Recent window length in days. Default: 90.
    pub lookback_days: Option<i64>,
    /// Total comparison span in days (recent + baseline window). Default: 180.
    pub comparison_days: Option<i64>,
}

impl AnomalyConfig {
    /// Returns the effective z-score threshold, defaulting to 2.0.
    pub fn effective_z_threshold(&self) -> f64 {
        self.z_threshold.unwrap_or(DEFAULT_SPIKE_Z_THRESHOLD)
    }

    /// Returns the effective lookback window, defaulting to 90 days.
    pub fn effective_lookback_days(&self) -> i64 {
        self.lookback_days.unwrap_or(DEFAULT_LOOKBACK_DAYS)
    }

    /// Returns the effective comparison span, defaulting to 180 days.
    pub fn effective_comparison_days(&self) -> i64 {
        self.comparison_days.unwrap_or(DEFAULT_COMPARISON_DAYS)
    }
}
