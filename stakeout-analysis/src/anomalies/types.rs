//! Anomaly records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use stakeout_core::types::GridKey;

/// Category of a flagged deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyType {
    TemporalSpike,
    EnforcementSurge,
    EnforcementDrop,
}

/// A statistically unusual deviation at one location.
///
/// `detected_at` is stamped with the run's reference time rather than
/// wall-clock now, so identical inputs serialize identically.
#[derive(Debug, Clone, Serialize)]
pub struct Anomaly {
    pub grid_id: GridKey,
    pub lat: f64,
    pub lng: f64,
    pub anomaly_type: AnomalyType,
    pub description: String,
    pub z_score: f64,
    pub p_value: f64,
    pub expected_value: f64,
    pub actual_value: f64,
    pub insight: String,
    pub detected_at: DateTime<Utc>,
}

/// Sort by descending |z|, tie-broken on cell id, and keep the top `limit`.
pub(crate) fn rank_and_truncate(mut anomalies: Vec<Anomaly>, limit: usize) -> Vec<Anomaly> {
    anomalies.sort_by(|a, b| {
        b.z_score
            .abs()
            .total_cmp(&a.z_score.abs())
            .then_with(|| a.grid_id.cmp(&b.grid_id))
    });
    anomalies.truncate(limit);
    anomalies
}
