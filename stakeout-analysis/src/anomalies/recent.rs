//! Recent-change detection.
//!
//! Compares per-location daily stop rates in a recent window against the
//! window immediately preceding it, flagging surges and drops.

use chrono::Duration;

use stakeout_core::config::AnomalyConfig;
use stakeout_core::constants::{
    DROP_RATIO, MAX_RECENT_ANOMALIES, RECENT_CHANGE_MIN_EVENTS, SURGE_RATIO,
};
use stakeout_core::types::collections::FxHashMap;
use stakeout_core::types::{EventSet, GridKey};

use crate::grid::GridIndexer;
use crate::stats::round_to;

use super::types::{rank_and_truncate, Anomaly, AnomalyType};

/// Detects rate surges and drops over rolling windows.
#[derive(Debug, Clone, Copy)]
pub struct RecentChangeDetector {
    lookback_days: i64,
    comparison_days: i64,
}

impl RecentChangeDetector {
    pub fn new(lookback_days: i64, comparison_days: i64) -> Self {
        Self {
            lookback_days,
            comparison_days,
        }
    }

    pub fn from_config(config: &AnomalyConfig) -> Self {
        Self::new(
            config.effective_lookback_days(),
            config.effective_comparison_days(),
        )
    }

    /// Compare the recent window against the historical window.
    ///
    /// The ratio cut-offs (surge above 2.0, drop below 0.5) are heuristics;
    /// the reported p-value is a fixed 0.01 placeholder, not a calibrated
    /// statistic, because no closed-form test is applied here.
    pub fn detect(&self, events: &EventSet, indexer: &GridIndexer) -> Vec<Anomaly> {
        let reference = events.reference_time();
        let recent_start = reference - Duration::days(self.lookback_days);
        let historical_start = reference - Duration::days(self.comparison_days);
        let historical_span = (self.comparison_days - self.lookback_days) as f64;

        let mut recent_counts: FxHashMap<GridKey, usize> = FxHashMap::default();
        let mut historical_counts: FxHashMap<GridKey, usize> = FxHashMap::default();
        let mut recent_total = 0usize;
        let mut historical_total = 0usize;

        for event in events {
            let key = indexer.key_for(event.lat, event.lng);
            if event.timestamp >= recent_start {
                *recent_counts.entry(key).or_default() += 1;
                recent_total += 1;
            } else if event.timestamp >= historical_start {
                *historical_counts.entry(key).or_default() += 1;
                historical_total += 1;
            }
        }

        if recent_total < RECENT_CHANGE_MIN_EVENTS || historical_total < RECENT_CHANGE_MIN_EVENTS {
            return Vec::new();
        }

        let mut keys: Vec<&GridKey> = recent_counts.keys().collect();
        keys.sort();

        let mut anomalies = Vec::new();
        for key in keys {
            let recent = recent_counts[key];
            let Some(&historical) = historical_counts.get(key) else {
                continue;
            };

            let recent_rate = recent as f64 / self.lookback_days as f64;
            let historical_rate = historical as f64 / historical_span;
            if historical_rate <= 0.0 {
                continue;
            }

            let ratio = recent_rate / historical_rate;
            if ratio <= SURGE_RATIO && ratio >= DROP_RATIO {
                continue;
            }

            let surged = ratio > 1.0;
            let change_pct = (ratio * 100.0 - 100.0) as i64;
            anomalies.push(Anomaly {
                grid_id: *key,
                lat: key.lat(),
                lng: key.lng(),
                anomaly_type: if surged {
                    AnomalyType::EnforcementSurge
                } else {
                    AnomalyType::EnforcementDrop
                },
                description: format!(
                    "{} enforcement in past {} days",
                    if surged { "Increased" } else { "Decreased" },
                    self.lookback_days
                ),
                z_score: round_to(ratio.log2(), 2),
                // Placeholder, not a calibrated statistic.
                p_value: 0.01,
                expected_value: round_to(historical_rate * self.lookback_days as f64, 1),
                actual_value: recent as f64,
                insight: format!("{change_pct:+}% change in enforcement rate vs prior period"),
                detected_at: reference,
            });
        }

        rank_and_truncate(anomalies, MAX_RECENT_ANOMALIES)
    }
}
