//! Temporal spike detection.
//!
//! Per location, compares observed per-hour counts against the count the
//! location's own signature predicts, flagging hours whose deviation exceeds
//! the z-score threshold.

use stakeout_core::constants::{
    HOURS_PER_DAY, MAX_SPIKE_ANOMALIES, SPIKE_MIN_EVENTS,
};
use stakeout_core::types::collections::FxHashMap;
use stakeout_core::types::{EventSet, GridKey};

use crate::signatures::LocationSignature;
use crate::stats::{normal_two_sided_p, round_to};

use super::types::{rank_and_truncate, Anomaly, AnomalyType};

/// Detects per-hour count deviations against each location's signature.
#[derive(Debug, Clone, Copy)]
pub struct SpikeDetector {
    z_threshold: f64,
}

impl SpikeDetector {
    pub fn new(z_threshold: f64) -> Self {
        Self { z_threshold }
    }

    /// Scan all signatured locations, returning the top anomalies ranked by
    /// descending |z|.
    pub fn detect(
        &self,
        events: &EventSet,
        partition: &FxHashMap<GridKey, Vec<usize>>,
        signatures: &FxHashMap<GridKey, LocationSignature>,
    ) -> Vec<Anomaly> {
        let detected_at = events.reference_time();
        let all = events.events();

        // GridKey order keeps the scan deterministic before ranking.
        let mut keys: Vec<&GridKey> = signatures.keys().collect();
        keys.sort();

        let mut anomalies = Vec::new();
        for key in keys {
            let sig = &signatures[key];
            let Some(indices) = partition.get(key) else {
                continue;
            };
            if indices.len() < SPIKE_MIN_EVENTS {
                continue;
            }

            let total = indices.len() as f64;
            let mut hour_counts = [0.0f64; HOURS_PER_DAY];
            for &idx in indices {
                hour_counts[all[idx].hour as usize] += 1.0;
            }

            for (hour, &observed) in hour_counts.iter().enumerate() {
                if observed == 0.0 {
                    continue;
                }
                // Expected count under the location's own shape; uniform
                // fallback when the signature has no probability for the hour.
                let probability = sig
                    .hour_distribution
                    .get(hour)
                    .copied()
                    .unwrap_or(1.0 / HOURS_PER_DAY as f64);
                let expected = total * probability;
                if expected <= 0.0 {
                    continue;
                }

                let z = (observed - expected) / expected.sqrt().max(1.0);
                if z.abs() <= self.z_threshold {
                    continue;
                }

                let direction = if z > 0.0 { "high" } else { "low" };
                let delta = (observed - expected).abs() as i64;
                let more_fewer = if z > 0.0 { "more" } else { "fewer" };
                anomalies.push(Anomaly {
                    grid_id: *key,
                    lat: sig.lat,
                    lng: sig.lng,
                    anomaly_type: AnomalyType::TemporalSpike,
                    description: format!("Unusual {direction} {hour}:00 enforcement"),
                    z_score: round_to(z, 2),
                    p_value: round_to(normal_two_sided_p(z), 4),
                    expected_value: round_to(expected, 1),
                    actual_value: observed,
                    insight: format!(
                        "{delta} {more_fewer} stops at {hour}:00 than expected (z={z:.1})"
                    ),
                    detected_at,
                });
            }
        }

        rank_and_truncate(anomalies, MAX_SPIKE_ANOMALIES)
    }
}
