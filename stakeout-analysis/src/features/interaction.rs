//! Interaction feature derivation.
//!
//! For every event, measures how much its time and place deviate from the
//! global baseline and from its own cell's signature. Events in cells below
//! the signature threshold receive neutral defaults, signaling "insufficient
//! local history" rather than failing.

use rayon::prelude::*;

use stakeout_core::constants::{
    DAYS_PER_WEEK, DAY_STD_FLOOR, GLOBAL_RATE_FLOOR, HOURS_PER_DAY, HOUR_STD_FLOOR,
};
use stakeout_core::types::collections::FxHashMap;
use stakeout_core::types::{EventSet, GridKey, StopEvent};

use crate::baseline::GlobalBaseline;
use crate::grid::{CellStats, GridIndexer};
use crate::signatures::LocationSignature;
use crate::stats::population_std;

use super::encoding::{cyclical_encode, is_night, is_rush_hour, is_weekend};
use super::types::FeatureVector;

/// Relative over/under-representation of a local probability versus the
/// global baseline, floored at a small epsilon.
///
/// Bounded below by -1 (the local probability never occurs), unbounded
/// above.
pub fn hour_affinity(local_probability: f64, global_probability: f64) -> f64 {
    local_probability / global_probability.max(GLOBAL_RATE_FLOOR) - 1.0
}

/// Derives the full feature vector for every event in a run.
#[derive(Debug, Clone, Copy)]
pub struct FeatureGenerator {
    indexer: GridIndexer,
}

impl FeatureGenerator {
    pub fn new(indexer: GridIndexer) -> Self {
        Self { indexer }
    }

    /// Map the event set to feature vectors, one per event, in input order.
    pub fn generate(
        &self,
        events: &EventSet,
        baseline: &GlobalBaseline,
        signatures: &FxHashMap<GridKey, LocationSignature>,
        cell_stats: &FxHashMap<GridKey, CellStats>,
    ) -> Vec<FeatureVector> {
        events
            .events()
            .par_iter()
            .map(|event| self.generate_one(event, baseline, signatures, cell_stats))
            .collect()
    }

    /// Derive the feature vector for a single event.
    pub fn generate_one(
        &self,
        event: &StopEvent,
        baseline: &GlobalBaseline,
        signatures: &FxHashMap<GridKey, LocationSignature>,
        cell_stats: &FxHashMap<GridKey, CellStats>,
    ) -> FeatureVector {
        let key = self.indexer.key_for(event.lat, event.lng);
        let stats = cell_stats.get(&key).copied().unwrap_or_default();

        let (hour_sin, hour_cos) = cyclical_encode(event.hour as f64, HOURS_PER_DAY as f64);
        let (dow_sin, dow_cos) = cyclical_encode(event.day_of_week as f64, DAYS_PER_WEEK as f64);

        let mut features = FeatureVector {
            grid_lat: key.lat(),
            grid_lng: key.lng(),
            hour_sin,
            hour_cos,
            dow_sin,
            dow_cos,
            stop_count_grid: stats.stop_count as f64,
            avg_speed_over: stats.avg_speed_over,
            alcohol_pct: stats.alcohol_share,
            accident_pct: stats.accident_share,
            radar_pct: stats.radar_share,
            laser_pct: stats.laser_share,
            is_weekend: is_weekend(event.day_of_week) as u8 as f64,
            is_rush_hour: is_rush_hour(event.hour) as u8 as f64,
            is_night: is_night(event.hour) as u8 as f64,

            // Neutral defaults; overwritten when a signature exists.
            hour_affinity: 0.0,
            day_affinity: 0.0,
            local_hour_zscore: 0.0,
            local_day_zscore: 0.0,
            hour_concentration: 0.0,
            day_concentration: 0.0,
            is_peak_hour: 0.0,
            is_peak_day: 0.0,
            method_radar_pct: 0.0,
            method_laser_pct: 0.0,
            location_strictness: 0.0,
            pattern_significant: 0.0,
            hour_chi2: 0.0,
            hour_pvalue: 1.0,
        };

        if let Some(sig) = signatures.get(&key) {
            let local_hour = sig.hour_distribution[event.hour as usize];
            let local_day = sig.day_distribution[event.day_of_week as usize];

            features.hour_affinity =
                hour_affinity(local_hour, baseline.hour_probability(event.hour));
            features.day_affinity =
                hour_affinity(local_day, baseline.day_probability(event.day_of_week));

            // How unusual is this hour/day relative to the location's own
            // shape, with std floors for degenerate distributions.
            let hour_std = population_std(&sig.hour_distribution).max(HOUR_STD_FLOOR);
            features.local_hour_zscore =
                (local_hour - 1.0 / HOURS_PER_DAY as f64) / hour_std;
            let day_std = population_std(&sig.day_distribution).max(DAY_STD_FLOOR);
            features.local_day_zscore = (local_day - 1.0 / DAYS_PER_WEEK as f64) / day_std;

            features.hour_concentration = sig.hour_concentration;
            features.day_concentration = sig.day_concentration;
            features.is_peak_hour = sig.is_peak_hour(event.hour) as u8 as f64;
            features.is_peak_day = sig.is_peak_day(event.day_of_week) as u8 as f64;
            features.method_radar_pct = sig.method_share("radar");
            features.method_laser_pct = sig.method_share("laser");
            features.location_strictness = sig.strictness_level.encoding();
            features.pattern_significant = sig.is_significant as u8 as f64;
            features.hour_chi2 = sig.hour_chi2;
            features.hour_pvalue = sig.hour_pvalue;
        }

        features
    }
}
