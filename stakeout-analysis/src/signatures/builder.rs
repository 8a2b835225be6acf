//! Per-cell signature construction.

use rayon::prelude::*;

use stakeout_core::config::SignatureConfig;
use stakeout_core::constants::{
    DAYS_PER_WEEK, HOURS_PER_DAY, LENIENT_SEVERITY_RATIO, SIGNATURE_PEAK_COUNT,
    STRICT_SEVERITY_RATIO, UNIFORM_WEEKDAY_RATIO,
};
use stakeout_core::types::collections::{BTreeMap, FxHashMap, SmallVec4};
use stakeout_core::types::{EventSet, GridKey, StopEvent};

use crate::baseline::GlobalBaseline;
use crate::stats::{concentration, round_to, test_temporal_significance};

use super::insight::{generate_insight, InsightContext};
use super::types::{LocationSignature, Strictness};

/// Builds one signature per qualifying grid cell.
#[derive(Debug, Clone, Copy)]
pub struct SignatureBuilder {
    min_stops: usize,
}

impl SignatureBuilder {
    pub fn new(min_stops: usize) -> Self {
        Self { min_stops }
    }

    pub fn from_config(config: &SignatureConfig) -> Self {
        Self::new(config.effective_min_stops())
    }

    pub fn min_stops(&self) -> usize {
        self.min_stops
    }

    /// Build signatures for every cell meeting the minimum event count.
    ///
    /// Cells are independent given the baseline, so the build is a parallel
    /// map over the partition, merged into one read-only map.
    pub fn build_all(
        &self,
        events: &EventSet,
        partition: &FxHashMap<GridKey, Vec<usize>>,
        baseline: &GlobalBaseline,
    ) -> FxHashMap<GridKey, LocationSignature> {
        partition
            .par_iter()
            .filter(|(_, indices)| indices.len() >= self.min_stops)
            .map(|(key, indices)| (*key, self.build_cell(*key, events, indices, baseline)))
            .collect()
    }

    /// Build the signature for a single cell.
    pub fn build_cell(
        &self,
        key: GridKey,
        events: &EventSet,
        indices: &[usize],
        baseline: &GlobalBaseline,
    ) -> LocationSignature {
        let all = events.events();
        let total_stops = indices.len();
        let total = total_stops as f64;

        let mut hour_counts = [0.0f64; HOURS_PER_DAY];
        let mut day_counts = [0.0f64; DAYS_PER_WEEK];
        // Method counts in first-encounter order; that order breaks dominance
        // ties deterministically.
        let mut method_counts: Vec<(String, usize)> = Vec::new();
        let mut severity_values: Vec<f64> = Vec::new();

        for &idx in indices {
            let event: &StopEvent = &all[idx];
            hour_counts[event.hour as usize] += 1.0;
            day_counts[event.day_of_week as usize] += 1.0;
            match method_counts
                .iter_mut()
                .find(|(m, _)| m == &event.detection_method)
            {
                Some((_, count)) => *count += 1,
                None => method_counts.push((event.detection_method.clone(), 1)),
            }
            if let Some(speed_over) = event.speed_over {
                severity_values.push(speed_over);
            }
        }

        let hour_distribution: Vec<f64> = hour_counts.iter().map(|c| c / total).collect();
        let day_distribution: Vec<f64> = day_counts.iter().map(|c| c / total).collect();

        let peak_hours = top_indices(&hour_distribution, SIGNATURE_PEAK_COUNT);
        let peak_days = top_indices(&day_distribution, SIGNATURE_PEAK_COUNT);

        let hour_concentration = concentration(&hour_distribution, HOURS_PER_DAY);
        let day_concentration = concentration(&day_distribution, DAYS_PER_WEEK);

        let weekday_ratio = if total > 0.0 {
            day_counts[..5].iter().sum::<f64>() / total
        } else {
            UNIFORM_WEEKDAY_RATIO
        };

        let method_distribution: BTreeMap<String, f64> = method_counts
            .iter()
            .map(|(m, c)| (m.clone(), *c as f64 / total))
            .collect();
        let primary_method = dominant_method(&method_counts);

        let cell_mean = if severity_values.is_empty() {
            None
        } else {
            Some(severity_values.iter().sum::<f64>() / severity_values.len() as f64)
        };
        let cell_min = severity_values.iter().copied().fold(f64::INFINITY, f64::min);
        let strictness = Strictness::classify(
            cell_mean,
            baseline.mean_severity(),
            STRICT_SEVERITY_RATIO,
            LENIENT_SEVERITY_RATIO,
        );

        let hour_test = test_temporal_significance(&hour_counts);
        let day_test = test_temporal_significance(&day_counts);
        let is_significant = hour_test.is_significant || day_test.is_significant;

        let avg_speed_over = cell_mean.unwrap_or(0.0);
        let insight = generate_insight(&InsightContext {
            peak_hours: &peak_hours,
            peak_days: &peak_days,
            hour_concentration,
            primary_method: &primary_method,
            strictness,
            avg_speed_over,
            is_significant,
            hour_pvalue: hour_test.p_value,
        });

        LocationSignature {
            grid_id: key,
            lat: key.lat(),
            lng: key.lng(),
            total_stops,
            hour_distribution,
            day_distribution,
            peak_hours,
            peak_days,
            hour_concentration,
            day_concentration,
            weekday_ratio,
            primary_method,
            method_distribution,
            avg_speed_over: round_to(avg_speed_over, 1),
            min_speed_over: if cell_min.is_finite() {
                round_to(cell_min, 1)
            } else {
                0.0
            },
            strictness_level: strictness,
            hour_chi2: hour_test.chi2,
            hour_pvalue: hour_test.p_value,
            day_chi2: day_test.chi2,
            day_pvalue: day_test.p_value,
            is_significant,
            insight,
        }
    }
}

/// Indices of the `count` highest probabilities, descending.
///
/// The sort is stable, so ties (zero-probability bins included) resolve to
/// the lower index; identical input always yields identical peak lists.
fn top_indices(distribution: &[f64], count: usize) -> SmallVec4<u8> {
    let mut indexed: Vec<(usize, f64)> = distribution.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
    indexed.iter().take(count).map(|(i, _)| *i as u8).collect()
}

/// Highest-count method; ties keep the first-encountered method.
fn dominant_method(method_counts: &[(String, usize)]) -> String {
    let mut best: Option<(&str, usize)> = None;
    for (method, count) in method_counts {
        match best {
            Some((_, best_count)) if *count <= best_count => {}
            _ => best = Some((method, *count)),
        }
    }
    best.map(|(m, _)| m.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
