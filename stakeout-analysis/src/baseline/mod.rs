//! Global temporal baselines.
//!
//! Dataset-wide hour-of-day and day-of-week distributions, the "expected
//! under no location effect" reference shared by every downstream component,
//! plus the global mean severity used by the strictness rule.

use stakeout_core::constants::{DAYS_PER_WEEK, DEFAULT_GLOBAL_SEVERITY, HOURS_PER_DAY};
use stakeout_core::types::EventSet;

/// Global temporal distributions computed once per analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalBaseline {
    hour_distribution: [f64; HOURS_PER_DAY],
    day_distribution: [f64; DAYS_PER_WEEK],
    mean_severity: f64,
}

impl GlobalBaseline {
    /// Compute the baseline over the full event set.
    ///
    /// With no recorded severity anywhere, the mean severity falls back to a
    /// fixed default so the strictness rule stays total.
    pub fn compute(events: &EventSet) -> Self {
        let mut hour_counts = [0.0f64; HOURS_PER_DAY];
        let mut day_counts = [0.0f64; DAYS_PER_WEEK];
        let mut severity_sum = 0.0;
        let mut severity_count = 0usize;

        for event in events {
            hour_counts[event.hour as usize] += 1.0;
            day_counts[event.day_of_week as usize] += 1.0;
            if let Some(speed_over) = event.speed_over {
                severity_sum += speed_over;
                severity_count += 1;
            }
        }

        let total = events.len() as f64;
        let hour_distribution = if total > 0.0 {
            hour_counts.map(|c| c / total)
        } else {
            [1.0 / HOURS_PER_DAY as f64; HOURS_PER_DAY]
        };
        let day_distribution = if total > 0.0 {
            day_counts.map(|c| c / total)
        } else {
            [1.0 / DAYS_PER_WEEK as f64; DAYS_PER_WEEK]
        };

        Self {
            hour_distribution,
            day_distribution,
            mean_severity: if severity_count > 0 {
                severity_sum / severity_count as f64
            } else {
                DEFAULT_GLOBAL_SEVERITY
            },
        }
    }

    pub fn hour_distribution(&self) -> &[f64; HOURS_PER_DAY] {
        &self.hour_distribution
    }

    pub fn day_distribution(&self) -> &[f64; DAYS_PER_WEEK] {
        &self.day_distribution
    }

    /// Global probability of a stop at this hour.
    pub fn hour_probability(&self, hour: u8) -> f64 {
        self.hour_distribution
            .get(hour as usize)
            .copied()
            .unwrap_or(1.0 / HOURS_PER_DAY as f64)
    }

    /// Global probability of a stop on this day of week.
    pub fn day_probability(&self, day_of_week: u8) -> f64 {
        self.day_distribution
            .get(day_of_week as usize)
            .copied()
            .unwrap_or(1.0 / DAYS_PER_WEEK as f64)
    }

    /// Dataset-wide mean severity.
    pub fn mean_severity(&self) -> f64 {
        self.mean_severity
    }
}
