//! Day-of-week pattern discovery.
//!
//! Classifies day-concentrated locations as weekday-heavy, weekend-heavy, or
//! concentrated on one specific day.

use stakeout_core::config::PatternConfig;
use stakeout_core::constants::{DAYS_PER_WEEK, DAY_NAMES, WEEKDAY_HEAVY_SHARE};
use stakeout_core::types::collections::FxHashMap;
use stakeout_core::types::GridKey;

use crate::signatures::LocationSignature;

use super::types::{DiscoveredPattern, PatternLocation, PatternStatistics, PatternType};

/// Discover day-of-week enforcement patterns.
///
/// Only signatures with day concentration at or above the configured gate are
/// considered. The weekend-heavy and specific-day thresholds are empirically
/// chosen constants surfaced through [`PatternConfig`].
pub fn discover(
    signatures: &FxHashMap<GridKey, LocationSignature>,
    config: &PatternConfig,
) -> Vec<DiscoveredPattern> {
    let concentration_min = config.effective_day_concentration_min();
    let weekend_share_min = config.effective_weekend_heavy_share();
    let specific_day_min = config.effective_specific_day_share();
    let min_locations = config.effective_min_locations();

    let mut ordered: Vec<&LocationSignature> = signatures.values().collect();
    ordered.sort_by_key(|sig| sig.grid_id);

    let mut weekday_heavy: Vec<PatternLocation> = Vec::new();
    let mut weekend_heavy: Vec<PatternLocation> = Vec::new();
    let mut specific_days: Vec<Vec<PatternLocation>> = vec![Vec::new(); DAYS_PER_WEEK];

    for sig in &ordered {
        if sig.day_concentration < concentration_min {
            continue;
        }

        let weekday_share: f64 = sig.day_distribution[..5].iter().sum();
        let weekend_share: f64 = sig.day_distribution[5..].iter().sum();
        let location = PatternLocation::with_relevance(sig.grid_id, sig.day_concentration);

        if weekday_share > WEEKDAY_HEAVY_SHARE {
            weekday_heavy.push(location);
        } else if weekend_share > weekend_share_min {
            weekend_heavy.push(location);
        } else {
            let peak_day = peak_day_index(&sig.day_distribution);
            if sig.day_distribution[peak_day] > specific_day_min {
                specific_days[peak_day].push(location);
            }
        }
    }

    let mut patterns = Vec::new();

    if weekday_heavy.len() >= min_locations {
        let count = weekday_heavy.len();
        patterns.push(DiscoveredPattern {
            pattern_id: "weekday_pattern".to_string(),
            pattern_type: PatternType::DayPattern,
            name: "Weekday Enforcement Zone".to_string(),
            description: format!("{count} locations with 85%+ weekday enforcement"),
            location_count: count,
            locations: weekday_heavy,
            confidence: 0.85,
            statistics: PatternStatistics::WeekdayPattern {
                weekday_percentage: WEEKDAY_HEAVY_SHARE,
            },
            insight: format!("{count} locations primarily enforce Monday-Friday."),
        });
    }

    if weekend_heavy.len() >= min_locations {
        let count = weekend_heavy.len();
        patterns.push(DiscoveredPattern {
            pattern_id: "weekend_pattern".to_string(),
            pattern_type: PatternType::DayPattern,
            name: "Weekend Enforcement Zone".to_string(),
            description: format!("{count} locations with elevated weekend enforcement"),
            location_count: count,
            locations: weekend_heavy,
            confidence: 0.80,
            statistics: PatternStatistics::WeekendPattern {
                weekend_elevated: true,
            },
            insight: format!("{count} locations show elevated weekend enforcement."),
        });
    }

    for (day, locations) in specific_days.into_iter().enumerate() {
        if locations.len() < min_locations {
            continue;
        }
        let day_name = DAY_NAMES[day];
        let count = locations.len();
        patterns.push(DiscoveredPattern {
            pattern_id: format!("day_pattern_{}", day_name.to_lowercase()),
            pattern_type: PatternType::DayPattern,
            name: format!("{day_name} Enforcement Pattern"),
            description: format!("{count} locations with concentrated {day_name} enforcement"),
            location_count: count,
            locations,
            confidence: 0.75,
            statistics: PatternStatistics::SpecificDayPattern {
                peak_day: day_name.to_string(),
            },
            insight: format!(
                "{count} locations show significant {day_name} enforcement concentration."
            ),
        });
    }

    patterns
}

/// Index of the highest-probability day, lower index on ties.
fn peak_day_index(day_distribution: &[f64]) -> usize {
    let mut peak = 0;
    for (day, &p) in day_distribution.iter().enumerate() {
        if p > day_distribution[peak] {
            peak = day;
        }
    }
    peak
}
