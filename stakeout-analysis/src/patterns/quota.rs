//! End-of-month quota-effect test.
//!
//! Chi-square test of early-month (days 1-20) versus late-month (days 21-31)
//! stop counts against a days-proportional null, with a relative daily-rate
//! effect size. A pattern is emitted only when both the test is significant
//! and the effect size is material.

use stakeout_core::constants::{
    QUOTA_EARLY_CUTOFF, QUOTA_EARLY_DAYS, QUOTA_EFFECT_MIN, QUOTA_LATE_DAYS,
    QUOTA_LOCATION_EARLY_MIN, QUOTA_LOCATION_EFFECT_MIN, QUOTA_LOCATION_LATE_MIN,
    QUOTA_MONTH_DAYS, QUOTA_TOP_LOCATIONS, SIGNIFICANCE_ALPHA,
};
use stakeout_core::types::collections::FxHashMap;
use stakeout_core::types::{EventSet, GridKey};

use crate::grid::GridIndexer;
use crate::stats::{chi_square_p_value, round_to};

use super::types::{DiscoveredPattern, PatternLocation, PatternStatistics, PatternType};

/// Test for an end-of-month enforcement increase.
///
/// Returns a pattern only when p < 0.05 and the late-period daily average
/// exceeds the early-period average by more than 10%. The pattern ranks the
/// strongest per-location effects, top 10 descending.
pub fn test_quota_effect(events: &EventSet, indexer: &GridIndexer) -> Option<DiscoveredPattern> {
    let mut early_count = 0usize;
    let mut late_count = 0usize;
    let mut per_cell: FxHashMap<GridKey, (usize, usize)> = FxHashMap::default();

    for event in events {
        let key = indexer.key_for(event.lat, event.lng);
        let cell = per_cell.entry(key).or_default();
        if event.day_of_month <= QUOTA_EARLY_CUTOFF {
            early_count += 1;
            cell.0 += 1;
        } else {
            late_count += 1;
            cell.1 += 1;
        }
    }

    let total = (early_count + late_count) as f64;
    if total == 0.0 {
        return None;
    }

    // Null: counts proportional to days in each bucket (20/31 vs 11/31).
    let expected_early = total * (QUOTA_EARLY_DAYS / QUOTA_MONTH_DAYS);
    let expected_late = total * (QUOTA_LATE_DAYS / QUOTA_MONTH_DAYS);
    let chi2 = (early_count as f64 - expected_early).powi(2) / expected_early
        + (late_count as f64 - expected_late).powi(2) / expected_late;
    let p_value = chi_square_p_value(chi2, 1.0);

    let early_daily = early_count as f64 / QUOTA_EARLY_DAYS;
    let late_daily = late_count as f64 / QUOTA_LATE_DAYS;
    let effect_size = if early_daily > 0.0 {
        (late_daily - early_daily) / early_daily
    } else {
        0.0
    };

    if p_value >= SIGNIFICANCE_ALPHA || effect_size <= QUOTA_EFFECT_MIN {
        return None;
    }

    // Rank per-location effects for cells with enough data in both windows.
    let mut location_effects: Vec<PatternLocation> = per_cell
        .iter()
        .filter(|(_, &(early, late))| {
            early > QUOTA_LOCATION_EARLY_MIN && late > QUOTA_LOCATION_LATE_MIN
        })
        .filter_map(|(key, &(early, late))| {
            let effect =
                (late as f64 / QUOTA_LATE_DAYS) / (early as f64 / QUOTA_EARLY_DAYS) - 1.0;
            (effect > QUOTA_LOCATION_EFFECT_MIN)
                .then(|| PatternLocation::with_relevance(*key, effect))
        })
        .collect();
    location_effects.sort_by(|a, b| {
        b.relevance
            .unwrap_or(0.0)
            .total_cmp(&a.relevance.unwrap_or(0.0))
            .then_with(|| a.grid_id.cmp(&b.grid_id))
    });
    let affected = location_effects.len();
    location_effects.truncate(QUOTA_TOP_LOCATIONS);

    let effect_pct = (effect_size * 100.0) as i64;
    Some(DiscoveredPattern {
        pattern_id: "quota_effect".to_string(),
        pattern_type: PatternType::QuotaEffect,
        name: "End-of-Month Enforcement Spike".to_string(),
        description: format!("{affected} locations show {effect_pct}%+ increase on days 21-31"),
        location_count: affected,
        locations: location_effects,
        confidence: 1.0 - p_value,
        statistics: PatternStatistics::QuotaEffect {
            chi2: round_to(chi2, 2),
            pvalue: round_to(p_value, 4),
            effect_size: round_to(effect_size, 3),
            early_daily_avg: round_to(early_daily, 1),
            late_daily_avg: round_to(late_daily, 1),
        },
        insight: format!(
            "Statistical evidence of quota effect: {effect_pct}% more stops per day in final 11 days of month (p={p_value:.4})."
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use stakeout_core::types::StopEvent;

    fn event_on_day(lat: f64, day: u32) -> StopEvent {
        let ts = Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap();
        StopEvent::new(lat, -77.0, ts, "radar").unwrap()
    }

    #[test]
    fn uniform_daily_rate_yields_no_pattern() {
        // 20 stops every day of a 31-day month: counts match the
        // days-proportional null exactly.
        let mut events = Vec::new();
        for day in 1..=31 {
            for i in 0..20 {
                events.push(event_on_day(38.0 + i as f64 * 0.01, day));
            }
        }
        let events = EventSet::from_events(events).unwrap();
        let indexer = GridIndexer::new(0.001);
        assert!(test_quota_effect(&events, &indexer).is_none());
    }

    #[test]
    fn balanced_halves_yield_no_pattern() {
        // 600 events in each half of a 30-day month, 40 per day: the daily
        // rate is uniform, so neither gate should fire.
        let mut events = Vec::new();
        for i in 0..600usize {
            events.push(event_on_day(38.0 + (i % 5) as f64 * 0.01, 1 + (i % 15) as u32));
            events.push(event_on_day(38.0 + (i % 5) as f64 * 0.01, 16 + (i % 15) as u32));
        }
        let events = EventSet::from_events(events).unwrap();
        let indexer = GridIndexer::new(0.001);
        assert!(test_quota_effect(&events, &indexer).is_none());
    }

    #[test]
    fn strong_late_month_surge_is_detected() {
        let mut events = Vec::new();
        // 5 events/day early, 15 events/day late across 4 cells.
        for day in 1..=20 {
            for i in 0..5 {
                events.push(event_on_day(38.0 + (i % 4) as f64 * 0.01, day));
            }
        }
        for day in 21..=31 {
            for i in 0..15 {
                events.push(event_on_day(38.0 + (i % 4) as f64 * 0.01, day));
            }
        }
        let events = EventSet::from_events(events).unwrap();
        let indexer = GridIndexer::new(0.001);
        let pattern = test_quota_effect(&events, &indexer).expect("quota effect");

        assert_eq!(pattern.pattern_id, "quota_effect");
        assert!(pattern.confidence > 0.95);
        assert!(pattern.location_count > 0);
        assert!(pattern.locations.len() <= QUOTA_TOP_LOCATIONS);
        // Ranked descending by per-location effect.
        let effects: Vec<f64> = pattern
            .locations
            .iter()
            .map(|l| l.relevance.unwrap())
            .collect();
        assert!(effects.windows(2).all(|w| w[0] >= w[1]));

        let PatternStatistics::QuotaEffect {
            effect_size,
            early_daily_avg,
            late_daily_avg,
            ..
        } = pattern.statistics
        else {
            panic!("wrong statistics payload");
        };
        assert!(effect_size > 0.10);
        assert!(late_daily_avg > early_daily_avg);
    }
}
