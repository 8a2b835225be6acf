//! Temporal clustering of location signatures.
//!
//! Groups locations whose 24-hour enforcement shapes are similar, naming each
//! surviving cluster after its peak time-of-day window.

use stakeout_core::constants::{HOURS_PER_DAY, KMEANS_SEED};
use stakeout_core::types::collections::FxHashMap;
use stakeout_core::types::GridKey;

use crate::signatures::LocationSignature;
use crate::stats::{concentration, round_to};

use super::kmeans::{self, standardize};
use super::types::{DiscoveredPattern, PatternLocation, PatternStatistics, PatternType};

/// Discover clusters of locations with similar hour distributions.
///
/// Signatures are clustered on standardized hour distributions with a fixed
/// seed; clusters below `min_cluster_size` members are dropped.
pub fn discover(
    signatures: &FxHashMap<GridKey, LocationSignature>,
    n_clusters: usize,
    min_cluster_size: usize,
) -> Vec<DiscoveredPattern> {
    if signatures.len() < n_clusters {
        return Vec::new();
    }

    // Deterministic row order: GridKey sorts by (lat, lng).
    let mut ordered: Vec<&LocationSignature> = signatures.values().collect();
    ordered.sort_by_key(|sig| sig.grid_id);

    let rows: Vec<Vec<f64>> = ordered.iter().map(|s| s.hour_distribution.clone()).collect();
    let scaled = standardize(&rows);
    let result = kmeans::cluster(&scaled, n_clusters, KMEANS_SEED);

    let mut patterns = Vec::new();
    for cluster_id in 0..n_clusters {
        let members: Vec<usize> = result
            .assignments
            .iter()
            .enumerate()
            .filter(|(_, &a)| a == cluster_id)
            .map(|(i, _)| i)
            .collect();
        if members.len() < min_cluster_size {
            continue;
        }

        // Mean of the raw (unstandardized) hour distributions.
        let mut avg_hour_dist = vec![0.0f64; HOURS_PER_DAY];
        for &i in &members {
            for (h, &p) in rows[i].iter().enumerate() {
                avg_hour_dist[h] += p;
            }
        }
        for p in &mut avg_hour_dist {
            *p /= members.len() as f64;
        }

        let peak_hours = top_hours(&avg_hour_dist, 3);
        let peak_hour = peak_hours[0];
        let cluster_concentration = concentration(&avg_hour_dist, HOURS_PER_DAY);
        let window = time_of_day_name(peak_hour);

        let locations: Vec<PatternLocation> = members
            .iter()
            .map(|&i| PatternLocation::new(ordered[i].grid_id))
            .collect();
        let size = locations.len();
        let pct = (cluster_concentration * 100.0) as i64;

        patterns.push(DiscoveredPattern {
            pattern_id: format!("time_cluster_{cluster_id}"),
            pattern_type: PatternType::TimeCluster,
            name: format!("{window} Rush Cluster"),
            description: format!(
                "{size} locations with {pct}%+ stops during {peak_hour}:00-{}:00",
                peak_hour + 1
            ),
            location_count: size,
            locations,
            confidence: (0.5 + cluster_concentration * 0.5).min(0.95),
            statistics: PatternStatistics::TimeCluster {
                avg_hour_distribution: avg_hour_dist,
                peak_hours: peak_hours.clone(),
                concentration: round_to(cluster_concentration, 3),
                cluster_size: size,
            },
            insight: format!(
                "{size} locations show concentrated enforcement at {}. Average concentration: {pct}%.",
                format_hours(&peak_hours[..2])
            ),
        });
    }

    patterns
}

/// Named time-of-day bucket for a peak hour.
fn time_of_day_name(hour: u8) -> &'static str {
    match hour {
        6..=9 => "Morning",
        10..=13 => "Midday",
        14..=17 => "Afternoon",
        18..=21 => "Evening",
        _ => "Night",
    }
}

/// Top hours by average probability, stable on ties.
fn top_hours(distribution: &[f64], count: usize) -> Vec<u8> {
    let mut indexed: Vec<(usize, f64)> = distribution.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
    indexed.iter().take(count).map(|(h, _)| *h as u8).collect()
}

fn format_hours(hours: &[u8]) -> String {
    if hours.is_empty() {
        return String::new();
    }
    let mut sorted = hours.to_vec();
    sorted.sort_unstable();
    if sorted.len() == 1 {
        format!("{}:00", sorted[0])
    } else {
        format!("{}:00-{}:00", sorted[0], sorted[sorted.len() - 1] + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::GlobalBaseline;
    use crate::grid::GridIndexer;
    use crate::signatures::SignatureBuilder;
    use chrono::{Duration, TimeZone, Utc};
    use stakeout_core::types::{EventSet, StopEvent};

    /// Build signatures for synthetic cells: half peaking at 8:00, half at 20:00.
    fn synthetic_signatures(cells_per_shape: usize) -> FxHashMap<GridKey, LocationSignature> {
        let base = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let mut events = Vec::new();
        for c in 0..cells_per_shape {
            let lat = 38.0 + c as f64 * 0.01;
            for i in 0..12 {
                let ts = base + Duration::days(i % 28) + Duration::hours(8);
                events.push(StopEvent::new(lat, -77.0, ts, "radar").unwrap());
            }
            let lat = 39.0 + c as f64 * 0.01;
            for i in 0..12 {
                let ts = base + Duration::days(i % 28) + Duration::hours(20);
                events.push(StopEvent::new(lat, -77.0, ts, "radar").unwrap());
            }
        }
        let events = EventSet::from_events(events).unwrap();
        let indexer = GridIndexer::new(0.001);
        let partition = indexer.partition(&events);
        let baseline = GlobalBaseline::compute(&events);
        SignatureBuilder::new(10).build_all(&events, &partition, &baseline)
    }

    #[test]
    fn too_few_signatures_yields_no_clusters() {
        let signatures = synthetic_signatures(2);
        assert!(discover(&signatures, 5, 3).is_empty());
    }

    #[test]
    fn finds_morning_and_evening_clusters() {
        let signatures = synthetic_signatures(5);
        let patterns = discover(&signatures, 2, 3);
        assert!(!patterns.is_empty());

        let names: Vec<&str> = patterns.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"Morning Rush Cluster"));
        assert!(names.contains(&"Evening Rush Cluster"));
        for pattern in &patterns {
            assert!(pattern.location_count >= 3);
            assert!(pattern.confidence <= 0.95);
            assert_eq!(pattern.location_count, pattern.locations.len());
        }
    }

    #[test]
    fn discovery_is_deterministic() {
        let signatures = synthetic_signatures(4);
        let a = discover(&signatures, 3, 3);
        let b = discover(&signatures, 3, 3);
        let ids_a: Vec<&str> = a.iter().map(|p| p.pattern_id.as_str()).collect();
        let ids_b: Vec<&str> = b.iter().map(|p| p.pattern_id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.locations, y.locations);
            assert_eq!(x.insight, y.insight);
        }
    }

    #[test]
    fn time_of_day_buckets() {
        assert_eq!(time_of_day_name(7), "Morning");
        assert_eq!(time_of_day_name(12), "Midday");
        assert_eq!(time_of_day_name(15), "Afternoon");
        assert_eq!(time_of_day_name(19), "Evening");
        assert_eq!(time_of_day_name(23), "Night");
        assert_eq!(time_of_day_name(3), "Night");
    }
}
