//! Detection-method zone discovery.
//!
//! Groups locations where a single detection method dominates, one pattern
//! per method family with enough members.

use stakeout_core::types::collections::FxHashMap;
use stakeout_core::types::GridKey;

use crate::signatures::LocationSignature;
use crate::stats::round_to;

use super::types::{DiscoveredPattern, PatternLocation, PatternStatistics, PatternType};

/// Method families a zone can form around. Anything else folds into "other".
const METHOD_FAMILIES: [&str; 4] = ["radar", "laser", "vascar", "other"];

/// Discover method-dominant zones.
///
/// A location joins a family group when that method's share meets
/// `share_threshold`; groups below `min_zone_size` members are dropped.
pub fn discover(
    signatures: &FxHashMap<GridKey, LocationSignature>,
    share_threshold: f64,
    min_zone_size: usize,
) -> Vec<DiscoveredPattern> {
    let mut ordered: Vec<&LocationSignature> = signatures.values().collect();
    ordered.sort_by_key(|sig| sig.grid_id);

    let mut groups: FxHashMap<&str, Vec<PatternLocation>> = FxHashMap::default();
    for sig in &ordered {
        for (method, &share) in &sig.method_distribution {
            if share < share_threshold {
                continue;
            }
            let family = METHOD_FAMILIES
                .iter()
                .find(|&&f| f == method.to_lowercase())
                .copied()
                .unwrap_or("other");
            groups
                .entry(family)
                .or_default()
                .push(PatternLocation::with_relevance(sig.grid_id, share));
        }
    }

    let mut patterns = Vec::new();
    for family in METHOD_FAMILIES {
        let Some(locations) = groups.remove(family) else {
            continue;
        };
        if locations.len() < min_zone_size {
            continue;
        }

        let avg_share = locations
            .iter()
            .filter_map(|l| l.relevance)
            .sum::<f64>()
            / locations.len() as f64;
        let size = locations.len();
        let pct = (avg_share * 100.0) as i64;
        let title = title_case(family);

        patterns.push(DiscoveredPattern {
            pattern_id: format!("method_zone_{family}"),
            pattern_type: PatternType::MethodZone,
            name: format!("{title} Detection Zone"),
            description: format!("{size} locations with {pct}%+ {family} detection"),
            location_count: size,
            locations,
            confidence: avg_share.min(0.95),
            statistics: PatternStatistics::MethodZone {
                method: family.to_string(),
                avg_percentage: round_to(avg_share, 3),
                zone_size: size,
            },
            insight: format!(
                "Concentrated {family} enforcement zone: {size} locations averaging {pct}% {family} detection."
            ),
        });
    }

    patterns
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
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

    /// Cells dominated by the given method plus a mixed cell.
    fn signatures_with(method: &str, dominant_cells: usize) -> FxHashMap<GridKey, LocationSignature> {
        let base = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let mut events = Vec::new();
        for c in 0..dominant_cells {
            let lat = 38.0 + c as f64 * 0.01;
            for i in 0..10 {
                let ts = base + Duration::days(i) + Duration::hours(8);
                let m = if i < 8 { method } else { "unknown" };
                events.push(StopEvent::new(lat, -77.0, ts, m).unwrap());
            }
        }
        // Mixed cell: no method reaches the threshold.
        for i in 0..10 {
            let ts = base + Duration::days(i) + Duration::hours(8);
            let m = if i % 2 == 0 { "radar" } else { "laser" };
            events.push(StopEvent::new(40.0, -77.0, ts, m).unwrap());
        }
        let events = EventSet::from_events(events).unwrap();
        let indexer = GridIndexer::new(0.001);
        let partition = indexer.partition(&events);
        let baseline = GlobalBaseline::compute(&events);
        SignatureBuilder::new(10).build_all(&events, &partition, &baseline)
    }

    #[test]
    fn dominant_method_forms_a_zone() {
        let signatures = signatures_with("radar", 4);
        let patterns = discover(&signatures, 0.7, 3);
        assert_eq!(patterns.len(), 1);

        let zone = &patterns[0];
        assert_eq!(zone.pattern_id, "method_zone_radar");
        assert_eq!(zone.name, "Radar Detection Zone");
        assert_eq!(zone.location_count, 4);
        assert!((zone.confidence - 0.8).abs() < 1e-9);
        for loc in &zone.locations {
            assert_eq!(loc.relevance, Some(0.8));
        }
    }

    #[test]
    fn small_groups_are_dropped() {
        let signatures = signatures_with("laser", 2);
        assert!(discover(&signatures, 0.7, 3).is_empty());
    }

    #[test]
    fn unrecognized_methods_fold_into_other() {
        let signatures = signatures_with("lidar", 3);
        let patterns = discover(&signatures, 0.7, 3);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].pattern_id, "method_zone_other");
    }
}
