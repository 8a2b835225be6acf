//! Discovered pattern records.

use std::fmt;

use serde::Serialize;

use stakeout_core::types::GridKey;

/// Category of a discovered pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    TimeCluster,
    MethodZone,
    DayPattern,
    QuotaEffect,
}

/// One member location of a pattern.
///
/// `relevance` carries the per-type member value (method share, day
/// concentration, quota effect); omitted where the pattern type has none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternLocation {
    pub grid_id: GridKey,
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
}

impl PatternLocation {
    pub fn new(grid_id: GridKey) -> Self {
        Self {
            grid_id,
            lat: grid_id.lat(),
            lng: grid_id.lng(),
            relevance: None,
        }
    }

    pub fn with_relevance(grid_id: GridKey, relevance: f64) -> Self {
        Self {
            relevance: Some(relevance),
            ..Self::new(grid_id)
        }
    }
}

/// Per-type statistics payload attached to a pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PatternStatistics {
    TimeCluster {
        avg_hour_distribution: Vec<f64>,
        peak_hours: Vec<u8>,
        concentration: f64,
        cluster_size: usize,
    },
    MethodZone {
        method: String,
        avg_percentage: f64,
        zone_size: usize,
    },
    WeekdayPattern {
        weekday_percentage: f64,
    },
    WeekendPattern {
        weekend_elevated: bool,
    },
    SpecificDayPattern {
        peak_day: String,
    },
    QuotaEffect {
        chi2: f64,
        pvalue: f64,
        effect_size: f64,
        early_daily_avg: f64,
        late_daily_avg: f64,
    },
}

/// A cross-location regularity or dataset-wide statistical effect.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveredPattern {
    pub pattern_id: String,
    pub pattern_type: PatternType,
    pub name: String,
    pub description: String,
    pub location_count: usize,
    pub locations: Vec<PatternLocation>,
    pub confidence: f64,
    pub statistics: PatternStatistics,
    pub insight: String,
}

/// Per-category counts for one discovery run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiscoverySummary {
    pub total_patterns: usize,
    pub time_clusters: usize,
    pub method_zones: usize,
    pub day_patterns: usize,
    pub quota_effect_detected: bool,
    pub total_anomalies: usize,
}

impl fmt::Display for DiscoverySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} patterns ({} time clusters, {} method zones, {} day patterns, quota effect: {}), {} anomalies",
            self.total_patterns,
            self.time_clusters,
            self.method_zones,
            self.day_patterns,
            if self.quota_effect_detected { "yes" } else { "no" },
            self.total_anomalies,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_without_relevance_omits_field() {
        let key = GridKey::from_degrees(38.895, -77.036, 0.001);
        let json = serde_json::to_value(PatternLocation::new(key)).unwrap();
        assert!(json.get("relevance").is_none());
        assert_eq!(json["grid_id"], "38.895_-77.036");

        let json = serde_json::to_value(PatternLocation::with_relevance(key, 0.8)).unwrap();
        assert_eq!(json["relevance"], 0.8);
    }

    #[test]
    fn pattern_type_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&PatternType::TimeCluster).unwrap(),
            "\"time_cluster\""
        );
        assert_eq!(
            serde_json::to_string(&PatternType::QuotaEffect).unwrap(),
            "\"quota_effect\""
        );
    }

    #[test]
    fn summary_display_reads_naturally() {
        let summary = DiscoverySummary {
            total_patterns: 4,
            time_clusters: 2,
            method_zones: 1,
            day_patterns: 1,
            quota_effect_detected: false,
            total_anomalies: 7,
        };
        assert_eq!(
            summary.to_string(),
            "4 patterns (2 time clusters, 1 method zones, 1 day patterns, quota effect: no), 7 anomalies"
        );
    }
}
