//! The fixed feature-column contract.
//!
//! The external model-training collaborator consumes this list verbatim as
//! its training matrix schema; order is part of the contract.

/// Base spatial, temporal, and contextual columns.
pub const BASE_COLUMNS: &[&str] = &[
    "grid_lat",
    "grid_lng",
    "hour_sin",
    "hour_cos",
    "dow_sin",
    "dow_cos",
    "stop_count_grid",
    "avg_speed_over",
    "alcohol_pct",
    "accident_pct",
    "radar_pct",
    "laser_pct",
    "is_weekend",
    "is_rush_hour",
    "is_night",
];

/// Location-aware interaction columns.
pub const INTERACTION_COLUMNS: &[&str] = &[
    "hour_affinity",
    "day_affinity",
    "local_hour_zscore",
    "local_day_zscore",
    "hour_concentration",
    "day_concentration",
    "is_peak_hour",
    "is_peak_day",
    "method_radar_pct",
    "method_laser_pct",
    "location_strictness",
];

/// Statistical significance columns.
pub const STATISTICAL_COLUMNS: &[&str] = &["pattern_significant", "hour_chi2", "hour_pvalue"];

/// All feature columns in matrix order: base, interaction, statistical.
pub const FEATURE_COLUMNS: &[&str] = &[
    "grid_lat",
    "grid_lng",
    "hour_sin",
    "hour_cos",
    "dow_sin",
    "dow_cos",
    "stop_count_grid",
    "avg_speed_over",
    "alcohol_pct",
    "accident_pct",
    "radar_pct",
    "laser_pct",
    "is_weekend",
    "is_rush_hour",
    "is_night",
    "hour_affinity",
    "day_affinity",
    "local_hour_zscore",
    "local_day_zscore",
    "hour_concentration",
    "day_concentration",
    "is_peak_hour",
    "is_peak_day",
    "method_radar_pct",
    "method_laser_pct",
    "location_strictness",
    "pattern_significant",
    "hour_chi2",
    "hour_pvalue",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_list_is_base_then_interaction_then_statistical() {
        let composed: Vec<&str> = BASE_COLUMNS
            .iter()
            .chain(INTERACTION_COLUMNS)
            .chain(STATISTICAL_COLUMNS)
            .copied()
            .collect();
        assert_eq!(composed, FEATURE_COLUMNS);
    }

    #[test]
    fn no_duplicate_columns() {
        let mut seen = std::collections::HashSet::new();
        for col in FEATURE_COLUMNS {
            assert!(seen.insert(col), "duplicate column {col}");
        }
    }
}
