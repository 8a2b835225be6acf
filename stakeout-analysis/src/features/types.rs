//! The per-event feature vector.

use serde::Serialize;

use super::columns::FEATURE_COLUMNS;

/// One row of the training matrix, derived from a single event.
///
/// Field order mirrors [`FEATURE_COLUMNS`]; `as_row` is the ordered numeric
/// view the model-training collaborator consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    // Base spatial/temporal/contextual features
    pub grid_lat: f64,
    pub grid_lng: f64,
    pub hour_sin: f64,
    pub hour_cos: f64,
    pub dow_sin: f64,
    pub dow_cos: f64,
    pub stop_count_grid: f64,
    pub avg_speed_over: f64,
    pub alcohol_pct: f64,
    pub accident_pct: f64,
    pub radar_pct: f64,
    pub laser_pct: f64,
    pub is_weekend: f64,
    pub is_rush_hour: f64,
    pub is_night: f64,

    // Interaction features against baseline and signature
    pub hour_affinity: f64,
    pub day_affinity: f64,
    pub local_hour_zscore: f64,
    pub local_day_zscore: f64,
    pub hour_concentration: f64,
    pub day_concentration: f64,
    pub is_peak_hour: f64,
    pub is_peak_day: f64,
    pub method_radar_pct: f64,
    pub method_laser_pct: f64,
    pub location_strictness: f64,

    // Statistical significance features
    pub pattern_significant: f64,
    pub hour_chi2: f64,
    pub hour_pvalue: f64,
}

impl FeatureVector {
    /// The vector as an ordered row matching [`FEATURE_COLUMNS`].
    pub fn as_row(&self) -> [f64; FEATURE_COLUMNS.len()] {
        [
            self.grid_lat,
            self.grid_lng,
            self.hour_sin,
            self.hour_cos,
            self.dow_sin,
            self.dow_cos,
            self.stop_count_grid,
            self.avg_speed_over,
            self.alcohol_pct,
            self.accident_pct,
            self.radar_pct,
            self.laser_pct,
            self.is_weekend,
            self.is_rush_hour,
            self.is_night,
            self.hour_affinity,
            self.day_affinity,
            self.local_hour_zscore,
            self.local_day_zscore,
            self.hour_concentration,
            self.day_concentration,
            self.is_peak_hour,
            self.is_peak_day,
            self.method_radar_pct,
            self.method_laser_pct,
            self.location_strictness,
            self.pattern_significant,
            self.hour_chi2,
            self.hour_pvalue,
        ]
    }
}
