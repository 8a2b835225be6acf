//! The canonical location signature record.

use serde::Serialize;

use stakeout_core::types::collections::{BTreeMap, SmallVec4};
use stakeout_core::types::GridKey;

/// How strictly a location enforces relative to the global mean severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Strict,
    Moderate,
    Lenient,
}

impl Strictness {
    /// Numeric encoding for the feature matrix: strict -1, moderate 0,
    /// lenient 1.
    pub fn encoding(&self) -> f64 {
        match self {
            Self::Strict => -1.0,
            Self::Moderate => 0.0,
            Self::Lenient => 1.0,
        }
    }

    /// Classify a cell mean against the global mean severity.
    ///
    /// A cell with no severity values at all reads as moderate.
    pub fn classify(cell_mean: Option<f64>, global_mean: f64, strict_ratio: f64, lenient_ratio: f64) -> Self {
        match cell_mean {
            Some(mean) if mean < global_mean * strict_ratio => Self::Strict,
            Some(mean) if mean > global_mean * lenient_ratio => Self::Lenient,
            _ => Self::Moderate,
        }
    }
}

/// Complete statistical profile of one grid cell.
///
/// Built once per analysis run for every cell meeting the minimum event
/// count, read-only afterward. Probability lists serialize as plain numeric
/// arrays; the method distribution serializes as a string-keyed object.
#[derive(Debug, Clone, Serialize)]
pub struct LocationSignature {
    pub grid_id: GridKey,
    pub lat: f64,
    pub lng: f64,
    pub total_stops: usize,

    // Temporal profile
    pub hour_distribution: Vec<f64>,
    pub day_distribution: Vec<f64>,
    pub peak_hours: SmallVec4<u8>,
    pub peak_days: SmallVec4<u8>,
    pub hour_concentration: f64,
    pub day_concentration: f64,
    pub weekday_ratio: f64,

    // Detection profile
    pub primary_method: String,
    pub method_distribution: BTreeMap<String, f64>,
    pub avg_speed_over: f64,
    pub min_speed_over: f64,
    pub strictness_level: Strictness,

    // Statistical profile
    pub hour_chi2: f64,
    pub hour_pvalue: f64,
    pub day_chi2: f64,
    pub day_pvalue: f64,
    pub is_significant: bool,

    pub insight: String,
}

impl LocationSignature {
    /// Share of events using the given detection method, 0 if absent.
    pub fn method_share(&self, method: &str) -> f64 {
        self.method_distribution.get(method).copied().unwrap_or(0.0)
    }

    /// Whether this hour is among the location's top peak hours.
    pub fn is_peak_hour(&self, hour: u8) -> bool {
        self.peak_hours.contains(&hour)
    }

    /// Whether this day of week is among the location's top peak days.
    pub fn is_peak_day(&self, day_of_week: u8) -> bool {
        self.peak_days.contains(&day_of_week)
    }
}
