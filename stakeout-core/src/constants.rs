//! Shared constants for the Stakeout analysis engine.

/// Stakeout version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default grid cell size in degrees (~100m at mid latitudes).
pub const DEFAULT_GRID_SIZE: f64 = 0.001;

/// Default minimum events for a cell to earn a signature.
pub const DEFAULT_MIN_STOPS: usize = 10;

/// Number of peak hours/days kept per signature.
pub const SIGNATURE_PEAK_COUNT: usize = 3;

/// Significance threshold for chi-square tests.
pub const SIGNIFICANCE_ALPHA: f64 = 0.05;

/// Minimum observation total for a chi-square test to run.
pub const CHI_SQUARE_MIN_TOTAL: f64 = 5.0;

/// Floor applied to expected counts inside the chi-square statistic.
pub const CHI_SQUARE_EXPECTED_FLOOR: f64 = 0.1;

/// Strictness bound: mean severity below 0.8x global mean reads as strict.
pub const STRICT_SEVERITY_RATIO: f64 = 0.8;

/// Strictness bound: mean severity above 1.2x global mean reads as lenient.
pub const LENIENT_SEVERITY_RATIO: f64 = 1.2;

/// Global mean severity fallback when no severity values exist.
pub const DEFAULT_GLOBAL_SEVERITY: f64 = 15.0;

/// Floor applied to global probabilities in affinity ratios.
pub const GLOBAL_RATE_FLOOR: f64 = 0.001;

/// Floor applied to a degenerate hour-distribution standard deviation.
pub const HOUR_STD_FLOOR: f64 = 0.05;

/// Floor applied to a degenerate day-distribution standard deviation.
pub const DAY_STD_FLOOR: f64 = 0.1;

/// Weekday share of a uniform week, the empty-cell default ratio.
pub const UNIFORM_WEEKDAY_RATIO: f64 = 5.0 / 7.0;

/// Default number of temporal clusters.
pub const DEFAULT_TIME_CLUSTERS: usize = 5;

/// Fixed seed for the clustering RNG.
pub const KMEANS_SEED: u64 = 42;

/// Lloyd iteration cap per k-means restart.
pub const KMEANS_MAX_ITER: usize = 300;

/// Number of seeded k-means restarts, best inertia wins.
pub const KMEANS_RESTARTS: usize = 10;

/// Absolute centroid movement below which k-means stops iterating.
pub const KMEANS_TOLERANCE: f64 = 1e-4;

/// Minimum member locations for a cluster or zone pattern.
pub const DEFAULT_MIN_PATTERN_LOCATIONS: usize = 3;

/// Default dominant-method share for method-zone membership.
pub const DEFAULT_METHOD_ZONE_SHARE: f64 = 0.7;

/// Default day-concentration gate for day-pattern consideration.
pub const DEFAULT_DAY_CONCENTRATION_MIN: f64 = 0.3;

/// Weekday share above which a location reads as weekday-heavy.
pub const WEEKDAY_HEAVY_SHARE: f64 = 0.85;

/// Default weekend share above which a location reads as weekend-heavy.
pub const DEFAULT_WEEKEND_HEAVY_SHARE: f64 = 0.4;

/// Default single-day share above which a location reads as day-specific.
pub const DEFAULT_SPECIFIC_DAY_SHARE: f64 = 0.25;

/// Last day of the early-month quota window.
pub const QUOTA_EARLY_CUTOFF: u8 = 20;

/// Days in the early-month quota window.
pub const QUOTA_EARLY_DAYS: f64 = 20.0;

/// Days in the late-month quota window.
pub const QUOTA_LATE_DAYS: f64 = 11.0;

/// Days in the quota month model.
pub const QUOTA_MONTH_DAYS: f64 = 31.0;

/// Minimum dataset-wide effect size for a quota pattern.
pub const QUOTA_EFFECT_MIN: f64 = 0.10;

/// Minimum per-location effect size to rank in a quota pattern.
pub const QUOTA_LOCATION_EFFECT_MIN: f64 = 0.2;

/// Per-location quota ranking requires more than this many early-window events.
pub const QUOTA_LOCATION_EARLY_MIN: usize = 5;

/// Per-location quota ranking requires more than this many late-window events.
pub const QUOTA_LOCATION_LATE_MIN: usize = 2;

/// Locations listed on a quota pattern.
pub const QUOTA_TOP_LOCATIONS: usize = 10;

/// Default z-score threshold for temporal spike anomalies.
pub const DEFAULT_SPIKE_Z_THRESHOLD: f64 = 2.0;

/// Minimum cell events for spike detection.
pub const SPIKE_MIN_EVENTS: usize = 10;

/// Temporal spike anomalies kept after ranking.
pub const MAX_SPIKE_ANOMALIES: usize = 20;

/// Recent-change anomalies kept after ranking.
pub const MAX_RECENT_ANOMALIES: usize = 10;

/// Default recent-change lookback window in days.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 90;

/// Default total comparison span in days (lookback + baseline window).
pub const DEFAULT_COMPARISON_DAYS: i64 = 180;

/// Minimum events per window for recent-change detection to run.
pub const RECENT_CHANGE_MIN_EVENTS: usize = 10;

/// Rate ratio above which a recent change reads as a surge.
pub const SURGE_RATIO: f64 = 2.0;

/// Rate ratio below which a recent change reads as a drop.
pub const DROP_RATIO: f64 = 0.5;

/// Hours in the day histogram.
pub const HOURS_PER_DAY: usize = 24;

/// Days in the week histogram.
pub const DAYS_PER_WEEK: usize = 7;

/// Full day names, Monday-first.
pub const DAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
