//! Top-level Stakeout configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnomalyConfig, GridConfig, PatternConfig, SignatureConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`STAKEOUT_*`)
/// 2. Project config (`stakeout.toml` in the analysis root)
/// 3. User config (`~/.stakeout/config.toml`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StakeoutConfig {
    pub grid: GridConfig,
    pub signatures: SignatureConfig,
    pub patterns: PatternConfig,
    pub anomalies: AnomalyConfig,
}

impl StakeoutConfig {
    /// Load configuration with layered resolution.
    ///
    /// Resolution order (highest priority first):
    /// 1. Environment variables (`STAKEOUT_*`)
    /// 2. Project config (`stakeout.toml` in `root`)
    /// 3. User config (`~/.stakeout/config.toml`)
    /// 4. Compiled defaults
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(_) => {
                        // Non-parse errors from user config are warnings, not fatal.
                        // Continue with defaults.
                    }
                }
            }
        }

        // Project config
        let project_config_path = root.join("stakeout.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Highest priority: environment variables
        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &StakeoutConfig) -> Result<(), ConfigError> {
        if let Some(cell_size) = config.grid.cell_size {
            if !(cell_size.is_finite() && cell_size > 0.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "grid.cell_size".to_string(),
                    message: "must be a positive number".to_string(),
                });
            }
        }
        if let Some(min_stops) = config.signatures.min_stops {
            if min_stops == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "signatures.min_stops".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        if let Some(clusters) = config.patterns.time_clusters {
            if clusters == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "patterns.time_clusters".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        if let Some(share) = config.patterns.method_zone_share {
            if !(0.0..=1.0).contains(&share) {
                return Err(ConfigError::ValidationFailed {
                    field: "patterns.method_zone_share".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if let Some(conc) = config.patterns.day_concentration_min {
            if !(0.0..=1.0).contains(&conc) {
                return Err(ConfigError::ValidationFailed {
                    field: "patterns.day_concentration_min".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if let Some(share) = config.patterns.weekend_heavy_share {
            if !(0.0..=1.0).contains(&share) {
                return Err(ConfigError::ValidationFailed {
                    field: "patterns.weekend_heavy_share".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if let Some(share) = config.patterns.specific_day_share {
            if !(0.0..=1.0).contains(&share) {
                return Err(ConfigError::ValidationFailed {
                    field: "patterns.specific_day_share".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if let Some(z) = config.anomalies.z_threshold {
            if !(z.is_finite() && z > 0.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "anomalies.z_threshold".to_string(),
                    message: "must be a positive number".to_string(),
                });
            }
        }
        if let Some(days) = config.anomalies.lookback_days {
            if days <= 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "anomalies.lookback_days".to_string(),
                    message: "must be a positive number of days".to_string(),
                });
            }
        }
        if let (Some(lookback), Some(comparison)) = (
            config.anomalies.lookback_days,
            config.anomalies.comparison_days,
        ) {
            if comparison <= lookback {
                return Err(ConfigError::ValidationFailed {
                    field: "anomalies.comparison_days".to_string(),
                    message: "must exceed lookback_days".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut StakeoutConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: StakeoutConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut StakeoutConfig, other: &StakeoutConfig) {
        // Grid
        if other.grid.cell_size.is_some() {
            base.grid.cell_size = other.grid.cell_size;
        }

        // Signatures
        if other.signatures.min_stops.is_some() {
            base.signatures.min_stops = other.signatures.min_stops;
        }

        // Patterns
        if other.patterns.time_clusters.is_some() {
            base.patterns.time_clusters = other.patterns.time_clusters;
        }
        if other.patterns.min_locations.is_some() {
            base.patterns.min_locations = other.patterns.min_locations;
        }
        if other.patterns.method_zone_share.is_some() {
            base.patterns.method_zone_share = other.patterns.method_zone_share;
        }
        if other.patterns.day_concentration_min.is_some() {
            base.patterns.day_concentration_min = other.patterns.day_concentration_min;
        }
        if other.patterns.weekend_heavy_share.is_some() {
            base.patterns.weekend_heavy_share = other.patterns.weekend_heavy_share;
        }
        if other.patterns.specific_day_share.is_some() {
            base.patterns.specific_day_share = other.patterns.specific_day_share;
        }

        // Anomalies
        if other.anomalies.z_threshold.is_some() {
            base.anomalies.z_threshold = other.anomalies.z_threshold;
        }
        if other.anomalies.lookback_days.is_some() {
            base.anomalies.lookback_days = other.anomalies.lookback_days;
        }
        if other.anomalies.comparison_days.is_some() {
            base.anomalies.comparison_days = other.anomalies.comparison_days;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `STAKEOUT_GRID_CELL_SIZE`, `STAKEOUT_SIGNATURE_MIN_STOPS`, etc.
    fn apply_env_overrides(config: &mut StakeoutConfig) {
        if let Ok(val) = std::env::var("STAKEOUT_GRID_CELL_SIZE") {
            if let Ok(v) = val.parse::<f64>() {
                config.grid.cell_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("STAKEOUT_SIGNATURE_MIN_STOPS") {
            if let Ok(v) = val.parse::<usize>() {
                config.signatures.min_stops = Some(v);
            }
        }
        if let Ok(val) = std::env::var("STAKEOUT_PATTERN_TIME_CLUSTERS") {
            if let Ok(v) = val.parse::<usize>() {
                config.patterns.time_clusters = Some(v);
            }
        }
        if let Ok(val) = std::env::var("STAKEOUT_PATTERN_METHOD_ZONE_SHARE") {
            if let Ok(v) = val.parse::<f64>() {
                config.patterns.method_zone_share = Some(v);
            }
        }
        if let Ok(val) = std::env::var("STAKEOUT_ANOMALY_Z_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.anomalies.z_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("STAKEOUT_ANOMALY_LOOKBACK_DAYS") {
            if let Ok(v) = val.parse::<i64>() {
                config.anomalies.lookback_days = Some(v);
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user config path: `~/.stakeout/config.toml`.
fn user_config_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".stakeout").join("config.toml"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
