//! Tests for the Stakeout configuration system.

use std::sync::Mutex;

use stakeout_core::config::StakeoutConfig;
use stakeout_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper: create a temporary directory.
fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all STAKEOUT_ env vars to prevent cross-test contamination.
fn clear_stakeout_env_vars() {
    for key in [
        "STAKEOUT_GRID_CELL_SIZE",
        "STAKEOUT_SIGNATURE_MIN_STOPS",
        "STAKEOUT_PATTERN_TIME_CLUSTERS",
        "STAKEOUT_PATTERN_METHOD_ZONE_SHARE",
        "STAKEOUT_ANOMALY_Z_THRESHOLD",
        "STAKEOUT_ANOMALY_LOOKBACK_DAYS",
    ] {
        std::env::remove_var(key);
    }
}

/// Layered resolution: env overrides project config which overrides defaults.
#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_stakeout_env_vars();

    let dir = tempdir();
    let project_toml = dir.path().join("stakeout.toml");
    std::fs::write(
        &project_toml,
        r#"
[grid]
cell_size = 0.005

[signatures]
min_stops = 15
"#,
    )
    .unwrap();

    // Set env var to override project config
    std::env::set_var("STAKEOUT_GRID_CELL_SIZE", "0.01");

    let config = StakeoutConfig::load(dir.path()).unwrap();

    // Env wins over project for cell_size
    assert_eq!(config.grid.cell_size, Some(0.01));
    // Project value survives where env is silent
    assert_eq!(config.signatures.min_stops, Some(15));

    clear_stakeout_env_vars();
}

/// Missing config files fall back to compiled defaults.
#[test]
fn test_load_missing_files_fallback() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_stakeout_env_vars();

    let dir = tempdir();
    // No stakeout.toml exists
    let config = StakeoutConfig::load(dir.path()).unwrap();

    assert_eq!(config.grid.effective_cell_size(), 0.001);
    assert_eq!(config.signatures.effective_min_stops(), 10);
    assert_eq!(config.patterns.effective_time_clusters(), 5);
    assert_eq!(config.patterns.effective_method_zone_share(), 0.7);
    assert_eq!(config.anomalies.effective_z_threshold(), 2.0);
    assert_eq!(config.anomalies.effective_lookback_days(), 90);
    assert_eq!(config.anomalies.effective_comparison_days(), 180);
}

/// Env var override pattern (STAKEOUT_SIGNATURE_MIN_STOPS).
#[test]
fn test_env_var_override() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_stakeout_env_vars();

    let dir = tempdir();
    std::env::set_var("STAKEOUT_SIGNATURE_MIN_STOPS", "25");

    let config = StakeoutConfig::load(dir.path()).unwrap();
    assert_eq!(config.signatures.min_stops, Some(25));

    clear_stakeout_env_vars();
}

/// Invalid TOML syntax returns ConfigError::ParseError.
#[test]
fn test_invalid_toml_syntax() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_stakeout_env_vars();

    let dir = tempdir();
    let project_toml = dir.path().join("stakeout.toml");
    std::fs::write(&project_toml, "this is not valid toml {{{{").unwrap();

    let result = StakeoutConfig::load(dir.path());
    assert!(result.is_err());
    match result.unwrap_err() {
        ConfigError::ParseError { .. } => {} // expected
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

/// Valid TOML with out-of-range values fails validation with the field name.
#[test]
fn test_invalid_values() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_stakeout_env_vars();

    let dir = tempdir();
    let project_toml = dir.path().join("stakeout.toml");

    std::fs::write(
        &project_toml,
        r#"
[patterns]
method_zone_share = 1.5
"#,
    )
    .unwrap();

    let result = StakeoutConfig::load(dir.path());
    assert!(result.is_err());
    match result.unwrap_err() {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "patterns.method_zone_share");
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

/// A zero cell size fails validation.
#[test]
fn test_zero_cell_size_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_stakeout_env_vars();

    let dir = tempdir();
    let project_toml = dir.path().join("stakeout.toml");
    std::fs::write(
        &project_toml,
        r#"
[grid]
cell_size = 0.0
"#,
    )
    .unwrap();

    let result = StakeoutConfig::load(dir.path());
    match result.unwrap_err() {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "grid.cell_size");
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

/// A comparison span not exceeding the lookback window fails validation.
#[test]
fn test_comparison_days_must_exceed_lookback() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_stakeout_env_vars();

    let dir = tempdir();
    let project_toml = dir.path().join("stakeout.toml");
    std::fs::write(
        &project_toml,
        r#"
[anomalies]
lookback_days = 90
comparison_days = 90
"#,
    )
    .unwrap();

    let result = StakeoutConfig::load(dir.path());
    match result.unwrap_err() {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "anomalies.comparison_days");
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

/// Unrecognized keys are accepted (forward-compatible).
#[test]
fn test_unrecognized_keys_accepted() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_stakeout_env_vars();

    let dir = tempdir();
    let project_toml = dir.path().join("stakeout.toml");
    std::fs::write(
        &project_toml,
        r#"
[grid]
cell_size = 0.002
future_unknown_key = "hello"

[future_section]
another_key = 42
"#,
    )
    .unwrap();

    // Should not error on unknown keys
    let result = StakeoutConfig::load(dir.path());
    assert!(result.is_ok());
}

/// Config round-trip: load, serialize, re-load produces identical values.
#[test]
fn test_config_round_trip() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_stakeout_env_vars();

    let dir = tempdir();
    let project_toml = dir.path().join("stakeout.toml");
    std::fs::write(
        &project_toml,
        r#"
[grid]
cell_size = 0.002

[signatures]
min_stops = 20

[patterns]
time_clusters = 4
weekend_heavy_share = 0.5

[anomalies]
z_threshold = 2.5
"#,
    )
    .unwrap();

    let config1 = StakeoutConfig::load(dir.path()).unwrap();
    let toml_str = config1.to_toml().unwrap();

    let config2 = StakeoutConfig::from_toml(&toml_str).unwrap();

    assert_eq!(config1.grid.cell_size, config2.grid.cell_size);
    assert_eq!(config1.signatures.min_stops, config2.signatures.min_stops);
    assert_eq!(
        config1.patterns.time_clusters,
        config2.patterns.time_clusters
    );
    assert_eq!(
        config1.patterns.weekend_heavy_share,
        config2.patterns.weekend_heavy_share
    );
    assert_eq!(
        config1.anomalies.z_threshold,
        config2.anomalies.z_threshold
    );
}
