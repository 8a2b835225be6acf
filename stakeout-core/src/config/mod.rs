//! Configuration system for Stakeout.
//! TOML-based, layered resolution: env > project > user > defaults.

pub mod anomaly_config;
pub mod grid_config;
pub mod pattern_config;
pub mod signature_config;
pub mod stakeout_config;

pub use anomaly_config::AnomalyConfig;
pub use grid_config::GridConfig;
pub use pattern_config::PatternConfig;
pub use signature_config::SignatureConfig;
pub use stakeout_config::StakeoutConfig;
