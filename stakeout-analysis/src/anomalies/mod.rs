//! Anomaly detection.
//!
//! Two independent detectors: per-hour temporal spikes against each
//! location's own signature, and rate surges/drops over rolling windows.
//! Each returns a ranked, truncated list.

pub mod recent;
pub mod spikes;
pub mod types;

pub use recent::RecentChangeDetector;
pub use spikes::SpikeDetector;
pub use types::{Anomaly, AnomalyType};
