//! Location signature configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MIN_STOPS;

/// Configuration for the location signature builder.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SignatureConfig {
    /// Minimum events for a cell to earn a signature. Default: 10.
    pub min_stops: Option<usize>,
}

impl SignatureConfig {
    /// Returns the effective minimum stops, defaulting to 10.
    pub fn effective_min_stops(&self) -> usize {
        self.min_stops.unwrap_or(DEFAULT_MIN_STOPS)
    }
}
