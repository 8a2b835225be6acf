//! Spatial grid configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_GRID_SIZE;

/// Configuration for the spatial grid indexer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GridConfig {
    /// Grid cell size in degrees. Default: 0.001 (~100m).
    pub cell_size: Option<f64>,
}

impl GridConfig {
    /// Returns the effective cell size, defaulting to 0.001 degrees.
    pub fn effective_cell_size(&self) -> f64 {
        self.cell_size.unwrap_or(DEFAULT_GRID_SIZE)
    }
}
