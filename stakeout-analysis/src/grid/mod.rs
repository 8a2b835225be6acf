//! Spatial grid indexing.
//!
//! Quantizes event coordinates into fixed-resolution cells and groups the
//! event set by cell for all downstream per-location computation.

pub mod stats;

pub use stats::CellStats;

use stakeout_core::config::GridConfig;
use stakeout_core::types::collections::FxHashMap;
use stakeout_core::types::{EventSet, GridKey};

/// Assigns events to grid cells at a configured resolution.
#[derive(Debug, Clone, Copy)]
pub struct GridIndexer {
    cell_size: f64,
}

impl GridIndexer {
    pub fn new(cell_size: f64) -> Self {
        Self { cell_size }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.effective_cell_size())
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cell key for a single coordinate pair.
    pub fn key_for(&self, lat: f64, lng: f64) -> GridKey {
        GridKey::from_degrees(lat, lng, self.cell_size)
    }

    /// Group event indices by grid cell.
    ///
    /// Indices preserve input order within each cell, so downstream passes
    /// over a cell's events are deterministic.
    pub fn partition(&self, events: &EventSet) -> FxHashMap<GridKey, Vec<usize>> {
        let mut cells: FxHashMap<GridKey, Vec<usize>> = FxHashMap::default();
        for (idx, event) in events.iter().enumerate() {
            cells
                .entry(self.key_for(event.lat, event.lng))
                .or_default()
                .push(idx);
        }
        cells
    }
}
