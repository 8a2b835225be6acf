//! Grid cell identity.
//!
//! A cell is identified by its two coordinates snapped to the configured
//! resolution. `GridKey` carries them in fixed-precision micro-degree form so
//! equal rounded coordinates always hash and compare equal; the canonical
//! string form exists only at the serialization boundary.

use std::fmt;

use serde::{Serialize, Serializer};

/// Micro-degrees per degree. Exact for cell sizes down to 1e-6.
const MICRO: f64 = 1_000_000.0;

/// Snap a coordinate to the nearest multiple of the cell size.
pub fn round_to_grid(value: f64, cell_size: f64) -> f64 {
    (value / cell_size).round() * cell_size
}

/// Identity of one spatial grid cell.
///
/// Ordered lexicographically by (lat, lng), which gives detectors a
/// deterministic iteration order over cell maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridKey {
    lat_micro: i64,
    lng_micro: i64,
}

impl GridKey {
    /// Build a key from raw coordinates and a cell size.
    pub fn from_degrees(lat: f64, lng: f64, cell_size: f64) -> Self {
        Self {
            lat_micro: quantize(round_to_grid(lat, cell_size)),
            lng_micro: quantize(round_to_grid(lng, cell_size)),
        }
    }

    /// Representative latitude of the cell.
    pub fn lat(&self) -> f64 {
        self.lat_micro as f64 / MICRO
    }

    /// Representative longitude of the cell.
    pub fn lng(&self) -> f64 {
        self.lng_micro as f64 / MICRO
    }

    /// Canonical string id, three decimals per coordinate.
    pub fn id(&self) -> String {
        self.to_string()
    }
}

/// Micro-degree form of a rounded coordinate. Collapses negative zero.
fn quantize(value: f64) -> i64 {
    let micro = (value * MICRO).round();
    if micro == 0.0 {
        0
    } else {
        micro as i64
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}_{:.3}", self.lat(), self.lng())
    }
}

impl Serialize for GridKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
