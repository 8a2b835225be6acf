//! Data structures for Stakeout.
//! FxHashMap/SmallVec re-exports, event records, grid cell identity.

pub mod collections;
pub mod event;
pub mod grid;

pub use collections::{FxHashMap, FxHashSet};
pub use event::{EventSet, StopEvent};
pub use grid::{round_to_grid, GridKey};
