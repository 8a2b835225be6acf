//! Interaction feature generation.
//!
//! Turns each event into a fixed-width feature vector combining base
//! contextual encodings with deviations from the global baseline and the
//! event's own location signature.

pub mod columns;
pub mod encoding;
pub mod interaction;
pub mod types;

pub use columns::{BASE_COLUMNS, FEATURE_COLUMNS, INTERACTION_COLUMNS, STATISTICAL_COLUMNS};
pub use interaction::{hour_affinity, FeatureGenerator};
pub use types::FeatureVector;
