//! Location signatures.
//!
//! One statistical profile per sufficiently populated grid cell: temporal
//! distributions, detection profile, significance tests, and a generated
//! natural-language insight.

pub mod builder;
mod insight;
pub mod types;

pub use builder::SignatureBuilder;
pub use types::{LocationSignature, Strictness};
