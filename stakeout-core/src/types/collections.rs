//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeMap;

/// SmallVec optimized for signature peak lists (top-3).
pub type SmallVec4<T> = SmallVec<[T; 4]>;

/// SmallVec optimized for insight clauses (usually <4).
pub type SmallVec8<T> = SmallVec<[T; 8]>;
