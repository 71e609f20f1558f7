//! Collection aliases used across the workspace.
//! FxHash variants throughout; keys are short strings and hashing dominates.

pub use rustc_hash::{FxHashMap, FxHashSet};
