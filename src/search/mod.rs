//! Query matching over the entry store.
//!
//! - [`fuzzy`]: subsequence matcher, ranking and highlight helpers

pub mod fuzzy;

pub use fuzzy::{coalesce_positions, match_entries, Match};
