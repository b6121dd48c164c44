//! Competitive ranking of circuit results
//!
//! This module is the single place where results are ranked. Every report
//! (class standings, a student's own rank) goes through it so tie handling
//! stays identical across all views.

pub mod engine;
pub mod lookup;

// Re-export commonly used items
pub use engine::compute_rankings;
pub use lookup::{find_rank, RankLookup};
