//! Circuit Standings - results viewer for the abacus circuit
//!
//! This crate ranks per-round circuit results with standard competition
//! ranking, and assembles the class standings, student reports and round
//! lists that parents look at.

pub mod config;
pub mod error;
pub mod ranking;
pub mod report;
pub mod source;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use error::{CircuitError, Result};
pub use ranking::{compute_rankings, find_rank, RankLookup};
pub use types::*;

// Re-export key components
pub use report::{ChildList, CircuitList, ClassStandings, ParentView, StudentReport};
pub use source::{InMemoryResultSource, ResultSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
