//! Report assembly for the circuit viewer
//!
//! Each report pulls what it needs from a [`ResultSource`](crate::source::ResultSource),
//! ranks through [`crate::ranking`], and is serializable for JSON output.
//! `text` renders the same structs for a terminal.

pub mod circuits;
pub mod family;
pub mod standings;
pub mod student;
pub mod text;

// Re-export commonly used types
pub use circuits::{CircuitList, CircuitSummary};
pub use family::{ChildList, ParentView};
pub use standings::{ClassStandings, StandingRow};
pub use student::{CurrentStanding, HistoryGroup, StudentReport};
