//! Data access for circuit events, students and results
//!
//! Reports only talk to the [`ResultSource`] trait. The in-memory
//! implementation backs the CLI (loaded from a JSON snapshot) and the tests.

pub mod memory;
pub mod provider;

// Re-export commonly used types
pub use memory::{InMemoryResultSource, Snapshot};
pub use provider::ResultSource;

#[cfg(test)]
pub use provider::MockResultSource;
