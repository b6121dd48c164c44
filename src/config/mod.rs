//! Configuration management for the circuit standings crate
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values.

pub mod app;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, DataSettings, ReportSettings, ServiceSettings};
