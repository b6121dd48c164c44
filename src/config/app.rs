//! Main application configuration
//!
//! The configuration is built once at process start (defaults, then a TOML
//! file or the environment, then CLI overrides) and handed to the components
//! that need it. Library code never reads the environment on its own.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub data: DataSettings,
    pub reports: ReportSettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Where circuit data is read from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// JSON snapshot with events, students and results
    pub snapshot_path: Option<PathBuf>,
}

/// Report sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Number of past results shown in a student report
    pub history_limit: usize,
    /// Number of rounds listed in the circuit list
    pub circuit_list_limit: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "circuit-standings".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            history_limit: 6,       // last six rounds
            circuit_list_limit: 24, // two years of monthly rounds
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup (environment-shaped)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Service settings
        if let Some(name) = lookup("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Some(log_level) = lookup("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Data settings
        if let Some(path) = lookup("SNAPSHOT_PATH") {
            config.data.snapshot_path = Some(PathBuf::from(path));
        }

        // Report settings
        if let Some(limit) = lookup("HISTORY_LIMIT") {
            config.reports.history_limit = limit
                .parse()
                .map_err(|_| anyhow!("Invalid HISTORY_LIMIT value: {}", limit))?;
        }
        if let Some(limit) = lookup("CIRCUIT_LIST_LIMIT") {
            config.reports.circuit_list_limit = limit
                .parse()
                .map_err(|_| anyhow!("Invalid CIRCUIT_LIST_LIMIT value: {}", limit))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; missing keys take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    if let Some(path) = &config.data.snapshot_path {
        if path.as_os_str().is_empty() {
            return Err(anyhow!("Snapshot path cannot be empty"));
        }
    }

    // Validate report settings
    if config.reports.history_limit == 0 {
        return Err(anyhow!("History limit must be greater than 0"));
    }
    if config.reports.circuit_list_limit == 0 {
        return Err(anyhow!("Circuit list limit must be greater than 0"));
    }

    Ok(())
}
