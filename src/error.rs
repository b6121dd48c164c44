//! Error types for the circuit standings crate
//!
//! Errors propagate as `anyhow::Error`; the domain cases below are raised with
//! `.into()` and can be recovered by callers through `downcast_ref`.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific circuit scenarios
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CircuitError {
    #[error("Malformed input at position {position} (competitor {competitor_id}): {reason}")]
    MalformedInput {
        competitor_id: String,
        position: usize,
        reason: String,
    },

    #[error("Circuit round not found: {round}")]
    RoundNotFound { round: String },

    #[error("Competitor not found: {competitor_id}")]
    CompetitorNotFound { competitor_id: String },

    #[error("No results recorded for competitor: {competitor_id}")]
    NoResults { competitor_id: String },

    #[error("Invalid class level: {value}")]
    InvalidClassLevel { value: String },

    #[error("Invalid round selector: {value}")]
    InvalidRoundSelector { value: String },

    #[error("Data source error: {message}")]
    DataSourceError { message: String },
}
