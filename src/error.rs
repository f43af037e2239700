//! Error types for the simulation engine

use thiserror::Error;

/// Errors raised before or around a simulation run
///
/// Arithmetic edge cases (zero investment, non-positive profit) are not
/// errors: the calculators return 0 for them.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown reversal policy: {0}")]
    UnknownReversalPolicy(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl SimulationError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(e: serde_json::Error) -> Self {
        SimulationError::Config(e.to_string())
    }
}

impl From<csv::Error> for SimulationError {
    fn from(e: csv::Error) -> Self {
        SimulationError::Export(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
