//! Error types for the visualizer.

use thiserror::Error;

use sortvis_engine::EngineError;

/// Result type for visualizer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in visualizer operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected by the step engine (unknown algorithm, bad array size)
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV export error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Export formatting error
    #[error("Export error: {0}")]
    Export(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error was caused by the caller's request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Engine(_) | Error::InvalidInput(_))
    }
}
