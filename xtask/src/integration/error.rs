//! Error types for integration test operations.

use thiserror::Error;

/// Result type alias for integration module.
pub type Result<T> = std::result::Result<T, IntegrationError>;

/// Errors that can occur during integration test operations.
#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error("Build failed: {0}")]
    BuildFailed(String),

    #[error("Server binary not found at {0}")]
    BinaryNotFound(String),

    #[error("Server did not answer on {url} within {timeout_secs}s")]
    ServerNotReady { url: String, timeout_secs: u64 },

    #[error("Server exited early: {0}")]
    ServerExited(String),

    #[error("Scenario '{scenario}' failed: {reason}")]
    ScenarioFailed {
        scenario: &'static str,
        reason: String,
    },

    #[error("One or more scenarios failed")]
    TestsFailed,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
