//! Error types for the health monitor

use thiserror::Error;

/// Result type alias for the health monitor
pub type Result<T> = std::result::Result<T, HealthError>;

/// Main error type for the health monitor
#[derive(Error, Debug)]
pub enum HealthError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A health check definition violated its invariants
    #[error("Invalid check definition: {0}")]
    InvalidCheckDefinition(String),

    /// A check function raised an error during one attempt
    #[error("{0}")]
    CheckFailed(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Alert handler errors
    #[error("Alert error: {0}")]
    Alert(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
