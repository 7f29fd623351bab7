//! Logging setup
//!
//! Installs the global `tracing` subscriber used by the `healthmon` binary.

use crate::utils::error::{HealthError, Result};
use tracing_subscriber::EnvFilter;

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable, single line per event
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Logging utilities
pub struct LoggingUtils;

impl LoggingUtils {
    /// Build the env filter, falling back to `default_level` when `RUST_LOG` is unset
    pub fn env_filter(default_level: &str) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    }

    /// Initialize the global subscriber
    pub fn init_logger(format: LogFormat, default_level: &str) -> Result<()> {
        let filter = Self::env_filter(default_level);

        let installed = match format {
            LogFormat::Pretty => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_thread_ids(false)
                .try_init(),
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_current_span(false)
                .try_init(),
        };

        installed.map_err(|e| HealthError::internal(format!("Failed to install logger: {}", e)))
    }
}
