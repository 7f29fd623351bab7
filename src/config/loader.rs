//! Configuration loading from the environment

use super::models::*;
use crate::utils::error::{HealthError, Result};
use std::str::FromStr;
use tracing::debug;

/// Prefix shared by every environment variable the monitor reads
pub const ENV_PREFIX: &str = "HEALTHMON_";

impl HealthMonitorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Loading health monitor configuration from environment");

        let mut config = Self::default();

        if let Some(value) = read(&lookup, "ENABLED")? {
            config.enabled = value;
        }
        if let Some(value) = read(&lookup, "CHECK_INTERVAL_SECONDS")? {
            config.default_check_interval_seconds = value;
        }
        if let Some(value) = read(&lookup, "ALERTS_ENABLED")? {
            config.alerts_enabled = value;
        }
        if let Some(value) = read(&lookup, "ALERT_COOLDOWN_SECONDS")? {
            config.alert_cooldown_seconds = value;
        }
        if let Some(value) = read(&lookup, "METRICS_RETENTION_HOURS")? {
            config.metrics_retention_hours = value;
        }
        if let Some(value) = read(&lookup, "METRICS_INTERVAL_SECONDS")? {
            config.metrics_collection_interval_seconds = value;
        }
        if let Some(value) = read(&lookup, "CLEANUP_INTERVAL_SECONDS")? {
            config.cleanup_interval_seconds = value;
        }
        if let Some(value) = read(&lookup, "MAX_CONCURRENT_CHECKS")? {
            config.max_concurrent_checks = value;
        }

        Ok(config)
    }
}

fn read<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let key = format!("{}{}", ENV_PREFIX, name);
    match lookup(&key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| HealthError::config(format!("Invalid {}: {}", key, e))),
        None => Ok(None),
    }
}
