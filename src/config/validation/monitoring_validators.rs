//! Health monitor configuration validators

use super::Validate;
use crate::config::models::*;
use tracing::debug;

impl Validate for HealthMonitorConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating health monitor configuration");

        if self.default_check_interval_seconds == 0 {
            return Err("Default check interval must be greater than 0".to_string());
        }

        if self.metrics_retention_hours == 0 {
            return Err("Metrics retention must be at least 1 hour".to_string());
        }

        if self.metrics_collection_interval_seconds == 0 {
            return Err("Metrics collection interval must be greater than 0".to_string());
        }

        if self.metrics_collection_interval_seconds > 3600 {
            return Err("Metrics collection interval cannot exceed 3600 seconds".to_string());
        }

        if self.cleanup_interval_seconds == 0 {
            return Err("Cleanup interval must be greater than 0".to_string());
        }

        if self.max_concurrent_checks == 0 {
            return Err("Max concurrent checks must be at least 1".to_string());
        }

        Ok(())
    }
}
