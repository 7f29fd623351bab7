//! Health monitor configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Health monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMonitorConfig {
    /// Enable the scheduler and background tasks
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Global check interval, also bounds the scheduler tick
    #[serde(default = "default_check_interval_seconds")]
    pub default_check_interval_seconds: u64,
    /// Enable alert dispatch
    #[serde(default = "default_true")]
    pub alerts_enabled: bool,
    /// Minimum time between two alerts for the same check
    #[serde(default = "default_alert_cooldown_seconds")]
    pub alert_cooldown_seconds: u64,
    /// Retention window for check history and metrics snapshots
    #[serde(default = "default_metrics_retention_hours")]
    pub metrics_retention_hours: u64,
    /// System metrics sampling period
    #[serde(default = "default_metrics_collection_interval_seconds")]
    pub metrics_collection_interval_seconds: u64,
    /// Retention cleaner period
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,
    /// Maximum number of due checks executed at once within a tick
    #[serde(default = "default_max_concurrent_checks")]
    pub max_concurrent_checks: usize,
}

impl Default for HealthMonitorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_check_interval_seconds: default_check_interval_seconds(),
            alerts_enabled: true,
            alert_cooldown_seconds: default_alert_cooldown_seconds(),
            metrics_retention_hours: default_metrics_retention_hours(),
            metrics_collection_interval_seconds: default_metrics_collection_interval_seconds(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
            max_concurrent_checks: default_max_concurrent_checks(),
        }
    }
}

impl HealthMonitorConfig {
    /// Merge health monitor configurations, non-default values in `other` win
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if other.default_check_interval_seconds != default_check_interval_seconds() {
            self.default_check_interval_seconds = other.default_check_interval_seconds;
        }
        if !other.alerts_enabled {
            self.alerts_enabled = other.alerts_enabled;
        }
        if other.alert_cooldown_seconds != default_alert_cooldown_seconds() {
            self.alert_cooldown_seconds = other.alert_cooldown_seconds;
        }
        if other.metrics_retention_hours != default_metrics_retention_hours() {
            self.metrics_retention_hours = other.metrics_retention_hours;
        }
        if other.metrics_collection_interval_seconds
            != default_metrics_collection_interval_seconds()
        {
            self.metrics_collection_interval_seconds = other.metrics_collection_interval_seconds;
        }
        if other.cleanup_interval_seconds != default_cleanup_interval_seconds() {
            self.cleanup_interval_seconds = other.cleanup_interval_seconds;
        }
        if other.max_concurrent_checks != default_max_concurrent_checks() {
            self.max_concurrent_checks = other.max_concurrent_checks;
        }
        self
    }

    /// Scheduler tick period: `min(10s, default_check_interval)`
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(self.default_check_interval_seconds.clamp(1, MAX_TICK_SECONDS))
    }

    /// Alert cooldown as a duration
    pub fn alert_cooldown(&self) -> Duration {
        Duration::from_secs(self.alert_cooldown_seconds)
    }

    /// Retention window as a duration
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.metrics_retention_hours * 3600)
    }

    /// Metrics sampling period as a duration
    pub fn metrics_collection_interval(&self) -> Duration {
        Duration::from_secs(self.metrics_collection_interval_seconds.max(1))
    }

    /// Retention cleaner period as a duration
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds.max(1))
    }

    /// Capacity of the system metrics history
    pub fn metrics_history_capacity(&self) -> usize {
        let per_hour = 3600 / self.metrics_collection_interval_seconds.clamp(1, 3600);
        (self.metrics_retention_hours * per_hour).max(1) as usize
    }

    /// Capacity of one check's history given its interval
    pub fn check_history_capacity(&self, interval_seconds: u64) -> usize {
        ((self.metrics_retention_hours * 3600) / interval_seconds.max(1)).max(1) as usize
    }
}

/// Upper bound on the scheduler tick, in seconds
pub const MAX_TICK_SECONDS: u64 = 10;

fn default_check_interval_seconds() -> u64 {
    30
}

fn default_alert_cooldown_seconds() -> u64 {
    300
}

fn default_metrics_retention_hours() -> u64 {
    24
}

fn default_metrics_collection_interval_seconds() -> u64 {
    30
}

fn default_cleanup_interval_seconds() -> u64 {
    3600
}

fn default_max_concurrent_checks() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HealthMonitorConfig::default();
        assert!(config.enabled);
        assert!(config.alerts_enabled);
        assert_eq!(config.default_check_interval_seconds, 30);
        assert_eq!(config.alert_cooldown_seconds, 300);
        assert_eq!(config.metrics_retention_hours, 24);
        assert_eq!(config.max_concurrent_checks, 1);
    }

    #[test]
    fn test_tick_period_is_capped_at_ten_seconds() {
        let mut config = HealthMonitorConfig::default();
        assert_eq!(config.tick_period(), Duration::from_secs(10));

        config.default_check_interval_seconds = 4;
        assert_eq!(config.tick_period(), Duration::from_secs(4));
    }

    #[test]
    fn test_history_capacities() {
        let config = HealthMonitorConfig::default();
        // 24h at one sample per 30s
        assert_eq!(config.metrics_history_capacity(), 2880);
        assert_eq!(config.check_history_capacity(30), 2880);
        assert_eq!(config.check_history_capacity(60), 1440);
        assert_eq!(config.check_history_capacity(u64::MAX), 1);
    }

    #[test]
    fn test_merge_prefers_non_default_values() {
        let base = HealthMonitorConfig {
            alert_cooldown_seconds: 60,
            ..Default::default()
        };
        let other = HealthMonitorConfig {
            metrics_retention_hours: 2,
            alerts_enabled: false,
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.alert_cooldown_seconds, 60);
        assert_eq!(merged.metrics_retention_hours, 2);
        assert!(!merged.alerts_enabled);
        assert!(merged.enabled);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: HealthMonitorConfig =
            serde_yaml::from_str("alert_cooldown_seconds: 10\n").unwrap();
        assert_eq!(config.alert_cooldown_seconds, 10);
        assert_eq!(config.default_check_interval_seconds, 30);
    }
}
