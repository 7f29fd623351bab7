//! Configuration loading integration tests

#[cfg(test)]
mod tests {
    use healthmon_rs::config::{Config, HealthMonitorConfig};
    use healthmon_rs::{HealthError, HealthMonitor};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let file = write_config(
            "monitor:\n  alert_cooldown_seconds: 60\n  max_concurrent_checks: 4\n",
        );

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.monitor.alert_cooldown_seconds, 60);
        assert_eq!(config.monitor.max_concurrent_checks, 4);
        assert_eq!(config.monitor.metrics_retention_hours, 24);
        assert!(config.monitor.enabled);
    }

    #[tokio::test]
    async fn test_empty_file_is_default_config() {
        let file = write_config("{}\n");
        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_invalid_values_rejected() {
        let file = write_config("monitor:\n  metrics_retention_hours: 0\n");
        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, HealthError::Config(_)));
        assert!(err.to_string().contains("Monitor config error"));
    }

    #[tokio::test]
    async fn test_malformed_yaml_rejected() {
        let file = write_config("monitor: [unclosed\n");
        assert!(Config::from_file(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_rejected() {
        let err = Config::from_file("/nonexistent/healthmon.yaml")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[tokio::test]
    async fn test_yaml_export_loads_back() {
        let config = Config {
            monitor: HealthMonitorConfig {
                alerts_enabled: false,
                cleanup_interval_seconds: 600,
                ..Default::default()
            },
        };
        let file = write_config(&config.to_yaml().unwrap());
        assert_eq!(Config::from_file(file.path()).await.unwrap(), config);
    }

    #[tokio::test]
    async fn test_loaded_config_drives_monitor() {
        let file = write_config("monitor:\n  default_check_interval_seconds: 4\n");
        let config = Config::from_file(file.path()).await.unwrap();

        let monitor = HealthMonitor::builder(config.monitor)
            .without_default_checks()
            .build()
            .unwrap();
        assert_eq!(monitor.config().tick_period().as_secs(), 4);
    }
}
