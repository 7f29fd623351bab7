//! Core HealthMonitor implementation

use crate::config::{HealthMonitorConfig, Validate};
use crate::utils::error::{HealthError, Result};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::alerts::{AlertDispatcher, AlertHandler, AlertStats};
use super::health::components::{ServiceStatsSource, default_checks};
use super::health::{
    CheckDetail, CheckExecutor, CheckRegistry, FailureTracker, HealthCheck, HealthReport,
    HealthSummary, LatestResult, ResultStore, SystemSummary, compute_overall_health,
};
use super::metrics::{MetricsSampler, SystemMetricsCollector};
use super::retention::RetentionCleaner;
use super::types::{HealthCheckResult, SystemMetricsSnapshot};

/// Consolidated check state - single lock for registry, histories and bookkeeping
#[derive(Debug, Default)]
pub(super) struct MonitorState {
    pub registry: CheckRegistry,
    pub results: ResultStore,
    pub failures: FailureTracker,
    /// Tick time of each check's last completed execution
    pub last_run: HashMap<String, Instant>,
    /// Checks currently executing
    pub in_flight: HashSet<String>,
}

/// Handles of the running background loops
#[derive(Debug)]
pub(super) struct BackgroundTasks {
    pub cancel: CancellationToken,
    pub handles: Vec<JoinHandle<()>>,
}

/// Scheduled health checking with aggregate status, failure streaks and alerting
#[derive(Clone)]
pub struct HealthMonitor {
    /// Monitor configuration
    pub(super) config: Arc<HealthMonitorConfig>,
    /// Check state
    pub(super) state: Arc<RwLock<MonitorState>>,
    /// Check executor
    pub(super) executor: CheckExecutor,
    /// Alert dispatcher
    pub(super) alerts: Arc<AlertDispatcher>,
    /// Host metrics collector
    pub(super) metrics: Arc<SystemMetricsCollector>,
    /// Retention cleaner
    pub(super) cleaner: RetentionCleaner,
    /// Background loops, present while started
    pub(super) tasks: Arc<Mutex<Option<BackgroundTasks>>>,
}

impl std::fmt::Debug for HealthMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthMonitor")
            .field("config", &self.config)
            .field("checks", &self.state.read().registry.len())
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

/// Builder for [`HealthMonitor`]
pub struct HealthMonitorBuilder {
    config: HealthMonitorConfig,
    default_checks: bool,
    service_stats: Option<Arc<dyn ServiceStatsSource>>,
    metrics_sampler: Option<Arc<dyn MetricsSampler>>,
}

impl HealthMonitorBuilder {
    /// Skip registration of the built-in system and service checks
    pub fn without_default_checks(mut self) -> Self {
        self.default_checks = false;
        self
    }

    /// Source of request statistics for the built-in service checks
    pub fn with_service_stats(mut self, source: Arc<dyn ServiceStatsSource>) -> Self {
        self.service_stats = Some(source);
        self
    }

    /// Replace the sysinfo sampler used for host metrics
    pub fn with_metrics_sampler(mut self, sampler: Arc<dyn MetricsSampler>) -> Self {
        self.metrics_sampler = Some(sampler);
        self
    }

    pub fn build(self) -> Result<HealthMonitor> {
        self.config
            .validate()
            .map_err(|e| HealthError::config(format!("Monitor config error: {}", e)))?;

        let capacity = self.config.metrics_history_capacity();
        let metrics = match self.metrics_sampler {
            Some(sampler) => SystemMetricsCollector::with_sampler(capacity, sampler),
            None => SystemMetricsCollector::new(capacity),
        };

        let monitor = HealthMonitor {
            alerts: Arc::new(AlertDispatcher::new(
                self.config.alerts_enabled,
                self.config.alert_cooldown(),
            )),
            cleaner: RetentionCleaner::new(self.config.retention()),
            config: Arc::new(self.config),
            state: Arc::new(RwLock::new(MonitorState::default())),
            executor: CheckExecutor::new(),
            metrics: Arc::new(metrics),
            tasks: Arc::new(Mutex::new(None)),
        };

        if self.default_checks {
            for check in default_checks(self.service_stats) {
                monitor.add_health_check(check)?;
            }
        }

        info!(
            "Health monitor initialized with {} checks",
            monitor.state.read().registry.len()
        );
        Ok(monitor)
    }
}

impl HealthMonitor {
    /// Create a monitor with the default checks registered
    pub fn new(config: HealthMonitorConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: HealthMonitorConfig) -> HealthMonitorBuilder {
        HealthMonitorBuilder {
            config,
            default_checks: true,
            service_stats: None,
            metrics_sampler: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &HealthMonitorConfig {
        &self.config
    }

    /// Register a check, replacing any check with the same name
    pub fn add_health_check(&self, check: HealthCheck) -> Result<()> {
        self.state.write().registry.add(check)
    }

    /// Remove a check together with its history, failure streak and schedule.
    ///
    /// Returns whether the check existed.
    pub fn remove_health_check(&self, name: &str) -> bool {
        let mut state = self.state.write();
        let existed = state.registry.remove(name);
        state.results.remove(name);
        state.failures.remove(name);
        state.last_run.remove(name);

        if existed {
            info!(check = name, "Removed health check");
        }
        existed
    }

    /// Enable or disable a check, returning whether it exists
    pub fn enable_check(&self, name: &str, enabled: bool) -> bool {
        let found = self.state.write().registry.set_enabled(name, enabled);
        if found {
            info!(check = name, enabled, "Health check toggled");
        }
        found
    }

    /// Registered check names in order
    pub fn check_names(&self) -> Vec<String> {
        self.state.read().registry.names()
    }

    pub fn get_check(&self, name: &str) -> Option<HealthCheck> {
        self.state.read().registry.get(name).cloned()
    }

    /// Result history of a check, oldest first
    pub fn check_history(&self, name: &str) -> Vec<HealthCheckResult> {
        self.state.read().results.history(name)
    }

    pub fn latest_result(&self, name: &str) -> Option<HealthCheckResult> {
        self.state.read().results.latest(name).cloned()
    }

    pub fn consecutive_failures(&self, name: &str) -> u32 {
        self.state.read().failures.get(name)
    }

    pub async fn add_alert_handler(&self, handler: Arc<dyn AlertHandler>) {
        self.alerts.add_handler(handler).await;
    }

    pub fn alert_stats(&self) -> AlertStats {
        self.alerts.stats()
    }

    /// Aggregate status over the latest result of every check
    pub fn get_overall_health(&self) -> HealthSummary {
        let state = self.state.read();
        Self::summarize(&state)
    }

    fn summarize(state: &MonitorState) -> HealthSummary {
        let latest = state
            .results
            .latest_all()
            .map(|(check, result)| LatestResult {
                check,
                result,
                is_critical_check: state
                    .registry
                    .get(check)
                    .map(|c| c.critical)
                    .unwrap_or(false),
            });
        compute_overall_health(latest, state.registry.len())
    }

    /// Full report: overall status, per-check details and host metrics
    pub fn get_health_report(&self) -> HealthReport {
        let (overall_health, check_details) = {
            let state = self.state.read();
            let details = state
                .results
                .latest_all()
                .map(|(name, result)| {
                    (
                        name.to_string(),
                        CheckDetail {
                            status: result.status,
                            message: result.message.clone(),
                            last_check: result.timestamp,
                            duration_ms: result.duration_ms,
                            consecutive_failures: state.failures.get(name),
                            details: result.details.clone(),
                        },
                    )
                })
                .collect();
            (Self::summarize(&state), details)
        };

        let system_metrics = self.metrics.latest();

        HealthReport {
            overall_health,
            check_details,
            system_summary: system_metrics.as_ref().map(SystemSummary::from),
            system_metrics,
            monitoring_enabled: self.config.enabled,
            alerts_enabled: self.config.alerts_enabled,
            report_generated: chrono::Utc::now(),
        }
    }

    /// Sample host metrics once and append them to the history
    pub async fn collect_system_metrics(&self) -> Option<SystemMetricsSnapshot> {
        self.metrics.collect().await
    }

    /// Retained host snapshots, oldest first
    pub fn system_metrics_history(&self) -> Vec<SystemMetricsSnapshot> {
        self.metrics.history()
    }
}
