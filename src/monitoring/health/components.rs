//! Built-in health checks for host resources and service statistics

use super::check::HealthCheck;
use crate::monitoring::metrics::system;
use crate::monitoring::types::{CheckOutcome, CheckType, HealthCheckResult, HealthStatus};
use crate::utils::error::{HealthError, Result};
use std::sync::Arc;

pub const SYSTEM_CPU: &str = "system_cpu";
pub const SYSTEM_MEMORY: &str = "system_memory";
pub const SYSTEM_DISK: &str = "system_disk";
pub const SERVICE_RESPONSE_TIME: &str = "service_response_time";
pub const SERVICE_ERROR_RATE: &str = "service_error_rate";

/// Request statistics for one service action
#[derive(Debug, Clone, PartialEq)]
pub struct ActionStats {
    pub action: String,
    pub total_requests: u64,
    pub failed_requests: u64,
    pub avg_response_time_ms: f64,
}

/// Supplies request statistics to the service checks
pub trait ServiceStatsSource: Send + Sync {
    fn action_stats(&self) -> Vec<ActionStats>;
}

/// Warning and critical limits for a percentage or latency reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub warning: f64,
    pub critical: f64,
    /// Whether reaching a limit exactly counts as crossing it
    pub inclusive: bool,
}

impl Thresholds {
    pub const fn exceeding(warning: f64, critical: f64) -> Self {
        Self {
            warning,
            critical,
            inclusive: false,
        }
    }

    pub const fn at_least(warning: f64, critical: f64) -> Self {
        Self {
            warning,
            critical,
            inclusive: true,
        }
    }

    pub fn classify(&self, value: f64) -> HealthStatus {
        let crosses = |limit: f64| {
            if self.inclusive {
                value >= limit
            } else {
                value > limit
            }
        };

        if crosses(self.critical) {
            HealthStatus::Critical
        } else if crosses(self.warning) {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }
}

pub const CPU_THRESHOLDS: Thresholds = Thresholds::exceeding(75.0, 90.0);
pub const MEMORY_THRESHOLDS: Thresholds = Thresholds::exceeding(80.0, 90.0);
pub const DISK_THRESHOLDS: Thresholds = Thresholds::at_least(85.0, 95.0);
pub const RESPONSE_TIME_THRESHOLDS: Thresholds = Thresholds::exceeding(5000.0, 10000.0);
pub const ERROR_RATE_THRESHOLDS: Thresholds = Thresholds::exceeding(5.0, 10.0);

fn level_word(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Critical => "critical",
        HealthStatus::Warning => "high",
        _ => "normal",
    }
}

fn percent_result(
    name: &str,
    label: &str,
    percent: f64,
    thresholds: Thresholds,
) -> HealthCheckResult {
    let status = thresholds.classify(percent);
    HealthCheckResult::new(
        name,
        status,
        format!("{} {}: {:.1}%", label, level_word(status), percent),
    )
}

pub fn evaluate_cpu(cpu_percent: f64) -> HealthCheckResult {
    percent_result(SYSTEM_CPU, "CPU usage", cpu_percent, CPU_THRESHOLDS)
        .with_detail("cpu_percent", cpu_percent)
}

pub fn evaluate_memory(usage: system::ResourceUsage) -> HealthCheckResult {
    percent_result(SYSTEM_MEMORY, "Memory usage", usage.percent, MEMORY_THRESHOLDS)
        .with_detail("memory_percent", usage.percent)
        .with_detail("memory_used_gb", usage.used_gb)
        .with_detail("memory_total_gb", usage.total_gb)
}

pub fn evaluate_disk(usage: system::ResourceUsage) -> HealthCheckResult {
    percent_result(SYSTEM_DISK, "Disk usage", usage.percent, DISK_THRESHOLDS)
        .with_detail("disk_percent", usage.percent)
        .with_detail("disk_used_gb", usage.used_gb)
        .with_detail("disk_total_gb", usage.total_gb)
}

/// Request-weighted average latency across actions
pub fn evaluate_response_time(stats: &[ActionStats]) -> HealthCheckResult {
    if stats.is_empty() {
        return HealthCheckResult::healthy(SERVICE_RESPONSE_TIME, "No recent requests");
    }

    let total_requests: u64 = stats.iter().map(|s| s.total_requests).sum();
    let total_time: f64 = stats
        .iter()
        .map(|s| s.avg_response_time_ms * s.total_requests as f64)
        .sum();
    let avg = if total_requests == 0 {
        0.0
    } else {
        total_time / total_requests as f64
    };

    let status = RESPONSE_TIME_THRESHOLDS.classify(avg);
    HealthCheckResult::new(
        SERVICE_RESPONSE_TIME,
        status,
        format!("Response time {}: {:.0}ms", level_word(status), avg),
    )
    .with_detail("avg_response_time_ms", avg)
    .with_detail("total_requests", total_requests)
}

pub fn evaluate_error_rate(stats: &[ActionStats]) -> HealthCheckResult {
    let total_requests: u64 = stats.iter().map(|s| s.total_requests).sum();
    let failed_requests: u64 = stats.iter().map(|s| s.failed_requests).sum();
    let rate = if total_requests == 0 {
        0.0
    } else {
        failed_requests as f64 / total_requests as f64 * 100.0
    };

    percent_result(SERVICE_ERROR_RATE, "Error rate", rate, ERROR_RATE_THRESHOLDS)
        .with_detail("error_rate_percent", rate)
        .with_detail("total_requests", total_requests)
        .with_detail("failed_requests", failed_requests)
}

fn analytics_unavailable(name: &str) -> HealthCheckResult {
    HealthCheckResult::unknown(name, "Analytics not available")
}

/// The default check set registered at construction
pub fn default_checks(stats: Option<Arc<dyn ServiceStatsSource>>) -> Vec<HealthCheck> {
    let response_stats = stats.clone();
    let error_stats = stats;

    vec![
        HealthCheck::new(SYSTEM_CPU, CheckType::System, || async {
            let cpu = system::sample_cpu_usage().await?;
            Ok::<_, HealthError>(CheckOutcome::from(evaluate_cpu(cpu)))
        })
        .with_interval(30)
        .critical(true),
        HealthCheck::new(SYSTEM_MEMORY, CheckType::System, || async {
            let memory = system::run_blocking(system::memory_usage).await?;
            Ok::<_, HealthError>(CheckOutcome::from(evaluate_memory(memory)))
        })
        .with_interval(30)
        .critical(true),
        HealthCheck::new(SYSTEM_DISK, CheckType::System, || async {
            let disk = system::run_blocking(system::disk_usage).await?;
            Ok::<_, HealthError>(CheckOutcome::from(evaluate_disk(disk)))
        })
        .with_interval(60)
        .critical(true),
        HealthCheck::new(SERVICE_RESPONSE_TIME, CheckType::Service, move || {
            let stats = response_stats.clone();
            async move { service_outcome(stats, SERVICE_RESPONSE_TIME, evaluate_response_time) }
        })
        .with_interval(30),
        HealthCheck::new(SERVICE_ERROR_RATE, CheckType::Service, move || {
            let stats = error_stats.clone();
            async move { service_outcome(stats, SERVICE_ERROR_RATE, evaluate_error_rate) }
        })
        .with_interval(60),
    ]
}

fn service_outcome(
    source: Option<Arc<dyn ServiceStatsSource>>,
    name: &str,
    evaluate: fn(&[ActionStats]) -> HealthCheckResult,
) -> Result<CheckOutcome> {
    let result = match source {
        Some(source) => evaluate(&source.action_stats()),
        None => analytics_unavailable(name),
    };
    Ok(result.into())
}
