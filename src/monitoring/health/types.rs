//! Health summary and report types

use crate::monitoring::types::{Details, HealthStatus, OverallStatus, SystemMetricsSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// One non-healthy check contributing to the overall status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthIssue {
    pub check: String,
    pub message: String,
    pub is_critical_check: bool,
}

/// Aggregate health derived from the latest result of each check
#[derive(Debug, Clone, Serialize)]
pub struct HealthSummary {
    pub status: OverallStatus,
    pub message: String,
    pub critical_issues: Vec<HealthIssue>,
    pub warning_issues: Vec<HealthIssue>,
    /// Number of registered checks
    pub total_checks: usize,
    pub last_updated: DateTime<Utc>,
}

/// Latest state of a single check
#[derive(Debug, Clone, Serialize)]
pub struct CheckDetail {
    pub status: HealthStatus,
    pub message: String,
    pub last_check: DateTime<Utc>,
    pub duration_ms: f64,
    pub consecutive_failures: u32,
    pub details: Details,
}

/// Condensed view of the most recent host snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSummary {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
    pub process_count: usize,
    pub uptime_hours: f64,
}

impl From<&SystemMetricsSnapshot> for SystemSummary {
    fn from(snapshot: &SystemMetricsSnapshot) -> Self {
        Self {
            cpu_percent: snapshot.cpu_percent,
            memory_percent: snapshot.memory_percent,
            disk_percent: snapshot.disk_percent,
            process_count: snapshot.process_count,
            uptime_hours: snapshot.uptime_seconds as f64 / 3600.0,
        }
    }
}

/// Full health report
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub overall_health: HealthSummary,
    /// Only checks that have at least one result
    pub check_details: BTreeMap<String, CheckDetail>,
    pub system_summary: Option<SystemSummary>,
    pub system_metrics: Option<SystemMetricsSnapshot>,
    pub monitoring_enabled: bool,
    pub alerts_enabled: bool,
    pub report_generated: DateTime<Utc>,
}
