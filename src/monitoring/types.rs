//! Type definitions shared by checks, results, alerts and system metrics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Free-form key/value details attached to results and alerts
pub type Details = HashMap<String, serde_json::Value>;

/// Status of a single check execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
    Unknown,
}

impl HealthStatus {
    /// Whether this status extends a failure streak
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, HealthStatus::Warning | HealthStatus::Critical)
    }

    /// Lowercase name as used in serialized output
    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Warning => "warning",
            HealthStatus::Critical => "critical",
            HealthStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "HEALTHY"),
            HealthStatus::Warning => write!(f, "WARNING"),
            HealthStatus::Critical => write!(f, "CRITICAL"),
            HealthStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Aggregate status across all checks.
///
/// `Degraded` only ever comes out of aggregation, never out of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Warning,
    Critical,
    Degraded,
    Unknown,
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallStatus::Healthy => write!(f, "HEALTHY"),
            OverallStatus::Warning => write!(f, "WARNING"),
            OverallStatus::Critical => write!(f, "CRITICAL"),
            OverallStatus::Degraded => write!(f, "DEGRADED"),
            OverallStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Kind of probe a check performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckType {
    System,
    Service,
    External,
    Custom,
}

/// Outcome of one check execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Check name
    pub name: String,
    /// Result status
    pub status: HealthStatus,
    /// Human readable message
    pub message: String,
    /// Additional details
    #[serde(default)]
    pub details: Details,
    /// Completion time
    pub timestamp: DateTime<Utc>,
    /// Wall-clock time of the whole attempt sequence, in milliseconds
    #[serde(default)]
    pub duration_ms: f64,
}

impl HealthCheckResult {
    /// Create a result stamped with the current time
    pub fn new(name: impl Into<String>, status: HealthStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
            details: HashMap::new(),
            timestamp: Utc::now(),
            duration_ms: 0.0,
        }
    }

    pub fn healthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, HealthStatus::Healthy, message)
    }

    pub fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, HealthStatus::Warning, message)
    }

    pub fn critical(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, HealthStatus::Critical, message)
    }

    pub fn unknown(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, HealthStatus::Unknown, message)
    }

    /// Attach a detail value
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Wrap a raw check return value into a healthy result.
    ///
    /// Objects become the details map; any other value lands under `result`.
    pub fn from_raw(name: impl Into<String>, value: serde_json::Value) -> Self {
        let details = match value {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            other => HashMap::from([("result".to_string(), other)]),
        };

        Self {
            details,
            ..Self::healthy(name, "Check passed")
        }
    }
}

/// What a check function hands back to the executor
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// A fully formed result, returned as-is whatever its status
    Structured(HealthCheckResult),
    /// Any other value, treated as a healthy pass
    Raw(serde_json::Value),
}

impl CheckOutcome {
    /// Resolve into a canonical result for the named check
    pub fn into_result(self, check_name: &str) -> HealthCheckResult {
        match self {
            CheckOutcome::Structured(result) => result,
            CheckOutcome::Raw(value) => HealthCheckResult::from_raw(check_name, value),
        }
    }
}

impl From<HealthCheckResult> for CheckOutcome {
    fn from(result: HealthCheckResult) -> Self {
        CheckOutcome::Structured(result)
    }
}

impl From<serde_json::Value> for CheckOutcome {
    fn from(value: serde_json::Value) -> Self {
        CheckOutcome::Raw(value)
    }
}

/// Alert severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSeverity::Warning => write!(f, "WARNING"),
            AlertSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Alert raised when a check's failure streak crosses its threshold
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    /// Alert ID
    pub id: String,
    /// Check that triggered the alert
    pub check_name: String,
    /// Status of the latest result
    pub status: HealthStatus,
    /// Message of the latest result
    pub message: String,
    /// Length of the failure streak
    pub consecutive_failures: u32,
    /// Whether the check is flagged critical
    pub is_critical_check: bool,
    /// Alert timestamp
    pub timestamp: DateTime<Utc>,
    /// Details of the latest result
    pub details: Details,
}

impl Alert {
    /// Critical checks alert as CRITICAL, everything else as WARNING
    pub fn severity(&self) -> AlertSeverity {
        if self.is_critical_check {
            AlertSeverity::Critical
        } else {
            AlertSeverity::Warning
        }
    }
}

/// Network interface counters, summed over all interfaces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

/// One sample of OS-level resource usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMetricsSnapshot {
    /// Sample time
    pub timestamp: DateTime<Utc>,
    /// CPU usage percentage
    pub cpu_percent: f64,
    /// Memory usage percentage
    pub memory_percent: f64,
    pub memory_used_gb: f64,
    pub memory_total_gb: f64,
    /// Disk usage percentage of the root filesystem
    pub disk_percent: f64,
    pub disk_used_gb: f64,
    pub disk_total_gb: f64,
    /// Network counters
    pub network: NetworkCounters,
    /// Number of running processes
    pub process_count: usize,
    /// 1, 5 and 15 minute load average; zeros where the platform has none
    pub load_average: [f64; 3],
    /// Host uptime
    pub uptime_seconds: u64,
}

impl SystemMetricsSnapshot {
    /// A sample with every value zeroed
    pub fn zeroed() -> Self {
        Self {
            timestamp: Utc::now(),
            cpu_percent: 0.0,
            memory_percent: 0.0,
            memory_used_gb: 0.0,
            memory_total_gb: 0.0,
            disk_percent: 0.0,
            disk_used_gb: 0.0,
            disk_total_gb: 0.0,
            network: NetworkCounters::default(),
            process_count: 0,
            load_average: [0.0; 3],
            uptime_seconds: 0,
        }
    }
}
