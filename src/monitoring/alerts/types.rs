//! Alert types and data structures

use crate::monitoring::types::HealthCheckResult;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::time::Instant;

/// Consolidated dispatcher bookkeeping - single lock for related data
#[derive(Debug, Default)]
pub(super) struct AlertStorage {
    /// Last time an alert was sent per check
    pub last_alert: HashMap<String, Instant>,
    /// Alert statistics
    pub stats: AlertStats,
}

/// A check whose failure streak has reached its alert threshold
#[derive(Debug, Clone)]
pub struct AlertCandidate {
    pub check_name: String,
    pub consecutive_failures: u32,
    pub is_critical_check: bool,
    /// Latest result of the check
    pub latest: HealthCheckResult,
}

/// Alert statistics
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct AlertStats {
    /// Total alerts sent
    pub total_alerts: u64,
    /// Alerts sent per check
    pub alerts_by_check: HashMap<String, u64>,
    /// Handler invocations that failed or panicked
    pub failed_notifications: u64,
    /// Last alert timestamp
    pub last_alert: Option<DateTime<Utc>>,
}
