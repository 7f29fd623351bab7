//! Aggregate status computation

use super::types::{HealthIssue, HealthSummary};
use crate::monitoring::types::{HealthCheckResult, HealthStatus, OverallStatus};
use chrono::Utc;

/// Latest result of one check, as seen by the aggregator
#[derive(Debug, Clone, Copy)]
pub struct LatestResult<'a> {
    pub check: &'a str,
    pub result: &'a HealthCheckResult,
    pub is_critical_check: bool,
}

/// Folds the latest result of every check into one overall status.
///
/// Precedence: any CRITICAL wins, then any WARNING, then any UNKNOWN (degraded),
/// otherwise healthy. No results at all is UNKNOWN.
pub fn compute_overall_health<'a, I>(latest: I, total_checks: usize) -> HealthSummary
where
    I: IntoIterator<Item = LatestResult<'a>>,
{
    let mut critical_issues = Vec::new();
    let mut warning_issues = Vec::new();
    let mut seen = 0usize;
    let mut any_unknown = false;

    for entry in latest {
        seen += 1;
        let issue = || HealthIssue {
            check: entry.check.to_string(),
            message: entry.result.message.clone(),
            is_critical_check: entry.is_critical_check,
        };

        match entry.result.status {
            HealthStatus::Critical => critical_issues.push(issue()),
            HealthStatus::Warning => warning_issues.push(issue()),
            HealthStatus::Unknown => any_unknown = true,
            HealthStatus::Healthy => {}
        }
    }

    let (status, message) = if seen == 0 {
        (
            OverallStatus::Unknown,
            "No health checks performed yet".to_string(),
        )
    } else if !critical_issues.is_empty() {
        (
            OverallStatus::Critical,
            format!("{} critical issues detected", critical_issues.len()),
        )
    } else if !warning_issues.is_empty() {
        (
            OverallStatus::Warning,
            format!("{} warnings detected", warning_issues.len()),
        )
    } else if any_unknown {
        (
            OverallStatus::Degraded,
            "Some checks could not be performed".to_string(),
        )
    } else {
        (OverallStatus::Healthy, "All systems operational".to_string())
    };

    HealthSummary {
        status,
        message,
        critical_issues,
        warning_issues,
        total_checks,
        last_updated: Utc::now(),
    }
}
