//! Scheduling pass: due-check selection, bounded execution, result commit and alerting

use futures::{FutureExt, StreamExt};
use parking_lot::RwLock;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use super::alerts::AlertCandidate;
use super::health::HealthCheck;
use super::system::{HealthMonitor, MonitorState};
use super::types::{HealthCheckResult, HealthStatus};
use crate::utils::error::panic_message;

/// Marks a check as executing; cleared on drop, including cancellation
struct InFlight {
    state: Arc<RwLock<MonitorState>>,
    name: String,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.state.write().in_flight.remove(&self.name);
    }
}

impl HealthMonitor {
    /// Enabled checks that are due at `now` and not already executing, in name order
    pub fn due_checks(&self, now: Instant) -> Vec<HealthCheck> {
        let state = self.state.read();
        state
            .registry
            .iter()
            .filter(|check| check.enabled && !state.in_flight.contains(&check.name))
            .filter(|check| match state.last_run.get(&check.name) {
                Some(last) => now.saturating_duration_since(*last) >= check.interval(),
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Run one scheduling pass at tick time `now`.
    ///
    /// Executes every due check through a pool bounded by `max_concurrent_checks`,
    /// commits each result, then runs the alert pass, even when nothing was due.
    /// Returns the names of the checks executed.
    pub async fn tick(&self, now: Instant) -> Vec<String> {
        let due = self.claim_due_checks(now);
        let mut executed: Vec<String> = Vec::with_capacity(due.len());

        if !due.is_empty() {
            debug!(due = due.len(), "Running due health checks");

            let limit = self.config.max_concurrent_checks.max(1);
            executed = futures::stream::iter(due)
                .map(|(check, guard)| {
                    let monitor = self.clone();
                    async move { monitor.run_check(check, guard, now).await }
                })
                .buffer_unordered(limit)
                .collect()
                .await;
            executed.sort();
        }

        // cooldowns can expire on ticks where nothing is due
        let candidates = self.alert_candidates();
        self.alerts.process(candidates, now).await;

        executed
    }

    fn claim_due_checks(&self, now: Instant) -> Vec<(HealthCheck, InFlight)> {
        let due = self.due_checks(now);
        let mut state = self.state.write();

        due.into_iter()
            .filter(|check| state.in_flight.insert(check.name.clone()))
            .map(|check| {
                let guard = InFlight {
                    state: self.state.clone(),
                    name: check.name.clone(),
                };
                (check, guard)
            })
            .collect()
    }

    async fn run_check(&self, check: HealthCheck, guard: InFlight, now: Instant) -> String {
        let outcome = AssertUnwindSafe(self.executor.execute(&check))
            .catch_unwind()
            .await;

        match outcome {
            Ok(result) => self.commit(&check, result, now, true),
            Err(panic) => {
                let reason = panic_message(panic.as_ref());
                error!(check = %check.name, "Health check execution failed: {}", reason);
                let result = HealthCheckResult::unknown(
                    &check.name,
                    format!("Check execution failed: {}", reason),
                );
                self.commit(&check, result, now, false);
            }
        }

        drop(guard);
        check.name
    }

    /// Store a result under one lock. Results of checks removed mid-execution are dropped.
    fn commit(&self, check: &HealthCheck, result: HealthCheckResult, now: Instant, track: bool) {
        match result.status {
            HealthStatus::Warning => warn!(check = %check.name, "Health check warning: {}", result.message),
            HealthStatus::Critical => error!(check = %check.name, "Health check critical: {}", result.message),
            _ => debug!(check = %check.name, status = %result.status, "Health check completed"),
        }

        let capacity = self.config.check_history_capacity(check.interval_seconds);
        let mut state = self.state.write();
        if !state.registry.contains(&check.name) {
            debug!(check = %check.name, "Discarding result of removed check");
            return;
        }

        if track {
            state.failures.record(&check.name, result.status);
        }
        state.last_run.insert(check.name.clone(), now);
        state.results.append(&check.name, result, capacity);
    }

    /// Checks whose failure streak has reached their alert threshold
    fn alert_candidates(&self) -> Vec<AlertCandidate> {
        let state = self.state.read();
        state
            .registry
            .iter()
            .filter_map(|check| {
                let failures = state.failures.get(&check.name);
                if failures < check.alert_threshold {
                    return None;
                }
                state.results.latest(&check.name).map(|latest| AlertCandidate {
                    check_name: check.name.clone(),
                    consecutive_failures: failures,
                    is_critical_check: check.critical,
                    latest: latest.clone(),
                })
            })
            .collect()
    }
}
