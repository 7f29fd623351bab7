//! Alert dispatcher: threshold and cooldown gating, fan-out to handlers

use super::channels::AlertHandler;
use super::types::{AlertCandidate, AlertStats, AlertStorage};
use crate::monitoring::types::Alert;
use chrono::Utc;
use futures::FutureExt;
use parking_lot::RwLock;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock as TokioRwLock;
use tokio::time::Instant;
use tracing::{debug, error, info};

/// Turns sustained failures into alerts, at most one per check per cooldown window
#[derive(Debug)]
pub struct AlertDispatcher {
    /// Whether alerts are sent at all
    enabled: bool,
    /// Minimum spacing between alerts for the same check
    cooldown: Duration,
    /// Cooldown bookkeeping and statistics
    pub(super) storage: RwLock<AlertStorage>,
    /// Handlers - using tokio RwLock because we need to hold across await points
    pub(super) handlers: TokioRwLock<Vec<Arc<dyn AlertHandler>>>,
}

impl AlertDispatcher {
    pub fn new(enabled: bool, cooldown: Duration) -> Self {
        Self {
            enabled,
            cooldown,
            storage: RwLock::new(AlertStorage::default()),
            handlers: TokioRwLock::new(Vec::new()),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Register a handler. Handlers are invoked in registration order.
    pub async fn add_handler(&self, handler: Arc<dyn AlertHandler>) {
        info!(handler = handler.name(), "Added alert handler");
        self.handlers.write().await.push(handler);
    }

    pub async fn handler_count(&self) -> usize {
        self.handlers.read().await.len()
    }

    /// Whether the cooldown for a check has elapsed at `now`
    pub fn cooldown_elapsed(&self, check_name: &str, now: Instant) -> bool {
        match self.storage.read().last_alert.get(check_name) {
            Some(last) => now.saturating_duration_since(*last) >= self.cooldown,
            None => true,
        }
    }

    /// Send alerts for every candidate whose cooldown has elapsed.
    ///
    /// A no-op when alerting is disabled or no handlers are registered. Returns the
    /// number of alerts sent.
    pub async fn process(&self, candidates: Vec<AlertCandidate>, now: Instant) -> usize {
        if !self.enabled || candidates.is_empty() {
            return 0;
        }

        let handlers = self.handlers.read().await;
        if handlers.is_empty() {
            return 0;
        }

        let mut sent = 0;
        for candidate in candidates {
            if !self.cooldown_elapsed(&candidate.check_name, now) {
                debug!(check = %candidate.check_name, "Alert suppressed by cooldown");
                continue;
            }

            let alert = Alert {
                id: uuid::Uuid::new_v4().to_string(),
                check_name: candidate.check_name,
                status: candidate.latest.status,
                message: candidate.latest.message,
                consecutive_failures: candidate.consecutive_failures,
                is_critical_check: candidate.is_critical_check,
                timestamp: Utc::now(),
                details: candidate.latest.details,
            };

            let failed = Self::fan_out(&handlers, &alert).await;

            {
                let mut storage = self.storage.write();
                storage.last_alert.insert(alert.check_name.clone(), now);
                storage.stats.total_alerts += 1;
                *storage
                    .stats
                    .alerts_by_check
                    .entry(alert.check_name.clone())
                    .or_insert(0) += 1;
                storage.stats.failed_notifications += failed;
                storage.stats.last_alert = Some(alert.timestamp);
            }

            info!(
                check = %alert.check_name,
                severity = %alert.severity(),
                consecutive_failures = alert.consecutive_failures,
                "Alert dispatched"
            );
            sent += 1;
        }

        sent
    }

    /// Invoke every interested handler, isolating errors and panics.
    /// Returns the number of failed invocations.
    async fn fan_out(handlers: &[Arc<dyn AlertHandler>], alert: &Alert) -> u64 {
        let mut failed = 0;

        for handler in handlers {
            if !handler.supports_severity(alert.severity()) {
                continue;
            }

            match AssertUnwindSafe(handler.handle(alert)).catch_unwind().await {
                Ok(Ok(())) => debug!(handler = handler.name(), check = %alert.check_name, "Alert sent"),
                Ok(Err(e)) => {
                    error!(handler = handler.name(), check = %alert.check_name, "Alert handler failed: {}", e);
                    failed += 1;
                }
                Err(panic) => {
                    error!(
                        handler = handler.name(),
                        check = %alert.check_name,
                        "Alert handler panicked: {}",
                        crate::utils::error::panic_message(panic.as_ref())
                    );
                    failed += 1;
                }
            }
        }

        failed
    }

    pub fn stats(&self) -> AlertStats {
        self.storage.read().stats.clone()
    }
}
