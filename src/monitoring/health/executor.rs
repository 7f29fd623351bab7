//! Single-check execution with per-attempt timeout and retry

use super::check::HealthCheck;
use crate::monitoring::types::HealthCheckResult;
use crate::utils::error::{HealthError, RetryPolicy, panic_message};
use chrono::Utc;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Runs one check to completion and always yields a result
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckExecutor;

impl CheckExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Execute a check, retrying failed, panicked or timed-out attempts.
    ///
    /// A successful attempt yields the check's own result (or a wrapped raw value).
    /// Exhausting all attempts yields a CRITICAL result carrying the last error.
    /// Duration covers the whole attempt sequence.
    pub async fn execute(&self, check: &HealthCheck) -> HealthCheckResult {
        let started = Instant::now();
        let policy = RetryPolicy::new(check.retry_config());
        let timeout = check.timeout();
        let attempts = policy.max_attempts();

        let outcome = policy
            .call(|attempt| {
                let function = check.check_function.clone();
                let name = check.name.as_str();
                async move {
                    debug!(check = %name, attempt, "Running health check");
                    let run = AssertUnwindSafe(async { function.run().await }).catch_unwind();
                    match tokio::time::timeout(timeout, run).await {
                        Ok(Ok(result)) => result,
                        Ok(Err(panic)) => Err(HealthError::check(panic_message(panic.as_ref()))),
                        Err(_) => Err(HealthError::timeout("Check timeout")),
                    }
                }
            })
            .await;

        let mut result = match outcome {
            Ok(outcome) => outcome.into_result(&check.name),
            Err(e) => {
                let reason = e.reason();
                warn!(
                    check = %check.name,
                    attempts,
                    "Health check failed after retries: {}", reason
                );
                HealthCheckResult::critical(
                    &check.name,
                    format!("Check failed after {} attempts: {}", attempts, reason),
                )
                .with_detail("attempts", attempts)
                .with_detail("last_error", reason)
            }
        };

        result.duration_ms = started.elapsed().as_secs_f64() * 1000.0;
        result.timestamp = Utc::now();
        result
    }
}
