//! Retry mechanism with optional exponential backoff

use super::types::RetryConfig;
use std::time::Duration;
use tracing::debug;

/// Retry mechanism with optional exponential backoff
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Maximum number of attempts this policy performs
    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts.max(1)
    }

    /// Delay to sleep after the given (1-based) failed attempt
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let mut delay = self.config.base_delay;
        for _ in 1..attempt {
            let grown = Duration::try_from_secs_f64(
                delay.as_secs_f64() * self.config.backoff_multiplier,
            )
            .unwrap_or(self.config.max_delay);
            delay = std::cmp::min(grown, self.config.max_delay);
        }
        delay
    }

    /// Execute a function with retry logic.
    ///
    /// The closure receives the 1-based attempt number. No sleep happens after
    /// the final attempt; the last error is returned as-is.
    pub async fn call<F, Fut, R, E>(&self, mut f: F) -> std::result::Result<R, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: std::future::Future<Output = std::result::Result<R, E>>,
        E: std::fmt::Display,
    {
        let max_attempts = self.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;

            match f(attempt).await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!("Retry succeeded on attempt {}", attempt);
                    }
                    return Ok(result);
                }
                Err(error) => {
                    if attempt >= max_attempts {
                        return Err(error);
                    }

                    let delay = self.delay_after(attempt);
                    debug!(
                        "Attempt {} failed: {}, retrying in {:?}",
                        attempt, error, delay
                    );

                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
    }
}
