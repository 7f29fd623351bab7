//! Health check definitions

use crate::monitoring::types::{CheckOutcome, CheckType};
use crate::utils::error::{HealthError, Result, RetryConfig};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on the pause between attempts once backoff kicks in
const MAX_RETRY_DELAY_SECONDS: u64 = 3600;

/// A probe that produces a health outcome.
///
/// Any `Fn() -> impl Future<Output = Result<CheckOutcome>>` closure implements this.
#[async_trait]
pub trait CheckFunction: Send + Sync {
    /// Run the probe once
    async fn run(&self) -> Result<CheckOutcome>;
}

#[async_trait]
impl<F, Fut> CheckFunction for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<CheckOutcome>> + Send,
{
    async fn run(&self) -> Result<CheckOutcome> {
        (self)().await
    }
}

/// A registered health check
#[derive(Clone)]
pub struct HealthCheck {
    /// Unique name
    pub name: String,
    /// Probe kind
    pub check_type: CheckType,
    /// The probe itself
    pub check_function: Arc<dyn CheckFunction>,
    /// Seconds between executions
    pub interval_seconds: u64,
    /// Per-attempt timeout in seconds
    pub timeout_seconds: u64,
    /// Total number of attempts per execution
    pub retry_count: u32,
    /// Pause between attempts in seconds
    pub retry_delay_seconds: u64,
    /// Growth factor applied to the pause after each failed attempt
    pub retry_backoff: f64,
    /// Whether failures of this check are critical
    pub critical: bool,
    /// Consecutive failures before alerting
    pub alert_threshold: u32,
    /// Free-form tags
    pub tags: BTreeSet<String>,
    /// Disabled checks are never scheduled
    pub enabled: bool,
}

impl std::fmt::Debug for HealthCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthCheck")
            .field("name", &self.name)
            .field("check_type", &self.check_type)
            .field("interval_seconds", &self.interval_seconds)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("retry_count", &self.retry_count)
            .field("retry_delay_seconds", &self.retry_delay_seconds)
            .field("critical", &self.critical)
            .field("alert_threshold", &self.alert_threshold)
            .field("tags", &self.tags)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl HealthCheck {
    /// Create a check with default scheduling: every 60s, 30s timeout, 3 attempts 5s apart,
    /// alerting after 3 consecutive failures.
    pub fn new<F>(name: impl Into<String>, check_type: CheckType, check_function: F) -> Self
    where
        F: CheckFunction + 'static,
    {
        Self {
            name: name.into(),
            check_type,
            check_function: Arc::new(check_function),
            interval_seconds: 60,
            timeout_seconds: 30,
            retry_count: 3,
            retry_delay_seconds: 5,
            retry_backoff: 1.0,
            critical: false,
            alert_threshold: 3,
            tags: BTreeSet::new(),
            enabled: true,
        }
    }

    pub fn with_interval(mut self, seconds: u64) -> Self {
        self.interval_seconds = seconds;
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Set attempt count and delay between attempts
    pub fn with_retries(mut self, count: u32, delay_seconds: u64) -> Self {
        self.retry_count = count;
        self.retry_delay_seconds = delay_seconds;
        self
    }

    pub fn with_retry_backoff(mut self, multiplier: f64) -> Self {
        self.retry_backoff = multiplier;
        self
    }

    pub fn critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }

    pub fn with_alert_threshold(mut self, threshold: u32) -> Self {
        self.alert_threshold = threshold;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Retry configuration for one execution of this check
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.retry_count,
            base_delay: Duration::from_secs(self.retry_delay_seconds),
            max_delay: Duration::from_secs(self.retry_delay_seconds.max(MAX_RETRY_DELAY_SECONDS)),
            backoff_multiplier: self.retry_backoff,
        }
    }

    /// Reject definitions that could never be scheduled or executed
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(HealthError::invalid_check("Check name cannot be empty"));
        }

        if self.interval_seconds == 0 {
            return Err(HealthError::invalid_check(format!(
                "Check '{}': interval must be greater than 0",
                self.name
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(HealthError::invalid_check(format!(
                "Check '{}': timeout must be greater than 0",
                self.name
            )));
        }

        if self.retry_count == 0 {
            return Err(HealthError::invalid_check(format!(
                "Check '{}': retry count must be at least 1",
                self.name
            )));
        }

        if self.alert_threshold == 0 {
            return Err(HealthError::invalid_check(format!(
                "Check '{}': alert threshold must be at least 1",
                self.name
            )));
        }

        if !self.retry_backoff.is_finite() || self.retry_backoff < 1.0 {
            return Err(HealthError::invalid_check(format!(
                "Check '{}': retry backoff must be a finite value >= 1.0",
                self.name
            )));
        }

        Ok(())
    }
}
