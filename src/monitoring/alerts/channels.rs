//! Alert handler implementations

use crate::monitoring::types::{Alert, AlertSeverity};
use crate::utils::error::{HealthError, Result};
use std::time::Duration;
use tracing::{error, warn};

/// Receives alerts from the dispatcher
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AlertHandler: Send + Sync + std::fmt::Debug {
    /// Deliver one alert
    async fn handle(&self, alert: &Alert) -> Result<()>;

    /// Handler name, used in logs
    fn name(&self) -> &'static str;

    /// Check if the handler wants alerts of this severity
    fn supports_severity(&self, _severity: AlertSeverity) -> bool {
        true
    }
}

/// Writes alerts to the tracing log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlertHandler;

#[async_trait::async_trait]
impl AlertHandler for LogAlertHandler {
    async fn handle(&self, alert: &Alert) -> Result<()> {
        match alert.severity() {
            AlertSeverity::Critical => error!(
                check = %alert.check_name,
                status = %alert.status,
                consecutive_failures = alert.consecutive_failures,
                "Health alert: {}",
                alert.message
            ),
            AlertSeverity::Warning => warn!(
                check = %alert.check_name,
                status = %alert.status,
                consecutive_failures = alert.consecutive_failures,
                "Health alert: {}",
                alert.message
            ),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Prints one block per alert to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleAlertHandler;

impl ConsoleAlertHandler {
    pub(super) fn render(alert: &Alert) -> String {
        format!(
            "{} Health Alert: {}\n  Status: {}\n  Message: {}\n  Consecutive Failures: {}\n  Time: {}",
            alert.severity(),
            alert.check_name,
            alert.status,
            alert.message,
            alert.consecutive_failures,
            alert.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        )
    }
}

#[async_trait::async_trait]
impl AlertHandler for ConsoleAlertHandler {
    async fn handle(&self, alert: &Alert) -> Result<()> {
        println!("{}", Self::render(alert));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

/// Posts Slack-compatible JSON to a webhook
#[derive(Debug)]
pub struct WebhookAlertHandler {
    webhook_url: String,
    username: Option<String>,
    min_severity: AlertSeverity,
    client: reqwest::Client,
}

impl WebhookAlertHandler {
    /// Create a new webhook handler
    pub fn new(
        webhook_url: impl Into<String>,
        username: Option<String>,
        min_severity: AlertSeverity,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            webhook_url: webhook_url.into(),
            username,
            min_severity,
            client,
        })
    }

    pub(super) fn payload(&self, alert: &Alert) -> serde_json::Value {
        let color = match alert.severity() {
            AlertSeverity::Warning => "#ff9500",
            AlertSeverity::Critical => "#ff0000",
        };

        serde_json::json!({
            "username": self.username.as_deref().unwrap_or("Health Monitor"),
            "text": format!("{} Health Alert: {}", alert.severity(), alert.check_name),
            "attachments": [{
                "color": color,
                "title": alert.check_name,
                "text": alert.message,
                "fields": [
                    {
                        "title": "Status",
                        "value": alert.status.to_string(),
                        "short": true
                    },
                    {
                        "title": "Consecutive Failures",
                        "value": alert.consecutive_failures.to_string(),
                        "short": true
                    },
                    {
                        "title": "Time",
                        "value": alert.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                        "short": true
                    }
                ],
                "footer": "Health Monitor",
                "ts": alert.timestamp.timestamp()
            }]
        })
    }
}

#[async_trait::async_trait]
impl AlertHandler for WebhookAlertHandler {
    async fn handle(&self, alert: &Alert) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&self.payload(alert))
            .send()
            .await
            .map_err(|e| HealthError::alert(format!("Failed to send webhook alert: {}", e)))?;

        if !response.status().is_success() {
            return Err(HealthError::alert(format!(
                "Webhook returned status: {}",
                response.status()
            )));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "webhook"
    }

    fn supports_severity(&self, severity: AlertSeverity) -> bool {
        severity >= self.min_severity
    }
}
