//! Test fixtures and factories
//!
//! Factories build real checks and monitors; handlers and samplers are small
//! in-memory implementations of the public traits.

use healthmon_rs::HealthError;
use healthmon_rs::config::HealthMonitorConfig;
use healthmon_rs::monitoring::metrics::MetricsSampler;
use healthmon_rs::monitoring::{
    Alert, AlertHandler, CheckOutcome, CheckType, HealthCheck, HealthCheckResult, HealthMonitor,
    HealthStatus, SystemMetricsSnapshot,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Factory for test checks
pub struct CheckFactory;

impl CheckFactory {
    /// A check that always passes with a raw value
    pub fn healthy(name: &str) -> HealthCheck {
        HealthCheck::new(name, CheckType::Custom, || async {
            Ok::<_, HealthError>(CheckOutcome::from(serde_json::json!({"ok": true})))
        })
        .with_interval(10)
        .with_retries(1, 0)
    }

    /// A check that reports the given statuses in order, then HEALTHY
    pub fn scripted(name: &str, statuses: Vec<HealthStatus>) -> HealthCheck {
        let script = Arc::new(Mutex::new(VecDeque::from(statuses)));
        let check_name = name.to_string();
        HealthCheck::new(name, CheckType::Custom, move || {
            let script = script.clone();
            let check_name = check_name.clone();
            async move {
                let status = script.lock().pop_front().unwrap_or(HealthStatus::Healthy);
                Ok::<_, HealthError>(CheckOutcome::from(HealthCheckResult::new(
                    check_name,
                    status,
                    format!("status {}", status.as_str()),
                )))
            }
        })
        .with_interval(10)
        .with_retries(1, 0)
    }

    /// A check whose function always errors, counting invocations
    pub fn failing(name: &str, calls: Arc<AtomicU32>) -> HealthCheck {
        HealthCheck::new(name, CheckType::External, move || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<CheckOutcome, _>(HealthError::check("connection refused"))
            }
        })
        .with_interval(10)
    }
}

/// Sampler returning a constant snapshot
#[derive(Debug, Clone)]
pub struct FixedSampler {
    pub disk_percent: f64,
}

impl MetricsSampler for FixedSampler {
    fn sample(&self) -> healthmon_rs::Result<SystemMetricsSnapshot> {
        let mut snapshot = SystemMetricsSnapshot::zeroed();
        snapshot.disk_percent = self.disk_percent;
        snapshot.process_count = 12;
        Ok(snapshot)
    }
}

/// Handler that keeps every alert it receives
#[derive(Debug, Default)]
pub struct RecordingHandler {
    received: Mutex<Vec<Alert>>,
}

impl RecordingHandler {
    pub fn alerts(&self) -> Vec<Alert> {
        self.received.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.received.lock().len()
    }
}

#[async_trait::async_trait]
impl AlertHandler for RecordingHandler {
    async fn handle(&self, alert: &Alert) -> healthmon_rs::Result<()> {
        self.received.lock().push(alert.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Monitor without default checks and with a fixed sampler
pub fn quiet_monitor_with(config: HealthMonitorConfig) -> HealthMonitor {
    HealthMonitor::builder(config)
        .without_default_checks()
        .with_metrics_sampler(Arc::new(FixedSampler { disk_percent: 50.0 }))
        .build()
        .expect("valid test config")
}

pub fn quiet_monitor() -> HealthMonitor {
    quiet_monitor_with(HealthMonitorConfig::default())
}
