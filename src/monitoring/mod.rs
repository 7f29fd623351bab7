//! Health monitoring engine
//!
//! Registered checks run on their own intervals with per-attempt timeout and retry.
//! Results feed a bounded history, failure streaks and an aggregate status, and
//! sustained failures raise rate-limited alerts. Host resource metrics are sampled
//! independently, and old data is pruned by a retention pass.

// Public submodules
pub mod alerts;
pub mod health;
pub mod metrics;

// Internal submodules
mod background;
mod retention;
mod scheduler;
mod system;
mod types;

// Re-export public types
pub use alerts::{
    AlertDispatcher, AlertHandler, AlertStats, ConsoleAlertHandler, LogAlertHandler,
    WebhookAlertHandler,
};
pub use health::{
    ActionStats, CheckFunction, HealthCheck, HealthReport, HealthSummary, ServiceStatsSource,
};
pub use retention::{CleanupSummary, RetentionCleaner};
pub use system::{HealthMonitor, HealthMonitorBuilder};
pub use types::{
    Alert, AlertSeverity, CheckOutcome, CheckType, Details, HealthCheckResult, HealthStatus,
    NetworkCounters, OverallStatus, SystemMetricsSnapshot,
};
