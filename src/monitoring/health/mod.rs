//! Health checking
//!
//! Check definitions, the registry, single-check execution with timeout and retry,
//! result history, failure streaks and aggregate status.

mod aggregate;
mod check;
pub mod components;
mod executor;
mod registry;
mod store;
mod types;


pub use aggregate::{LatestResult, compute_overall_health};
pub use check::{CheckFunction, HealthCheck};
pub use components::{ActionStats, ServiceStatsSource, Thresholds};
pub use executor::CheckExecutor;
pub use registry::CheckRegistry;
pub use store::{FailureTracker, ResultStore};
pub use types::{CheckDetail, HealthIssue, HealthReport, HealthSummary, SystemSummary};
