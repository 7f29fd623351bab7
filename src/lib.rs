//! # healthmon-rs
//!
//! An async health monitoring and alerting engine.
//!
//! ## Features
//!
//! - **Scheduled checks**: every check runs on its own interval with a per-attempt
//!   timeout and a fixed-delay retry budget
//! - **Aggregate status**: one overall status derived from the latest result of every check
//! - **Failure streaks**: consecutive WARNING/CRITICAL results per check
//! - **Rate-limited alerts**: at most one alert per check per cooldown window, fanned
//!   out to pluggable handlers
//! - **Host metrics**: periodic CPU, memory, disk, network and process snapshots
//! - **Retention**: result and metric histories bounded by a retention window
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use healthmon_rs::config::HealthMonitorConfig;
//! use healthmon_rs::monitoring::{
//!     CheckOutcome, CheckType, HealthCheck, HealthMonitor, LogAlertHandler,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let monitor = HealthMonitor::new(HealthMonitorConfig::default())?;
//!
//!     monitor.add_health_check(
//!         HealthCheck::new("queue_depth", CheckType::Custom, || async {
//!             Ok::<_, healthmon_rs::HealthError>(CheckOutcome::from(
//!                 serde_json::json!({"depth": 3}),
//!             ))
//!         })
//!         .with_interval(15),
//!     )?;
//!     monitor.add_alert_handler(Arc::new(LogAlertHandler)).await;
//!
//!     monitor.start().await?;
//!     tokio::time::sleep(std::time::Duration::from_secs(60)).await;
//!     println!("{}", serde_json::to_string_pretty(&monitor.get_health_report())?);
//!     monitor.stop().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod monitoring;
pub mod utils;

// Re-export main types
pub use config::{Config, HealthMonitorConfig};
pub use monitoring::{HealthCheck, HealthMonitor, HealthStatus, OverallStatus};
pub use utils::error::{HealthError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (unix seconds)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build information of this binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
