//! Common test utilities for healthmon-rs
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::fixtures::{CheckFactory, quiet_monitor};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let monitor = quiet_monitor();
//!     monitor.add_health_check(CheckFactory::healthy("api")).unwrap();
//!     // ...
//! }
//! ```

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::HealthReportAssertions;
pub use fixtures::{CheckFactory, FixedSampler, RecordingHandler, quiet_monitor, quiet_monitor_with};
