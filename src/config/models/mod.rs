//! Configuration data models
//!
//! This module defines the configuration structures consumed by the health monitor.

pub mod monitoring;

// Re-export all configuration types
pub use monitoring::*;

/// Default for boolean flags that are on unless disabled
pub fn default_true() -> bool {
    true
}
