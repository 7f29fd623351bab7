//! Utility modules for the health monitor
//!
//! - **error**: Error types and the retry policy
//! - **logging**: Subscriber setup for structured logging

pub mod error; // Error handling
pub mod logging; // Logging

pub use error::{HealthError, Result, RetryConfig, RetryPolicy};
pub use logging::{LogFormat, LoggingUtils};
