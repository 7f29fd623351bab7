//! Error recovery utilities
//!
//! This module provides the retry policy used for transport-level check failures.

mod retry;
mod types;

pub use retry::RetryPolicy;
pub use types::RetryConfig;
