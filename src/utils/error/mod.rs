//! Error handling utilities
//!
//! This module provides the crate error type and the retry machinery used by
//! the check executor.

pub mod helpers;
pub mod recovery;
pub mod types;


// Re-export commonly used types
pub use recovery::{RetryConfig, RetryPolicy};
pub use helpers::panic_message;
pub use types::{HealthError, Result};
