//! Helper functions for creating specific error types

use super::types::HealthError;

/// Helper functions for creating specific errors
impl HealthError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_check<S: Into<String>>(message: S) -> Self {
        Self::InvalidCheckDefinition(message.into())
    }

    pub fn check<S: Into<String>>(message: S) -> Self {
        Self::CheckFailed(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn alert<S: Into<String>>(message: S) -> Self {
        Self::Alert(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Failure reason without the category prefix for check-level errors
    pub fn reason(&self) -> String {
        match self {
            Self::CheckFailed(message) | Self::Timeout(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Best-effort text of a caught panic payload
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
