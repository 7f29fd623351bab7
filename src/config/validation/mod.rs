//! Configuration validation
//!
//! - `monitoring_validators`: Health monitor rules
//! - `tests`: Validator tests

mod monitoring_validators;

/// Structural checks run before a configuration is accepted.
///
/// The error is a human readable reason; callers wrap it into `HealthError::Config`.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
