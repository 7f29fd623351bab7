//! Check registry

use super::check::HealthCheck;
use crate::utils::error::Result;
use std::collections::BTreeMap;
use tracing::info;

/// Registered checks keyed by name
#[derive(Debug, Default)]
pub struct CheckRegistry {
    checks: BTreeMap<String, HealthCheck>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a check, replacing any check with the same name
    pub fn add(&mut self, check: HealthCheck) -> Result<()> {
        check.validate()?;
        info!(
            check = %check.name,
            interval_seconds = check.interval_seconds,
            "Registered health check"
        );
        self.checks.insert(check.name.clone(), check);
        Ok(())
    }

    /// Remove a check, returning whether it existed
    pub fn remove(&mut self, name: &str) -> bool {
        self.checks.remove(name).is_some()
    }

    /// Enable or disable a check, returning whether it exists
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.checks.get_mut(name) {
            Some(check) => {
                check.enabled = enabled;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&HealthCheck> {
        self.checks.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }

    /// Checks in name order
    pub fn iter(&self) -> impl Iterator<Item = &HealthCheck> {
        self.checks.values()
    }

    pub fn names(&self) -> Vec<String> {
        self.checks.keys().cloned().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
