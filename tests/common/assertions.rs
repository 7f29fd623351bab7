//! Custom test assertions
//!
//! Domain-specific assertions for health reports.

use healthmon_rs::monitoring::{HealthReport, HealthStatus, OverallStatus};

/// Assertions for HealthReport
pub trait HealthReportAssertions {
    /// Assert the overall status
    fn assert_overall(&self, expected: OverallStatus);

    /// Assert a check's latest status
    fn assert_check_status(&self, check: &str, expected: HealthStatus);

    /// Assert a check has no entry at all
    fn assert_check_absent(&self, check: &str);
}

impl HealthReportAssertions for HealthReport {
    fn assert_overall(&self, expected: OverallStatus) {
        assert_eq!(
            self.overall_health.status, expected,
            "Expected overall status {}, got {} ({})",
            expected, self.overall_health.status, self.overall_health.message
        );
    }

    fn assert_check_status(&self, check: &str, expected: HealthStatus) {
        let detail = self
            .check_details
            .get(check)
            .unwrap_or_else(|| panic!("Expected check '{}' in report", check));
        assert_eq!(detail.status, expected, "Unexpected status for '{}'", check);
    }

    fn assert_check_absent(&self, check: &str) {
        assert!(
            !self.check_details.contains_key(check),
            "Expected no entry for check '{}'",
            check
        );
    }
}

/// Assert two values are approximately equal (for floats)
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_approx_eq!($left, $right, 1e-6_f64)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {
        let left_val: f64 = $left as f64;
        let right_val: f64 = $right as f64;
        let diff = (left_val - right_val).abs();
        assert!(
            diff < $epsilon,
            "assertion failed: `(left ~ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` (epsilon: `{:?}`)",
            left_val,
            right_val,
            diff,
            $epsilon
        );
    };
}
