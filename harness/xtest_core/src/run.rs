//! Result of a single finished test method.

use std::time::Duration;

use crate::FailureRecord;

/// One test method, after it ran to completion.
///
/// Pass/fail is derived from the failure list rather than stored next to
/// it, so a result can never claim to pass while carrying failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunResult {
    method: String,
    duration: Duration,
    failures: Vec<FailureRecord>,
}

impl RunResult {
    /// Create a result from everything the method recorded, in order of occurrence.
    pub fn new(
        method: impl Into<String>,
        duration: Duration,
        failures: Vec<FailureRecord>,
    ) -> Self {
        RunResult {
            method: method.into(),
            duration,
            failures,
        }
    }

    /// Create a result for a method that recorded no failures.
    pub fn passed_in(method: impl Into<String>, duration: Duration) -> Self {
        RunResult::new(method, duration, Vec::new())
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Duration as floating-point seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    /// Failures that were not raised through an assertion, in recorded order.
    pub fn unexpected_failures(&self) -> impl Iterator<Item = &FailureRecord> + '_ {
        self.failures.iter().filter(|f| f.is_unexpected())
    }

    pub fn unexpected_count(&self) -> usize {
        self.unexpected_failures().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn failure(expected: bool, message: &str) -> FailureRecord {
        FailureRecord::new(message, "assert_true failed", expected, "run.rs", 1)
    }

    #[test]
    fn no_failures_means_passed() {
        let run = RunResult::passed_in("Suite.test_ok", Duration::from_millis(3));
        assert!(run.passed());
        assert!(run.failures().is_empty());
        assert_eq!(run.unexpected_count(), 0);
    }

    #[test]
    fn any_failure_means_failed() {
        let run = RunResult::new("Suite.test_bad", Duration::ZERO, vec![failure(true, "a")]);
        assert!(!run.passed());
        assert_eq!(run.unexpected_count(), 0);
    }

    #[test]
    fn unexpected_view_keeps_order_and_is_repeatable() {
        let run = RunResult::new(
            "Suite.test_mixed",
            Duration::from_millis(1),
            vec![
                failure(false, "first"),
                failure(true, "second"),
                failure(false, "third"),
            ],
        );

        let messages: Vec<_> = run.unexpected_failures().map(FailureRecord::message).collect();
        assert_eq!(messages, vec!["first", "third"]);
        assert_eq!(run.unexpected_count(), 2);
        // Derived on every read, nothing is cached.
        assert_eq!(run.unexpected_count(), 2);
        assert_eq!(run.failures().len(), 3);
    }

    #[test]
    fn duration_secs_is_fractional() {
        let run = RunResult::passed_in("m", Duration::from_millis(1500));
        assert!((run.duration_secs() - 1.5).abs() < f64::EPSILON);
    }
}
