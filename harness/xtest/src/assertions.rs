//! Assertions available inside a test method.

use std::fmt::{Debug, Display};
use std::panic::Location;

use xtest_core::FailureRecord;

use crate::Session;

/// Failure collector for one running test method.
///
/// Assertion helpers record *expected* failures: the test anticipated the
/// check could fail. [`Assertions::check`] records an *unexpected* failure
/// for an error the test did not plan for. Every failure is printed as
/// soon as it is recorded; the method keeps running afterwards.
///
/// Failures are attributed to the source location of the assertion call.
pub struct Assertions<'s, 'a> {
    method: &'s str,
    session: &'s mut Session<'a>,
    failures: Vec<FailureRecord>,
}

impl<'s, 'a> Assertions<'s, 'a> {
    pub(crate) fn new(method: &'s str, session: &'s mut Session<'a>) -> Self {
        Assertions {
            method,
            session,
            failures: Vec::new(),
        }
    }

    /// Identity of the running method, `Suite.method`.
    pub fn method(&self) -> &str {
        self.method
    }

    /// Number of failures recorded so far.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    #[track_caller]
    pub fn assert_true(&mut self, condition: bool, message: &str) {
        if !condition {
            self.record_at(Location::caller(), "assert_true failed", message, true);
        }
    }

    #[track_caller]
    pub fn assert_false(&mut self, condition: bool, message: &str) {
        if condition {
            self.record_at(Location::caller(), "assert_false failed", message, true);
        }
    }

    #[track_caller]
    pub fn assert_eq<T: PartialEq + Debug>(&mut self, left: T, right: T, message: &str) {
        if left != right {
            let description = format!("assert_eq failed: ({left:?}) is not equal to ({right:?})");
            self.record_at(Location::caller(), &description, message, true);
        }
    }

    #[track_caller]
    pub fn assert_ne<T: PartialEq + Debug>(&mut self, left: T, right: T, message: &str) {
        if left == right {
            let description = format!("assert_ne failed: ({left:?}) is equal to ({right:?})");
            self.record_at(Location::caller(), &description, message, true);
        }
    }

    /// Assert a value is present, handing it back for further checks.
    #[track_caller]
    pub fn assert_some<T>(&mut self, value: Option<T>, message: &str) -> Option<T> {
        if value.is_none() {
            self.record_at(Location::caller(), "assert_some failed", message, true);
        }
        value
    }

    #[track_caller]
    pub fn assert_none<T: Debug>(&mut self, value: Option<T>, message: &str) {
        if let Some(value) = value {
            let description = format!("assert_none failed: ({value:?}) is not None");
            self.record_at(Location::caller(), &description, message, true);
        }
    }

    /// Record an unconditional failure.
    #[track_caller]
    pub fn fail(&mut self, message: &str) {
        self.record_at(Location::caller(), "failed", message, true);
    }

    /// Unwrap a result, recording an unexpected failure on `Err`.
    #[track_caller]
    pub fn check<T, E: Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                let message = e.to_string();
                self.record_at(Location::caller(), "unexpected error", &message, false);
                None
            }
        }
    }

    pub(crate) fn record_at(
        &mut self,
        location: &Location<'_>,
        description: &str,
        message: &str,
        expected: bool,
    ) {
        let failure = FailureRecord::new(
            message,
            description,
            expected,
            location.file(),
            location.line(),
        );
        self.session.report_failure(self.method, &failure);
        self.failures.push(failure);
    }

    pub(crate) fn into_failures(self) -> Vec<FailureRecord> {
        self.failures
    }
}
