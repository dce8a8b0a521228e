//! Folding a run into totals and rendering the summary line.

use std::time::Duration;

use crate::RunResult;

/// Decimal places used for durations unless configured otherwise.
pub const DEFAULT_PRECISION: usize = 2;

/// Aggregate counts over every result of a run.
///
/// All fields are order-independent sums, so the same set of results
/// always folds to the same totals regardless of the order they finished in.
/// The duration sum saturates at `Duration::MAX` instead of overflowing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunTotals {
    /// Number of recorded test methods.
    pub test_count: usize,
    /// Sum of the individual test durations.
    pub duration: Duration,
    /// Failures of every kind.
    pub failure_count: usize,
    /// Failures not raised through an assertion.
    pub unexpected_count: usize,
}

impl RunTotals {
    pub fn fold(runs: &[RunResult]) -> Self {
        runs.iter().fold(RunTotals::default(), |totals, run| RunTotals {
            test_count: totals.test_count + 1,
            duration: totals.duration.saturating_add(run.duration()),
            failure_count: totals.failure_count + run.failures().len(),
            unexpected_count: totals.unexpected_count + run.unexpected_count(),
        })
    }

    /// Returns true if any failure was recorded, expected or not.
    pub fn has_failures(&self) -> bool {
        self.failure_count > 0
    }

    /// Get exit code: 0 = no failures (including an empty run), 1 = failures.
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_failures())
    }
}

/// Suffix for a counted noun: singular only for exactly one.
pub fn plural_suffix(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Render a duration as seconds with a fixed number of decimals.
pub fn format_seconds(duration: Duration, precision: usize) -> String {
    format!("{:.precision$}", duration.as_secs_f64())
}

/// Render the end-of-run summary.
///
/// `overall` is the wall-clock time of the whole loop and is shown next to
/// the summed test durations; the gap between them is harness overhead.
pub fn summary_line(totals: &RunTotals, overall: Duration, precision: usize) -> String {
    format!(
        "Total executed {} test{}, with {} failure{} ({} unexpected) in {} ({}) seconds",
        totals.test_count,
        plural_suffix(totals.test_count),
        totals.failure_count,
        plural_suffix(totals.failure_count),
        totals.unexpected_count,
        format_seconds(totals.duration, precision),
        format_seconds(overall, precision),
    )
}
