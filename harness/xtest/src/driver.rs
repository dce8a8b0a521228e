//! Run driver: owns the run state, times the loop, reports and exits.

use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use xtest_core::{
    format_seconds, summary_line, FailureRecord, RunAccumulator, RunResult, RunTotals,
};

use crate::{init_tracing, ConfigError, HarnessConfig, TestCase};

/// Observer called for every failure as it is reported, after its line was printed.
///
/// Receives the full method identity and the failure. A panicking handler
/// is logged and otherwise ignored; it never stops the run.
pub type FailureHandler<'a> = Box<dyn FnMut(&str, &FailureRecord) + 'a>;

/// Time a block of work.
pub fn measure<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// State of one harness run, handed to every test case.
///
/// Test cases report failures through [`Session::report_failure`] as they
/// happen and hand over one [`RunResult`] per finished method through
/// [`Session::record`]. Nothing here is global: two sessions in one process
/// never see each other's results.
pub struct Session<'a> {
    config: HarnessConfig,
    out: Box<dyn Write + 'a>,
    on_failure: Option<FailureHandler<'a>>,
    runs: RunAccumulator,
}

impl<'a> Session<'a> {
    pub fn new(config: HarnessConfig, out: impl Write + 'a) -> Self {
        Session {
            config,
            out: Box::new(out),
            on_failure: None,
            runs: RunAccumulator::new(),
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Results recorded so far, in execution order.
    pub fn runs(&self) -> &RunAccumulator {
        &self.runs
    }

    /// Print a failure line right away and pass the failure to the handler.
    pub fn report_failure(&mut self, method: &str, failure: &FailureRecord) {
        if let Err(e) = failure.emit(method, &mut self.out) {
            tracing::warn!("failed to write failure line for {method}: {e}");
        }
        if let Some(handler) = self.on_failure.as_mut() {
            let called = panic::catch_unwind(AssertUnwindSafe(|| handler(method, failure)));
            if called.is_err() {
                tracing::warn!("failure handler panicked while reporting {method}");
            }
        }
    }

    /// Append a finished method to the run.
    pub fn record(&mut self, run: RunResult) {
        tracing::debug!(
            method = run.method(),
            passed = run.passed(),
            failures = run.failures().len(),
            "recorded run"
        );

        if self.config.verbose {
            let status = if run.passed() { "passed" } else { "failed" };
            let line = format!(
                "Test Case '{}' {status} ({} seconds).",
                run.method(),
                format_seconds(run.duration(), self.config.precision)
            );
            self.write_line(&line);
        }

        self.runs.record(run);
    }

    fn write_line(&mut self, line: &str) {
        let written = writeln!(self.out, "{line}").and_then(|()| self.out.flush());
        if let Err(e) = written {
            tracing::warn!("failed to write harness output: {e}");
        }
    }
}

/// Outcome of a complete run.
#[derive(Clone, Debug)]
pub struct RunReport {
    runs: RunAccumulator,
    totals: RunTotals,
    overall: Duration,
    summary: String,
}

impl RunReport {
    fn new(runs: RunAccumulator, overall: Duration, precision: usize) -> Self {
        let totals = RunTotals::fold(runs.snapshot());
        let summary = summary_line(&totals, overall, precision);
        RunReport {
            runs,
            totals,
            overall,
            summary,
        }
    }

    /// Every recorded method, in execution order.
    pub fn runs(&self) -> &[RunResult] {
        self.runs.snapshot()
    }

    pub fn totals(&self) -> &RunTotals {
        &self.totals
    }

    /// Wall-clock time of the whole loop, harness overhead included.
    pub fn overall(&self) -> Duration {
        self.overall
    }

    /// The rendered `Total executed ...` line.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn exit_code(&self) -> i32 {
        self.totals.exit_code()
    }
}

/// Drives test cases in order and produces the [`RunReport`].
pub struct Driver<'a> {
    session: Session<'a>,
}

impl Driver<'static> {
    /// Create a driver printing to stdout.
    pub fn new(config: HarnessConfig) -> Self {
        Driver::with_output(config, io::stdout())
    }
}

impl<'a> Driver<'a> {
    /// Create a driver printing to an arbitrary sink.
    pub fn with_output(config: HarnessConfig, out: impl Write + 'a) -> Self {
        Driver {
            session: Session::new(config, out),
        }
    }

    /// Install a failure handler.
    #[must_use]
    pub fn on_failure(mut self, handler: impl FnMut(&str, &FailureRecord) + 'a) -> Self {
        self.session.on_failure = Some(Box::new(handler));
        self
    }

    /// Run every case once, in the given order, then print the summary.
    ///
    /// Never fails: test failures are data in the report, and output errors
    /// are logged.
    pub fn run(mut self, cases: &[&dyn TestCase]) -> RunReport {
        let _run = tracing::info_span!("run", cases = cases.len()).entered();

        let ((), overall) = measure(|| {
            for case in cases {
                let _case = tracing::info_span!("test_case", name = case.name()).entered();
                case.invoke_test(&mut self.session);
            }
        });

        let report = RunReport::new(self.session.runs, overall, self.session.config.precision);
        tracing::debug!(
            tests = report.totals.test_count,
            failures = report.totals.failure_count,
            unexpected = report.totals.unexpected_count,
            "run finished"
        );

        let mut out = self.session.out;
        let written = writeln!(out, "{}", report.summary).and_then(|()| out.flush());
        if let Err(e) = written {
            tracing::warn!("failed to write run summary: {e}");
        }

        report
    }
}

/// Run the given test cases, print the summary and exit the process.
///
/// Exits with `0` if no failure was recorded (an empty run included) and
/// `1` otherwise. Configuration comes from the environment; a malformed
/// value is logged, reported on stderr and the defaults are used instead.
pub fn xtest_main(cases: &[&dyn TestCase]) -> ! {
    init_tracing();

    let config = config_or_default(HarnessConfig::from_env());
    let report = Driver::new(config).run(cases);
    std::process::exit(report.exit_code())
}

/// Fall back to the default configuration when loading failed.
fn config_or_default(loaded: Result<HarnessConfig, ConfigError>) -> HarnessConfig {
    loaded.unwrap_or_else(|e| {
        tracing::warn!("invalid configuration ({e}), using defaults");
        eprintln!("xtest: {e}; using default configuration");
        HarnessConfig::default()
    })
}

#[cfg(test)]
mod tests;
