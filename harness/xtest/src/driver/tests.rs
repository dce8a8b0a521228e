#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

/// Sink that refuses every write.
struct Broken;

impl Write for Broken {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }
}

fn failure(expected: bool) -> FailureRecord {
    FailureRecord::new("1 != 2", "assertEqual", expected, "a.test", 10)
}

#[test]
fn test_measure_returns_value() {
    let (value, elapsed) = measure(|| 40 + 2);
    assert_eq!(value, 42);
    assert!(elapsed < Duration::from_secs(5));
}

#[test]
fn test_report_failure_prints_then_calls_handler() {
    let mut out = Vec::new();
    let mut seen = Vec::new();
    {
        let mut session = Session::new(HarnessConfig::default(), &mut out);
        session.on_failure = Some(Box::new(|method: &str, f: &FailureRecord| {
            seen.push(format!("{method}/{}", f.line()));
        }));
        session.report_failure("testX", &failure(true));
        session.report_failure("testY", &failure(false));
    }

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "a.test:10: error: testX : assertEqual - 1 != 2\n\
         a.test:10: unexpected error: testY : assertEqual - 1 != 2\n"
    );
    assert_eq!(seen, vec!["testX/10", "testY/10"]);
}

#[test]
fn test_record_is_quiet_unless_verbose() {
    let mut out = Vec::new();
    {
        let mut session = Session::new(HarnessConfig::default(), &mut out);
        session.record(RunResult::passed_in("Suite.test_ok", Duration::ZERO));
        assert_eq!(session.runs().len(), 1);
    }
    assert!(out.is_empty());
}

#[test]
fn test_verbose_status_lines() {
    let config = HarnessConfig {
        verbose: true,
        precision: 3,
    };
    let mut out = Vec::new();
    {
        let mut session = Session::new(config, &mut out);
        session.record(RunResult::passed_in(
            "Suite.test_ok",
            Duration::from_millis(12),
        ));
        session.record(RunResult::new(
            "Suite.test_bad",
            Duration::from_millis(5),
            vec![failure(true)],
        ));
    }

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Test Case 'Suite.test_ok' passed (0.012 seconds).\n\
         Test Case 'Suite.test_bad' failed (0.005 seconds).\n"
    );
}

#[test]
fn test_broken_output_does_not_stop_the_run() {
    let config = HarnessConfig {
        verbose: true,
        ..HarnessConfig::default()
    };
    let mut session = Session::new(config, Broken);
    session.report_failure("testX", &failure(false));
    session.record(RunResult::new("testX", Duration::ZERO, vec![failure(false)]));

    let report = RunReport::new(session.runs, Duration::ZERO, 2);
    assert_eq!(report.totals().unexpected_count, 1);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn test_report_exposes_runs_in_order() {
    let mut runs = RunAccumulator::new();
    runs.record(RunResult::passed_in("b", Duration::from_millis(1)));
    runs.record(RunResult::passed_in("a", Duration::from_millis(2)));

    let report = RunReport::new(runs, Duration::from_millis(4), 3);
    let names: Vec<_> = report.runs().iter().map(RunResult::method).collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(report.overall(), Duration::from_millis(4));
    assert_eq!(
        report.summary(),
        "Total executed 2 tests, with 0 failures (0 unexpected) in 0.003 (0.004) seconds"
    );
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_invalid_config_falls_back_with_warning() {
    let logs = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&logs);
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || SharedBuf(Arc::clone(&sink)))
        .finish();

    let loaded = Err(ConfigError::InvalidPrecision {
        var: "XTEST_PRECISION",
        value: "42".to_string(),
    });
    let config = tracing::subscriber::with_default(subscriber, || config_or_default(loaded));

    assert_eq!(config, HarnessConfig::default());
    let logged = String::from_utf8(logs.lock().unwrap().clone()).unwrap();
    assert!(logged.contains("WARN"));
    assert!(logged.contains("invalid configuration (XTEST_PRECISION"));
}

#[test]
fn test_valid_config_is_kept() {
    let config = HarnessConfig {
        verbose: true,
        precision: 5,
    };
    assert_eq!(config_or_default(Ok(config.clone())), config);
}

/// Log sink shared between the subscriber and the test.
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
