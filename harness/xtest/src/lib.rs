//! xtest - a minimal sequential test driver.
//!
//! Test cases run one after another. Every failure is printed the moment it
//! happens as a compiler-style diagnostic line, and the run ends with a
//! single summary line and an exit code.
//!
//! # Architecture
//!
//! ```text
//! xtest_main(cases)
//!     │
//!     ▼
//! Driver::run ──► TestCase::invoke_test ──► Session::record(RunResult)
//!     │                   │
//!     │                   └──► Session::report_failure ──► stdout + handler
//!     ▼
//! RunReport { totals, summary } ──► exit(0 | 1)
//! ```
//!
//! # Example
//!
//! ```text
//! use xtest::{xtest_main, Suite};
//!
//! fn main() {
//!     let math = Suite::new("Math")
//!         .test("test_add", |t| t.assert_eq(1 + 1, 2, ""))
//!         .test("test_div", |t| t.assert_ne(4 / 2, 0, "division lost"));
//!
//!     xtest_main(&[&math]);
//! }
//! ```

mod assertions;
mod case;
mod config;
mod driver;

pub use assertions::Assertions;
pub use case::{Suite, TestCase};
pub use config::{ConfigError, HarnessConfig};
pub use driver::{measure, xtest_main, Driver, FailureHandler, RunReport, Session};

// The result model is part of the public surface: handlers and reports hand it out.
pub use xtest_core::{FailureRecord, RunAccumulator, RunResult, RunTotals};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=xtest=debug`.
/// Logs go to stderr as an indented span tree, keeping stdout for
/// failure lines and the summary.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let installed = tracing_subscriber::registry()
                .with(
                    HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .try_init();
            if installed.is_err() {
                eprintln!("xtest: a global tracing subscriber is already installed");
            }
        }
    });
}
