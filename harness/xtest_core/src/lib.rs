//! Result model and reporting for the xtest harness.
//!
//! This crate has no notion of *how* a test runs. It only holds what a
//! finished test leaves behind and turns a whole run into totals and a
//! one-line summary:
//!
//! ```text
//! FailureRecord ──► RunResult ──► RunAccumulator ──► RunTotals ──► summary_line()
//! ```
//!
//! - [`FailureRecord`]: one assertion failure, with its source location
//! - [`RunResult`]: one finished test method and the failures it produced
//! - [`RunAccumulator`]: the ordered results of a single run
//! - [`RunTotals`]: the fold over a run, plus the exit-code contract

mod accumulator;
mod failure;
mod report;
mod run;

pub use accumulator::RunAccumulator;
pub use failure::FailureRecord;
pub use report::{format_seconds, plural_suffix, summary_line, RunTotals, DEFAULT_PRECISION};
pub use run::RunResult;
