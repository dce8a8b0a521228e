//! Ordered collection of finished runs.

use crate::RunResult;

/// Results of one harness run, in execution order.
///
/// Append-only: results are recorded as methods finish and read back
/// once for the summary. Owned by whoever drives the run, so several
/// independent runs can live in the same process.
#[derive(Clone, Debug, Default)]
pub struct RunAccumulator {
    runs: Vec<RunResult>,
}

impl RunAccumulator {
    pub fn new() -> Self {
        RunAccumulator::default()
    }

    /// Append a finished run.
    pub fn record(&mut self, run: RunResult) {
        self.runs.push(run);
    }

    /// All recorded runs, in the order they were recorded.
    pub fn snapshot(&self) -> &[RunResult] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
