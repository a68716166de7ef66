use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use tracing::warn;

use crate::error::{Result, TintaError};
use crate::pipeline::types::{JobOutcome, PipelineState, ProgressReporter};

struct CollectorInner {
    outcomes: HashMap<usize, JobOutcome>,
    state: PipelineState,
    signalled: bool,
    aborted: bool,
}

/// Thread-safe aggregator for job outcomes.
///
/// All outcome-table and counter mutation in the pipeline goes through
/// `record`, serialized by a single mutex. Completion is raised exactly once,
/// the instant the last outcome lands, through a condvar the orchestrator
/// blocks on.
pub struct FrameCollector {
    inner: Mutex<CollectorInner>,
    complete: Condvar,
    reporter: Arc<dyn ProgressReporter>,
}

impl FrameCollector {
    pub fn new(total: usize, reporter: Arc<dyn ProgressReporter>) -> Self {
        Self {
            inner: Mutex::new(CollectorInner {
                outcomes: HashMap::with_capacity(total),
                state: PipelineState::new(total),
                signalled: false,
                aborted: false,
            }),
            complete: Condvar::new(),
            reporter,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CollectorInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record the terminal outcome for one frame index.
    ///
    /// Outcomes are write-once: a second record for the same index is a
    /// programming error and is rejected with `DuplicateOutcome`.
    pub fn record(&self, index: usize, outcome: JobOutcome) -> Result<()> {
        let mut inner = self.lock();

        if index >= inner.state.total {
            return Err(TintaError::FrameIndexOutOfRange {
                index,
                total: inner.state.total,
            });
        }
        if inner.outcomes.contains_key(&index) {
            return Err(TintaError::DuplicateOutcome { index });
        }

        match &outcome {
            JobOutcome::Success(_) => inner.state.succeeded += 1,
            JobOutcome::Failure(e) => {
                inner.state.failed += 1;
                warn!(index, error = %e, "Frame job failed");
                self.reporter.status(&format!("Frame {index} failed: {e}"));
            }
            JobOutcome::Cancelled => inner.state.cancelled += 1,
        }
        inner.outcomes.insert(index, outcome);

        let resolved = inner.state.resolved();
        let total = inner.state.total;
        self.reporter.advance(resolved);
        if total > 0 {
            self.reporter
                .status(&format!("Processed {}% of frames", resolved * 100 / total));
        }

        if inner.state.is_done() && !inner.signalled {
            inner.signalled = true;
            self.complete.notify_all();
        }
        Ok(())
    }

    /// Whether every job has resolved. Side-effect-free.
    pub fn is_complete(&self) -> bool {
        self.lock().state.is_done()
    }

    /// Snapshot of the aggregate counters.
    pub fn snapshot(&self) -> PipelineState {
        self.lock().state.clone()
    }

    /// Block until all outcomes are recorded, or the collector loop aborts.
    /// Never busy-spins.
    pub fn wait_complete(&self) {
        let mut inner = self.lock();
        while !inner.state.is_done() && !inner.aborted {
            inner = self
                .complete
                .wait(inner)
                .unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Wake any completion waiter even though not all outcomes resolved.
    fn abort(&self) {
        let mut inner = self.lock();
        inner.aborted = true;
        self.complete.notify_all();
    }

    /// Consume the pool's outcome channel until every job has resolved.
    ///
    /// This is the single collector loop; worker completions never touch the
    /// outcome table directly. An invariant violation aborts the loop and
    /// wakes the completion waiter so the run can fail cleanly.
    pub fn drain(&self, rx: mpsc::Receiver<(usize, JobOutcome)>) -> Result<()> {
        for (index, outcome) in rx {
            if let Err(e) = self.record(index, outcome) {
                self.abort();
                return Err(e);
            }
            if self.is_complete() {
                return Ok(());
            }
        }
        if self.is_complete() {
            Ok(())
        } else {
            self.abort();
            Err(TintaError::Pipeline(
                "outcome channel closed before all jobs resolved".into(),
            ))
        }
    }

    /// Hand the outcome table and final counters to the sink phase.
    pub fn into_results(self) -> (HashMap<usize, JobOutcome>, PipelineState) {
        let inner = self.inner.into_inner().unwrap_or_else(|e| e.into_inner());
        (inner.outcomes, inner.state)
    }
}
