use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::cancel::CancelToken;
use crate::error::TintaError;
use crate::filters::FilterChain;
use crate::frame::Frame;

/// Logical pipeline phase, used for progress reporting.
///
/// `Reading` ends when every frame has been submitted to the worker pool;
/// resolution of those jobs overlaps it in wall-clock time and is reported
/// under `Processing`.
#[derive(Clone, Copy, Debug)]
pub enum PipelineStage {
    Reading,
    Processing,
    Writing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reading => write!(f, "Reading frames"),
            Self::Processing => write!(f, "Applying filters"),
            Self::Writing => write!(f, "Writing output"),
        }
    }
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (the frame count), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// Human-readable status line for the current stage.
    fn status(&self, _message: &str) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, for callers that don't observe progress.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Adapts a `(stage, fraction)` closure to the `ProgressReporter` trait.
pub(super) struct ClosureReporter<F> {
    callback: Mutex<F>,
    stage: Mutex<PipelineStage>,
    total: AtomicUsize,
}

impl<F> ClosureReporter<F>
where
    F: FnMut(PipelineStage, f32) + Send,
{
    pub(super) fn new(callback: F) -> Self {
        Self {
            callback: Mutex::new(callback),
            stage: Mutex::new(PipelineStage::Reading),
            total: AtomicUsize::new(0),
        }
    }

    fn emit(&self, fraction: f32) {
        let stage = *self.stage.lock().unwrap_or_else(|e| e.into_inner());
        let mut cb = self.callback.lock().unwrap_or_else(|e| e.into_inner());
        (*cb)(stage, fraction.clamp(0.0, 1.0));
    }
}

impl<F> ProgressReporter for ClosureReporter<F>
where
    F: FnMut(PipelineStage, f32) + Send,
{
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        *self.stage.lock().unwrap_or_else(|e| e.into_inner()) = stage;
        self.total.store(total_items.unwrap_or(0), Ordering::Relaxed);
        self.emit(0.0);
    }

    fn advance(&self, items_done: usize) {
        let total = self.total.load(Ordering::Relaxed);
        if total > 0 {
            self.emit(items_done as f32 / total as f32);
        }
    }

    fn finish_stage(&self) {
        self.emit(1.0);
    }
}

/// Aggregate per-run counters, updated under the collector's lock.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineState {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
}

impl PipelineState {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Number of jobs that have reached a terminal outcome.
    pub fn resolved(&self) -> usize {
        self.succeeded + self.failed + self.cancelled
    }

    pub fn is_done(&self) -> bool {
        self.resolved() == self.total
    }

    /// Fraction of jobs resolved, monotonically non-decreasing within a run.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.resolved() as f32 / self.total as f32
        }
    }
}

/// Terminal result of one frame job, keyed by frame index in the collector.
#[derive(Debug)]
pub enum JobOutcome {
    Success(Frame),
    Failure(TintaError),
    Cancelled,
}

/// One frame paired with the filter chain, submitted to the worker pool.
///
/// Created once per decoded frame, consumed exactly once.
pub struct FrameJob {
    frame: Frame,
    chain: Arc<FilterChain>,
}

impl FrameJob {
    pub fn new(frame: Frame, chain: Arc<FilterChain>) -> Self {
        Self { frame, chain }
    }

    pub fn index(&self) -> usize {
        self.frame.index
    }

    /// Execute the job, turning per-frame errors and cancellation into data.
    pub fn run(self, cancel: &CancelToken) -> JobOutcome {
        if cancel.is_cancelled() {
            return JobOutcome::Cancelled;
        }
        match self.chain.apply_cancellable(&self.frame, cancel) {
            Ok(filtered) => JobOutcome::Success(filtered),
            Err(TintaError::Cancelled) => JobOutcome::Cancelled,
            Err(e) => JobOutcome::Failure(e),
        }
    }
}

/// How the run ended. Failures are reported through `Result::Err` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Succeeded,
    Cancelled,
}

/// Final report of a pipeline run.
///
/// Partial success is visible here: `state.failed` and `state.cancelled`
/// count the gaps in the output, never folded into a silent full success.
#[derive(Debug)]
pub struct RunSummary {
    pub status: RunStatus,
    /// Path of the written container; `None` when the sink phase was skipped.
    pub output: Option<PathBuf>,
    pub state: PipelineState,
    pub frames_written: usize,
}
