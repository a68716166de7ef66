use std::sync::mpsc;

use crate::cancel::CancelToken;
use crate::error::{Result, TintaError};
use crate::pipeline::types::{FrameJob, JobOutcome};

/// Bounded-concurrency executor for frame jobs.
///
/// Wraps a dedicated rayon pool with exactly `parallelism` threads. Jobs are
/// admitted FIFO; at most `parallelism` execute concurrently and the rest
/// queue. Every submitted job sends exactly one `(index, outcome)` message,
/// in whatever order jobs happen to finish.
pub struct FrameWorkerPool {
    pool: rayon::ThreadPool,
    outcome_tx: mpsc::Sender<(usize, JobOutcome)>,
    cancel: CancelToken,
}

impl FrameWorkerPool {
    pub fn new(
        parallelism: usize,
        outcome_tx: mpsc::Sender<(usize, JobOutcome)>,
        cancel: CancelToken,
    ) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(parallelism.max(1))
            .thread_name(|i| format!("tinta-worker-{i}"))
            .build()
            .map_err(|e| TintaError::Pipeline(format!("failed to build worker pool: {e}")))?;
        Ok(Self {
            pool,
            outcome_tx,
            cancel,
        })
    }

    pub fn parallelism(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Queue one job. Returns immediately; the outcome arrives on the
    /// channel. A job whose token is already cancelled when it reaches a
    /// worker resolves `Cancelled` without running the chain.
    pub fn submit(&self, job: FrameJob) {
        let tx = self.outcome_tx.clone();
        let cancel = self.cancel.clone();
        let index = job.index();
        self.pool.spawn(move || {
            let outcome = job.run(&cancel);
            // Send fails only if the run already tore down; drop the outcome.
            let _ = tx.send((index, outcome));
        });
    }
}
