use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::Arc;

use tracing::{info, warn};

use crate::cancel::CancelToken;
use crate::error::{Result, TintaError};
use crate::filters::FilterChain;
use crate::io::codec::{self, FrameSink};
use crate::pipeline::collector::FrameCollector;
use crate::pipeline::config::{self, CancelPolicy, PipelineConfig};
use crate::pipeline::pool::FrameWorkerPool;
use crate::pipeline::types::{
    ClosureReporter, FrameJob, JobOutcome, PipelineStage, ProgressReporter, RunStatus, RunSummary,
};

/// Run the full video pipeline with a `(stage, fraction)` progress callback.
pub fn run_pipeline<F>(config: &PipelineConfig, on_progress: F) -> Result<RunSummary>
where
    F: FnMut(PipelineStage, f32) + Send + 'static,
{
    run_pipeline_reported(
        config,
        Arc::new(ClosureReporter::new(on_progress)),
        CancelToken::new(),
    )
}

/// Run the full video pipeline with a thread-safe progress reporter and a
/// cancellation token.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
    cancel: CancelToken,
) -> Result<RunSummary> {
    let chain = config::build_chain(&config.filters);
    run_pipeline_with(config, chain, reporter, cancel)
}

/// Run the pipeline with an explicit filter chain.
///
/// Every call is an independent run: source, worker pool, collector, and
/// sink are built fresh and torn down with the call, so restarting is just
/// calling again. The terminal outcome is delivered exactly once through the
/// return value: `Ok` with `RunStatus::Succeeded` or `RunStatus::Cancelled`,
/// `Err` for a failed run.
pub fn run_pipeline_with(
    config: &PipelineConfig,
    chain: FilterChain,
    reporter: Arc<dyn ProgressReporter>,
    cancel: CancelToken,
) -> Result<RunSummary> {
    let mut source = codec::open_source(&config.input)?;
    let metadata = source.metadata().clone();
    let total = metadata.frame_count;
    info!(
        total_frames = total,
        width = metadata.width,
        height = metadata.height,
        fps = metadata.fps,
        parallelism = config.workers.parallelism,
        "Opened video"
    );

    let chain = Arc::new(chain);
    let (outcome_tx, outcome_rx) = mpsc::channel();
    let pool = FrameWorkerPool::new(
        config.workers.parallelism,
        outcome_tx.clone(),
        cancel.clone(),
    )?;
    let collector = FrameCollector::new(total, reporter.clone());

    // Reading: stream frames into jobs as they decode. Filtering overlaps
    // this phase; "submission complete" is what ends it.
    reporter.begin_stage(PipelineStage::Reading, Some(total));
    let mut read_error: Option<TintaError> = None;
    let mut submitted = 0usize;
    while submitted < total {
        if cancel.is_cancelled() {
            break;
        }
        match source.next_frame() {
            Ok(Some(frame)) => {
                pool.submit(FrameJob::new(frame, Arc::clone(&chain)));
                submitted += 1;
                reporter.advance(submitted);
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Decoding failed mid-stream; aborting run");
                cancel.cancel();
                read_error = Some(e);
                break;
            }
        }
    }
    // Frames that never became jobs still need a terminal outcome.
    for index in submitted..total {
        let _ = outcome_tx.send((index, JobOutcome::Cancelled));
    }
    drop(outcome_tx);
    // Spawned jobs keep their own sender clones and keep running; dropping
    // the pool handle here means the channel closes once the last job sends.
    drop(pool);
    drop(source);
    reporter.finish_stage();

    // Processing: the collector loop consumes worker outcomes while this
    // thread blocks on the completion signal.
    reporter.begin_stage(PipelineStage::Processing, Some(total));
    let drain_result = std::thread::scope(|s| {
        let c = &collector;
        let handle = s.spawn(move || c.drain(outcome_rx));
        c.wait_complete();
        handle
            .join()
            .unwrap_or_else(|_| Err(TintaError::Pipeline("collector loop panicked".into())))
    });
    reporter.finish_stage();
    drain_result?;

    if let Some(e) = read_error {
        return Err(e);
    }

    let (outcomes, state) = collector.into_results();
    let was_cancelled = cancel.is_cancelled();

    if was_cancelled && config.cancel_policy == CancelPolicy::Abort {
        info!(
            resolved = state.resolved(),
            succeeded = state.succeeded,
            "Run cancelled; output skipped"
        );
        return Ok(RunSummary {
            status: RunStatus::Cancelled,
            output: None,
            state,
            frames_written: 0,
        });
    }

    // Writing: strict ascending index order, skipping gaps.
    let output = config
        .output
        .clone()
        .unwrap_or_else(|| config::default_output_path(&config.input));
    reporter.begin_stage(PipelineStage::Writing, Some(total));
    let mut sink = codec::create_sink(&output, &metadata)?;
    let frames_written = write_frames(sink.as_mut(), &outcomes, total, reporter.as_ref())?;
    sink.finalize()?;
    reporter.finish_stage();

    let status = if was_cancelled {
        RunStatus::Cancelled
    } else {
        RunStatus::Succeeded
    };
    info!(
        output = %output.display(),
        written = frames_written,
        failed = state.failed,
        cancelled = state.cancelled,
        "Video processing complete"
    );
    Ok(RunSummary {
        status,
        output: Some(output),
        state,
        frames_written,
    })
}

/// Write resolved frames in ascending index order, skipping failed,
/// cancelled, and missing indices.
fn write_frames(
    sink: &mut dyn FrameSink,
    outcomes: &HashMap<usize, JobOutcome>,
    total: usize,
    reporter: &dyn ProgressReporter,
) -> Result<usize> {
    let mut written = 0usize;
    for index in 0..total {
        match outcomes.get(&index) {
            Some(JobOutcome::Success(frame)) => {
                sink.write_frame(frame)?;
                written += 1;
            }
            Some(JobOutcome::Failure(e)) => {
                warn!(index, error = %e, "Skipping failed frame");
                reporter.status(&format!("Frame {index} failed to process. Skipping..."));
            }
            Some(JobOutcome::Cancelled) => {
                warn!(index, "Skipping cancelled frame");
                reporter.status(&format!("Frame {index} was cancelled. Skipping..."));
            }
            None => {
                // Collector invariants keep this unreachable; treated like a
                // failed frame anyway.
                warn!(index, "No outcome recorded for frame");
                reporter.status(&format!("Frame {index} not found. Skipping..."));
            }
        }
        reporter.advance(index + 1);
    }
    Ok(written)
}
