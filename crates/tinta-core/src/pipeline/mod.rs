pub mod config;
mod collector;
mod orchestrator;
mod pool;
mod types;

pub use collector::FrameCollector;
pub use orchestrator::{run_pipeline, run_pipeline_reported, run_pipeline_with};
pub use pool::FrameWorkerPool;
pub use types::{
    FrameJob, JobOutcome, NoOpReporter, PipelineStage, PipelineState, ProgressReporter, RunStatus,
    RunSummary,
};
