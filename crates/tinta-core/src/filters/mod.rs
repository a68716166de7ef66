pub mod brightness;
pub mod grayscale;
pub mod invert;

use std::sync::Arc;

use crate::cancel::CancelToken;
use crate::error::Result;
use crate::frame::Frame;

/// A single pixel-level transform.
///
/// Implementations must be pure and deterministic: the same input frame and
/// parameters always produce the same output, and the input buffer is never
/// modified. A filter may reject a frame it cannot handle (e.g. wrong channel
/// count) with `TintaError::UnsupportedPixelFormat`; that failure is isolated
/// to the one frame being processed.
pub trait FrameFilter: Send + Sync {
    /// Human-readable filter name, used in the usage report.
    fn name(&self) -> &str;

    fn apply(&self, frame: &Frame) -> Result<Frame>;
}

/// An ordered sequence of filters, applied front to back.
///
/// Immutable once a pipeline run starts; shared across frame jobs behind an
/// `Arc`. Applying the chain never mutates the input frame.
#[derive(Clone, Default)]
pub struct FilterChain {
    stages: Vec<Arc<dyn FrameFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stages(stages: Vec<Arc<dyn FrameFilter>>) -> Self {
        Self { stages }
    }

    pub fn push(&mut self, filter: Arc<dyn FrameFilter>) {
        self.stages.push(filter);
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in application order.
    pub fn names(&self) -> Vec<String> {
        self.stages.iter().map(|f| f.name().to_string()).collect()
    }

    /// Apply all stages to a frame, producing a new frame with the same index.
    pub fn apply(&self, frame: &Frame) -> Result<Frame> {
        self.apply_cancellable(frame, &CancelToken::new())
    }

    /// Apply all stages, checking the cancel token before each stage.
    ///
    /// Returns `TintaError::Cancelled` if the token fires mid-chain; the
    /// partially filtered intermediate is discarded.
    pub fn apply_cancellable(&self, frame: &Frame, cancel: &CancelToken) -> Result<Frame> {
        let mut result = frame.clone();
        for stage in &self.stages {
            if cancel.is_cancelled() {
                return Err(crate::error::TintaError::Cancelled);
            }
            result = stage.apply(&result)?;
        }
        Ok(result)
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
