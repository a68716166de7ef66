//! Narrow capability boundary over the container codec.
//!
//! The pipeline only ever sees these two traits; the concrete RVF
//! implementation lives in `rvf` / `rvf_writer` and other containers can be
//! added behind `open_source` without touching pipeline code.

use std::path::Path;

use crate::error::{Result, TintaError};
use crate::frame::{Frame, VideoMetadata};
use crate::io::rvf::RvfReader;
use crate::io::rvf_writer::RvfWriter;

/// Forward-only decoder for one video container.
///
/// Frames come back in sequence order with indices increasing by one;
/// `Ok(None)` signals end of stream. Decoder resources are released on drop,
/// on every exit path.
pub trait FrameSource: Send {
    fn metadata(&self) -> &VideoMetadata;

    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// Encoder for one output container.
///
/// `finalize` must be called exactly once to produce a valid file; dropping
/// without finalizing leaves the container marked as holding zero frames.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &Frame) -> Result<()>;

    fn finalize(self: Box<Self>) -> Result<()>;
}

/// Open a video container for reading, dispatching on file extension.
pub fn open_source(path: &Path) -> Result<Box<dyn FrameSource>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("rvf") => Ok(Box::new(RvfReader::open(path)?)),
        _ => Err(TintaError::InvalidVideo(format!(
            "unsupported container format: {}",
            path.display()
        ))),
    }
}

/// Create an output container with the given stream parameters.
pub fn create_sink(path: &Path, metadata: &VideoMetadata) -> Result<Box<dyn FrameSink>> {
    Ok(Box::new(RvfWriter::create(path, metadata)?))
}
