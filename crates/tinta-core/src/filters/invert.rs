use crate::error::Result;
use crate::frame::Frame;
use crate::filters::FrameFilter;

/// Invert every sample: output = 255 - input. Works on any channel count.
pub fn invert_colors(frame: &Frame) -> Frame {
    let data = frame.data.mapv(|v| 255 - v);
    Frame::new(data, frame.index)
}

pub struct InvertColors;

impl FrameFilter for InvertColors {
    fn name(&self) -> &str {
        "Invert Colors"
    }

    fn apply(&self, frame: &Frame) -> Result<Frame> {
        Ok(invert_colors(frame))
    }
}
