use ndarray::Array3;

use crate::error::{Result, TintaError};
use crate::frame::Frame;
use crate::filters::FrameFilter;

/// Convert an RGB frame to grayscale.
///
/// Luma = 0.3 R + 0.59 G + 0.11 B, written back to all three channels so the
/// output keeps the container's channel count. Mono input is rejected.
pub fn grayscale(frame: &Frame) -> Result<Frame> {
    if frame.channels() != 3 {
        return Err(TintaError::UnsupportedPixelFormat(format!(
            "grayscale requires 3 channels, got {}",
            frame.channels()
        )));
    }

    let (h, w, c) = frame.data.dim();
    let mut data = Array3::<u8>::zeros((h, w, c));
    for row in 0..h {
        for col in 0..w {
            let r = frame.data[[row, col, 0]] as f32;
            let g = frame.data[[row, col, 1]] as f32;
            let b = frame.data[[row, col, 2]] as f32;
            let gray = (0.3 * r + 0.59 * g + 0.11 * b) as u8;
            for ch in 0..c {
                data[[row, col, ch]] = gray;
            }
        }
    }

    Ok(Frame::new(data, frame.index))
}

pub struct Grayscale;

impl FrameFilter for Grayscale {
    fn name(&self) -> &str {
        "Grayscale"
    }

    fn apply(&self, frame: &Frame) -> Result<Frame> {
        grayscale(frame)
    }
}
