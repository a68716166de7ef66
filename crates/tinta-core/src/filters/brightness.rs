use crate::error::Result;
use crate::frame::Frame;
use crate::filters::FrameFilter;

/// Default brightness adjustment when none is given.
pub const DEFAULT_BRIGHTNESS_LEVEL: i16 = 50;

/// Add `level` to every sample, clamped to 0..=255.
///
/// `level` ranges over -255..=255; negative values darken.
pub fn brightness(frame: &Frame, level: i16) -> Frame {
    let data = frame
        .data
        .mapv(|v| (v as i16 + level).clamp(0, 255) as u8);
    Frame::new(data, frame.index)
}

pub struct Brightness {
    level: i16,
}

impl Brightness {
    pub fn new(level: i16) -> Self {
        Self { level }
    }

    pub fn level(&self) -> i16 {
        self.level
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::new(DEFAULT_BRIGHTNESS_LEVEL)
    }
}

impl FrameFilter for Brightness {
    fn name(&self) -> &str {
        "Brightness"
    }

    fn apply(&self, frame: &Frame) -> Result<Frame> {
        Ok(brightness(frame, self.level))
    }
}
