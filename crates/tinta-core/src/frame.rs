use ndarray::Array3;

/// A single decoded video frame.
///
/// Pixel data is 8-bit, row-major, shape = (height, width, channels).
/// Channels is 1 for mono and 3 for RGB. The buffer is never mutated in
/// place; filters allocate a fresh frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Pixel data, shape = (height, width, channels)
    pub data: Array3<u8>,
    /// Position of this frame in the source video (0-based, assigned
    /// sequentially at decode time).
    pub index: usize,
}

impl Frame {
    pub fn new(data: Array3<u8>, index: usize) -> Self {
        Self { data, index }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }
}

/// Container-level metadata, captured once when the source is opened.
///
/// Shared read-only by job construction and the output container.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub frame_count: usize,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub fps: f64,
}

impl VideoMetadata {
    /// Bytes per decoded frame.
    pub fn frame_byte_size(&self) -> usize {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|p| p.checked_mul(self.channels as usize))
            .expect("Frame size calculation overflow")
    }
}
