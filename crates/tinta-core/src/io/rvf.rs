use std::fs::File;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use memmap2::Mmap;
use ndarray::Array3;

use crate::error::{Result, TintaError};
use crate::frame::{Frame, VideoMetadata};
use crate::io::codec::FrameSource;

pub const RVF_HEADER_SIZE: usize = 36;
pub const RVF_MAGIC: &[u8; 8] = b"TINTARVF";
pub const RVF_VERSION: u32 = 1;

/// Byte offset of the frame-count field, patched by the writer at finalize.
pub const RVF_FRAME_COUNT_OFFSET: usize = 32;

/// RVF file header (36 bytes, little-endian).
///
/// Raw interleaved video: the header is followed by `frame_count` frames of
/// `width * height * channels` 8-bit samples, row-major.
#[derive(Clone, Debug)]
pub struct RvfHeader {
    pub version: u32,
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    pub fps: f64,
    pub frame_count: u32,
}

impl RvfHeader {
    /// Total bytes per frame.
    pub fn frame_byte_size(&self) -> usize {
        let pixels = (self.width as usize)
            .checked_mul(self.height as usize)
            .expect("Image dimensions too large");
        pixels
            .checked_mul(self.channels as usize)
            .expect("Frame size calculation overflow")
    }

    pub fn metadata(&self) -> VideoMetadata {
        VideoMetadata {
            frame_count: self.frame_count as usize,
            width: self.width,
            height: self.height,
            channels: self.channels as u8,
            fps: self.fps,
        }
    }
}

/// Memory-mapped RVF file reader.
pub struct RvfReader {
    mmap: Mmap,
    pub header: RvfHeader,
    metadata: VideoMetadata,
    cursor: usize,
}

impl RvfReader {
    /// Open an RVF file and parse its header.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < RVF_HEADER_SIZE {
            return Err(TintaError::InvalidVideo(
                "File too small for RVF header".into(),
            ));
        }

        if &mmap[0..8] != RVF_MAGIC {
            return Err(TintaError::InvalidVideo("Missing TINTARVF magic".into()));
        }

        let header = parse_header(&mmap[..RVF_HEADER_SIZE])?;

        let expected_data_size =
            RVF_HEADER_SIZE + header.frame_byte_size() * header.frame_count as usize;
        if mmap.len() < expected_data_size {
            return Err(TintaError::InvalidVideo(format!(
                "File truncated: expected at least {} bytes, got {}",
                expected_data_size,
                mmap.len()
            )));
        }

        let metadata = header.metadata();
        Ok(Self {
            mmap,
            header,
            metadata,
            cursor: 0,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.header.frame_count as usize
    }

    /// Get the raw bytes for a single frame (zero-copy from mmap).
    pub fn frame_raw(&self, index: usize) -> Result<&[u8]> {
        let count = self.frame_count();
        if index >= count {
            return Err(TintaError::FrameIndexOutOfRange {
                index,
                total: count,
            });
        }
        let offset = RVF_HEADER_SIZE + index * self.header.frame_byte_size();
        let end = offset + self.header.frame_byte_size();
        Ok(&self.mmap[offset..end])
    }

    /// Read a single frame by index.
    pub fn read_frame(&self, index: usize) -> Result<Frame> {
        let raw = self.frame_raw(index)?;
        let h = self.header.height as usize;
        let w = self.header.width as usize;
        let c = self.header.channels as usize;

        let data = Array3::from_shape_vec((h, w, c), raw.to_vec())
            .map_err(|e| TintaError::InvalidVideo(e.to_string()))?;
        Ok(Frame::new(data, index))
    }

    /// Iterator over all frames.
    pub fn frames(&self) -> impl Iterator<Item = Result<Frame>> + '_ {
        (0..self.frame_count()).map(move |i| self.read_frame(i))
    }
}

impl FrameSource for RvfReader {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn next_frame(&mut self) -> Result<Option<Frame>> {
        if self.cursor >= self.frame_count() {
            return Ok(None);
        }
        let frame = self.read_frame(self.cursor)?;
        self.cursor += 1;
        Ok(Some(frame))
    }
}

fn parse_header(buf: &[u8]) -> Result<RvfHeader> {
    let mut cursor = std::io::Cursor::new(&buf[8..]); // skip magic

    let version = cursor.read_u32::<LittleEndian>()?;
    let width = cursor.read_u32::<LittleEndian>()?;
    let height = cursor.read_u32::<LittleEndian>()?;
    let channels = cursor.read_u32::<LittleEndian>()?;
    let fps = cursor.read_f64::<LittleEndian>()?;
    let frame_count = cursor.read_u32::<LittleEndian>()?;

    if version != RVF_VERSION {
        return Err(TintaError::InvalidVideo(format!(
            "Unsupported RVF version: {version}"
        )));
    }

    if width == 0 || height == 0 {
        return Err(TintaError::InvalidDimensions { width, height });
    }

    if channels != 1 && channels != 3 {
        return Err(TintaError::InvalidVideo(format!(
            "Unsupported channel count: {channels}"
        )));
    }

    if !fps.is_finite() || fps <= 0.0 {
        return Err(TintaError::InvalidVideo(format!(
            "Invalid frame rate: {fps}"
        )));
    }

    Ok(RvfHeader {
        version,
        width,
        height,
        channels,
        fps,
        frame_count,
    })
}
