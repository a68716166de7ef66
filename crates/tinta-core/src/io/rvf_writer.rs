use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::{Result, TintaError};
use crate::frame::{Frame, VideoMetadata};
use crate::io::codec::FrameSink;
use crate::io::rvf::{RVF_FRAME_COUNT_OFFSET, RVF_HEADER_SIZE, RVF_MAGIC, RVF_VERSION};

/// Writes a valid RVF file at the raw byte level.
///
/// The header is written up front with a frame count of zero; `finalize`
/// patches in the number of frames actually written. Skipped frames in the
/// pipeline mean the final count can be lower than the source's.
pub struct RvfWriter {
    writer: BufWriter<File>,
    metadata: VideoMetadata,
    frames_written: u32,
}

impl RvfWriter {
    /// Create a new RVF file and write the header.
    pub fn create(path: &Path, metadata: &VideoMetadata) -> Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write_header(&mut writer, metadata, 0)?;
        Ok(Self {
            writer,
            metadata: metadata.clone(),
            frames_written: 0,
        })
    }

    pub fn frames_written(&self) -> u32 {
        self.frames_written
    }

    /// Write a single frame. Dimensions must match the stream parameters.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        if frame.height() != self.metadata.height as usize
            || frame.width() != self.metadata.width as usize
            || frame.channels() != self.metadata.channels as usize
        {
            return Err(TintaError::Codec(format!(
                "frame {} is {}x{}x{}, stream is {}x{}x{}",
                frame.index,
                frame.width(),
                frame.height(),
                frame.channels(),
                self.metadata.width,
                self.metadata.height,
                self.metadata.channels
            )));
        }

        let data = frame.data.as_standard_layout();
        let bytes = data.as_slice().expect("standard layout array has a slice");
        debug_assert_eq!(bytes.len(), self.metadata.frame_byte_size());
        self.writer.write_all(bytes)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Patch the final frame count into the header, flush and close.
    pub fn finalize(mut self) -> Result<()> {
        self.writer.flush()?;
        let mut file = self
            .writer
            .into_inner()
            .map_err(|e| TintaError::Codec(e.to_string()))?;
        file.seek(SeekFrom::Start(RVF_FRAME_COUNT_OFFSET as u64))?;
        file.write_all(&self.frames_written.to_le_bytes())?;
        file.sync_all()?;
        Ok(())
    }
}

impl FrameSink for RvfWriter {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        RvfWriter::write_frame(self, frame)
    }

    fn finalize(self: Box<Self>) -> Result<()> {
        RvfWriter::finalize(*self)
    }
}

fn write_header(w: &mut impl Write, metadata: &VideoMetadata, frame_count: u32) -> Result<()> {
    // Magic (8 bytes)
    w.write_all(RVF_MAGIC)?;
    // Version (4 bytes)
    w.write_all(&RVF_VERSION.to_le_bytes())?;
    // Width (4 bytes)
    w.write_all(&metadata.width.to_le_bytes())?;
    // Height (4 bytes)
    w.write_all(&metadata.height.to_le_bytes())?;
    // Channels (4 bytes)
    w.write_all(&(metadata.channels as u32).to_le_bytes())?;
    // Frames per second (8 bytes)
    w.write_all(&metadata.fps.to_le_bytes())?;
    // FrameCount (4 bytes)
    w.write_all(&frame_count.to_le_bytes())?;

    debug_assert_eq!(8 + 4 + 4 + 4 + 4 + 8 + 4, RVF_HEADER_SIZE);
    Ok(())
}
