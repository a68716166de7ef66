use tinta_core::io::rvf::{RVF_HEADER_SIZE, RVF_MAGIC, RVF_VERSION};

/// Build an RVF file header.
///
/// Returns a `Vec<u8>` containing just the 36-byte header. Append frame
/// pixel data after calling this function.
pub fn build_rvf_header(
    width: u32,
    height: u32,
    channels: u32,
    fps: f64,
    num_frames: usize,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(RVF_HEADER_SIZE);

    // Magic (8 bytes)
    buf.extend_from_slice(RVF_MAGIC);
    // Version (4 bytes)
    buf.extend_from_slice(&RVF_VERSION.to_le_bytes());
    // Width
    buf.extend_from_slice(&width.to_le_bytes());
    // Height
    buf.extend_from_slice(&height.to_le_bytes());
    // Channels
    buf.extend_from_slice(&channels.to_le_bytes());
    // Frames per second
    buf.extend_from_slice(&fps.to_le_bytes());
    // FrameCount
    buf.extend_from_slice(&(num_frames as u32).to_le_bytes());

    assert_eq!(buf.len(), RVF_HEADER_SIZE);
    buf
}

/// Build a complete synthetic RVF file with the given frame data.
pub fn build_rvf_with_frames(
    width: u32,
    height: u32,
    channels: u32,
    frames: &[Vec<u8>],
) -> Vec<u8> {
    let mut buf = build_rvf_header(width, height, channels, 30.0, frames.len());
    for frame in frames {
        buf.extend_from_slice(frame);
    }
    buf
}

/// Write an RVF buffer to a temporary `.rvf` file and return the handle.
///
/// The file stays alive as long as the returned `NamedTempFile` is not
/// dropped. The suffix matters: the codec boundary dispatches on it.
pub fn write_test_rvf(data: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut f = tempfile::Builder::new()
        .suffix(".rvf")
        .tempfile()
        .expect("create temp file");
    f.write_all(data).expect("write RVF data");
    f.flush().expect("flush");
    f
}
