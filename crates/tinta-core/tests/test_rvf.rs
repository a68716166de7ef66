mod common;

use ndarray::Array3;

use tinta_core::error::TintaError;
use tinta_core::frame::{Frame, VideoMetadata};
use tinta_core::io::codec::FrameSource;
use tinta_core::io::rvf::RvfReader;
use tinta_core::io::rvf_writer::RvfWriter;

use common::{build_rvf_header, build_rvf_with_frames, write_test_rvf};

#[test]
fn test_parse_rgb() {
    let w = 2u32;
    let h = 2u32;
    let frame_data: Vec<u8> = (0u8..12).collect();
    let data = build_rvf_with_frames(w, h, 3, &[frame_data]);
    let tmpfile = write_test_rvf(&data);

    let reader = RvfReader::open(tmpfile.path()).unwrap();
    assert_eq!(reader.frame_count(), 1);
    assert_eq!(reader.header.width, 2);
    assert_eq!(reader.header.height, 2);
    assert_eq!(reader.header.channels, 3);
    assert!((reader.header.fps - 30.0).abs() < 1e-9);

    let frame = reader.read_frame(0).unwrap();
    assert_eq!(frame.width(), 2);
    assert_eq!(frame.height(), 2);
    assert_eq!(frame.channels(), 3);
    assert_eq!(frame.index, 0);
    // Row-major, channel-interleaved: pixel (0,1) starts at byte 3.
    assert_eq!(frame.data[[0, 0, 0]], 0);
    assert_eq!(frame.data[[0, 1, 0]], 3);
    assert_eq!(frame.data[[1, 1, 2]], 11);
}

#[test]
fn test_parse_mono() {
    let frame_data: Vec<u8> = vec![10, 20, 30, 40, 50, 60];
    let data = build_rvf_with_frames(3, 2, 1, &[frame_data]);
    let tmpfile = write_test_rvf(&data);

    let reader = RvfReader::open(tmpfile.path()).unwrap();
    assert_eq!(reader.header.channels, 1);

    let frame = reader.read_frame(0).unwrap();
    assert_eq!(frame.channels(), 1);
    assert_eq!(frame.data[[0, 0, 0]], 10);
    assert_eq!(frame.data[[1, 2, 0]], 60);
}

#[test]
fn test_multiple_frames() {
    let frame1: Vec<u8> = vec![0, 50, 100, 200];
    let frame2: Vec<u8> = vec![255, 200, 100, 50];
    let data = build_rvf_with_frames(2, 2, 1, &[frame1, frame2]);
    let tmpfile = write_test_rvf(&data);

    let reader = RvfReader::open(tmpfile.path()).unwrap();
    assert_eq!(reader.frame_count(), 2);

    let f0 = reader.read_frame(0).unwrap();
    let f1 = reader.read_frame(1).unwrap();
    assert_eq!(f0.data[[0, 0, 0]], 0);
    assert_eq!(f1.data[[0, 0, 0]], 255);
}

#[test]
fn test_out_of_range() {
    let data = build_rvf_with_frames(2, 2, 1, &[vec![0; 4]]);
    let tmpfile = write_test_rvf(&data);

    let reader = RvfReader::open(tmpfile.path()).unwrap();
    assert!(matches!(
        reader.read_frame(1),
        Err(TintaError::FrameIndexOutOfRange { index: 1, total: 1 })
    ));
}

#[test]
fn test_bad_magic() {
    let mut data = build_rvf_with_frames(2, 2, 1, &[vec![0; 4]]);
    data[0] = b'X';
    let tmpfile = write_test_rvf(&data);

    assert!(matches!(
        RvfReader::open(tmpfile.path()),
        Err(TintaError::InvalidVideo(_))
    ));
}

#[test]
fn test_truncated_file() {
    let data = build_rvf_with_frames(2, 2, 3, &[vec![0; 12]]);
    let tmpfile = write_test_rvf(&data[..data.len() - 4]);

    assert!(matches!(
        RvfReader::open(tmpfile.path()),
        Err(TintaError::InvalidVideo(_))
    ));
}

#[test]
fn test_zero_dimensions() {
    let data = build_rvf_header(0, 2, 1, 30.0, 0);
    let tmpfile = write_test_rvf(&data);

    assert!(matches!(
        RvfReader::open(tmpfile.path()),
        Err(TintaError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_unsupported_channel_count() {
    let data = build_rvf_header(2, 2, 2, 30.0, 0);
    let tmpfile = write_test_rvf(&data);

    assert!(matches!(
        RvfReader::open(tmpfile.path()),
        Err(TintaError::InvalidVideo(_))
    ));
}

#[test]
fn test_frames_iterator_assigns_indices() {
    let frames: Vec<Vec<u8>> = (0..3).map(|i| vec![i as u8; 4]).collect();
    let data = build_rvf_with_frames(2, 2, 1, &frames);
    let tmpfile = write_test_rvf(&data);

    let reader = RvfReader::open(tmpfile.path()).unwrap();
    let frames: Vec<_> = reader.frames().collect::<Result<_, _>>().unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].index, 0);
    assert_eq!(frames[2].index, 2);
}

#[test]
fn test_next_frame_is_forward_only() {
    let frames: Vec<Vec<u8>> = (0..3).map(|i| vec![i as u8 * 10; 4]).collect();
    let data = build_rvf_with_frames(2, 2, 1, &frames);
    let tmpfile = write_test_rvf(&data);

    let mut reader = RvfReader::open(tmpfile.path()).unwrap();
    let mut seen = Vec::new();
    while let Some(frame) = reader.next_frame().unwrap() {
        seen.push(frame.index);
    }
    assert_eq!(seen, vec![0, 1, 2]);
    // End of stream is sticky.
    assert!(reader.next_frame().unwrap().is_none());
}

#[test]
fn test_writer_patches_frame_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.rvf");
    let metadata = VideoMetadata {
        frame_count: 5,
        width: 2,
        height: 2,
        channels: 1,
        fps: 24.0,
    };

    let mut writer = RvfWriter::create(&path, &metadata).unwrap();
    for i in 0..2usize {
        let frame = Frame::new(
            Array3::from_shape_vec((2, 2, 1), vec![i as u8; 4]).unwrap(),
            i,
        );
        writer.write_frame(&frame).unwrap();
    }
    writer.finalize().unwrap();

    // The header carries the frames actually written, not the source total.
    let reader = RvfReader::open(&path).unwrap();
    assert_eq!(reader.frame_count(), 2);
    assert!((reader.header.fps - 24.0).abs() < 1e-9);
    assert_eq!(reader.read_frame(1).unwrap().data[[0, 0, 0]], 1);
}

#[test]
fn test_writer_rejects_dimension_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.rvf");
    let metadata = VideoMetadata {
        frame_count: 1,
        width: 2,
        height: 2,
        channels: 1,
        fps: 24.0,
    };

    let mut writer = RvfWriter::create(&path, &metadata).unwrap();
    let wrong = Frame::new(Array3::zeros((3, 3, 1)), 0);
    assert!(matches!(
        writer.write_frame(&wrong),
        Err(TintaError::Codec(_))
    ));
}
