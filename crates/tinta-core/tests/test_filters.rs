use std::sync::Arc;

use ndarray::Array3;

use tinta_core::cancel::CancelToken;
use tinta_core::error::{Result, TintaError};
use tinta_core::filters::brightness::{brightness, Brightness, DEFAULT_BRIGHTNESS_LEVEL};
use tinta_core::filters::grayscale::grayscale;
use tinta_core::filters::invert::{invert_colors, InvertColors};
use tinta_core::filters::{FilterChain, FrameFilter};
use tinta_core::frame::Frame;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn rgb_frame(pixels: &[[u8; 3]], index: usize) -> Frame {
    let data: Vec<u8> = pixels.iter().flatten().copied().collect();
    Frame::new(
        Array3::from_shape_vec((1, pixels.len(), 3), data).unwrap(),
        index,
    )
}

fn mono_frame(pixels: &[u8], index: usize) -> Frame {
    Frame::new(
        Array3::from_shape_vec((1, pixels.len(), 1), pixels.to_vec()).unwrap(),
        index,
    )
}

// ---------------------------------------------------------------------------
// grayscale
// ---------------------------------------------------------------------------

#[test]
fn test_grayscale_luma_coefficients() {
    let frame = rgb_frame(&[[100, 150, 200]], 0);
    let out = grayscale(&frame).unwrap();
    // 0.3*100 + 0.59*150 + 0.11*200 = 140.5, truncated
    for ch in 0..3 {
        assert_eq!(out.data[[0, 0, ch]], 140);
    }
}

#[test]
fn test_grayscale_keeps_channel_count() {
    let frame = rgb_frame(&[[255, 0, 0], [0, 0, 255]], 0);
    let out = grayscale(&frame).unwrap();
    assert_eq!(out.channels(), 3);
    assert_eq!(out.data[[0, 0, 0]], out.data[[0, 0, 1]]);
    assert_eq!(out.data[[0, 0, 1]], out.data[[0, 0, 2]]);
}

#[test]
fn test_grayscale_rejects_mono() {
    let frame = mono_frame(&[1, 2, 3], 0);
    assert!(matches!(
        grayscale(&frame),
        Err(TintaError::UnsupportedPixelFormat(_))
    ));
}

// ---------------------------------------------------------------------------
// invert
// ---------------------------------------------------------------------------

#[test]
fn test_invert() {
    let frame = rgb_frame(&[[0, 100, 255]], 0);
    let out = invert_colors(&frame);
    assert_eq!(out.data[[0, 0, 0]], 255);
    assert_eq!(out.data[[0, 0, 1]], 155);
    assert_eq!(out.data[[0, 0, 2]], 0);
}

#[test]
fn test_invert_mono() {
    let frame = mono_frame(&[0, 200], 0);
    let out = invert_colors(&frame);
    assert_eq!(out.data[[0, 0, 0]], 255);
    assert_eq!(out.data[[0, 1, 0]], 55);
}

// ---------------------------------------------------------------------------
// brightness
// ---------------------------------------------------------------------------

#[test]
fn test_brightness_clamps_high() {
    let frame = mono_frame(&[250], 0);
    let out = brightness(&frame, 50);
    assert_eq!(out.data[[0, 0, 0]], 255);
}

#[test]
fn test_brightness_clamps_low() {
    let frame = mono_frame(&[50], 0);
    let out = brightness(&frame, -60);
    assert_eq!(out.data[[0, 0, 0]], 0);
}

#[test]
fn test_brightness_default_level() {
    assert_eq!(Brightness::default().level(), DEFAULT_BRIGHTNESS_LEVEL);
    let frame = mono_frame(&[100], 0);
    let out = Brightness::default().apply(&frame).unwrap();
    assert_eq!(out.data[[0, 0, 0]], 150);
}

// ---------------------------------------------------------------------------
// FilterChain
// ---------------------------------------------------------------------------

#[test]
fn test_chain_order_matters() {
    let frame = mono_frame(&[100], 0);

    let mut invert_then_brighten = FilterChain::new();
    invert_then_brighten.push(Arc::new(InvertColors));
    invert_then_brighten.push(Arc::new(Brightness::new(50)));

    let mut brighten_then_invert = FilterChain::new();
    brighten_then_invert.push(Arc::new(Brightness::new(50)));
    brighten_then_invert.push(Arc::new(InvertColors));

    let a = invert_then_brighten.apply(&frame).unwrap();
    let b = brighten_then_invert.apply(&frame).unwrap();
    assert_eq!(a.data[[0, 0, 0]], 205); // (255-100)+50
    assert_eq!(b.data[[0, 0, 0]], 105); // 255-(100+50)
}

#[test]
fn test_chain_never_mutates_input() {
    let frame = rgb_frame(&[[10, 20, 30], [40, 50, 60]], 7);
    let original = frame.data.clone();

    let chain = FilterChain::with_stages(vec![
        Arc::new(InvertColors) as Arc<dyn FrameFilter>,
        Arc::new(Brightness::new(-20)),
    ]);
    let out = chain.apply(&frame).unwrap();

    assert_eq!(frame.data, original);
    assert_ne!(out.data, original);
}

#[test]
fn test_chain_preserves_index() {
    let frame = mono_frame(&[1], 42);
    let chain = FilterChain::with_stages(vec![Arc::new(InvertColors) as Arc<dyn FrameFilter>]);
    assert_eq!(chain.apply(&frame).unwrap().index, 42);
}

#[test]
fn test_empty_chain_is_identity() {
    let frame = rgb_frame(&[[1, 2, 3]], 0);
    let chain = FilterChain::new();
    assert!(chain.is_empty());
    assert_eq!(chain.apply(&frame).unwrap().data, frame.data);
}

#[test]
fn test_chain_cancelled_before_first_stage() {
    let frame = mono_frame(&[1], 0);
    let chain = FilterChain::with_stages(vec![Arc::new(InvertColors) as Arc<dyn FrameFilter>]);
    let token = CancelToken::new();
    token.cancel();
    assert!(matches!(
        chain.apply_cancellable(&frame, &token),
        Err(TintaError::Cancelled)
    ));
}

#[test]
fn test_chain_names() {
    let chain = FilterChain::with_stages(vec![
        Arc::new(tinta_core::filters::grayscale::Grayscale) as Arc<dyn FrameFilter>,
        Arc::new(InvertColors),
        Arc::new(Brightness::new(10)),
    ]);
    assert_eq!(chain.names(), ["Grayscale", "Invert Colors", "Brightness"]);
}

// ---------------------------------------------------------------------------
// Plugin boundary
// ---------------------------------------------------------------------------

struct AlwaysFails;

impl FrameFilter for AlwaysFails {
    fn name(&self) -> &str {
        "Always Fails"
    }

    fn apply(&self, _frame: &Frame) -> Result<Frame> {
        Err(TintaError::UnsupportedPixelFormat("nope".into()))
    }
}

#[test]
fn test_custom_filter_failure_propagates() {
    let frame = mono_frame(&[1], 0);
    let chain = FilterChain::with_stages(vec![
        Arc::new(InvertColors) as Arc<dyn FrameFilter>,
        Arc::new(AlwaysFails),
    ]);
    assert!(matches!(
        chain.apply(&frame),
        Err(TintaError::UnsupportedPixelFormat(_))
    ));
}
