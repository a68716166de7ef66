use std::path::Path;

use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage};

use crate::error::{Result, TintaError};
use crate::frame::Frame;

/// Save a single frame as an 8-bit PNG (grayscale or RGB by channel count).
pub fn save_frame_png(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    match frame.channels() {
        1 => {
            let mut img = GrayImage::new(w as u32, h as u32);
            for row in 0..h {
                for col in 0..w {
                    img.put_pixel(col as u32, row as u32, Luma([frame.data[[row, col, 0]]]));
                }
            }
            img.save_with_format(path, ImageFormat::Png)?;
        }
        3 => {
            let mut img = RgbImage::new(w as u32, h as u32);
            for row in 0..h {
                for col in 0..w {
                    let px = Rgb([
                        frame.data[[row, col, 0]],
                        frame.data[[row, col, 1]],
                        frame.data[[row, col, 2]],
                    ]);
                    img.put_pixel(col as u32, row as u32, px);
                }
            }
            img.save_with_format(path, ImageFormat::Png)?;
        }
        other => {
            return Err(TintaError::UnsupportedPixelFormat(format!(
                "cannot export {other}-channel frame as PNG"
            )));
        }
    }

    Ok(())
}
