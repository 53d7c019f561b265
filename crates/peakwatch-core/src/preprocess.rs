//! Normalizes a raw capture into a form the recognizer handles well:
//! grayscale, upscaled so text lands around 100 px tall, then binarized
//! with an automatic global threshold.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use thiserror::Error;

use crate::frame::{CaptureFrame, ProcessedImage};

/// Text height the recognizer handles best.
pub const TARGET_TEXT_HEIGHT: f32 = 100.0;

/// Lower bound on magnification. Keeps edges crisp for captures that are
/// already near the target height.
pub const MIN_SCALE: f32 = 2.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreprocessError {
    #[error("capture frame has zero width or height")]
    EmptyFrame,
    #[error("pixel buffer length does not match frame dimensions")]
    MalformedBuffer,
}

/// Scale factor applied to a source image of the given pixel height.
pub fn scale_for_height(height: u32) -> f32 {
    (TARGET_TEXT_HEIGHT / height as f32).max(MIN_SCALE)
}

/// Pure and deterministic: identical frames produce bit-identical output.
pub fn preprocess(frame: &CaptureFrame) -> Result<ProcessedImage, PreprocessError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(PreprocessError::EmptyFrame);
    }

    let rgba = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
        .ok_or(PreprocessError::MalformedBuffer)?;
    let gray = DynamicImage::ImageRgba8(rgba).to_luma8();

    let scale = scale_for_height(gray.height());
    let new_width = (gray.width() as f32 * scale).round() as u32;
    let new_height = (gray.height() as f32 * scale).round() as u32;
    let resized = imageops::resize(&gray, new_width, new_height, FilterType::CatmullRom);

    let threshold = otsu_level(resized.as_raw());
    let data = resized
        .as_raw()
        .iter()
        .map(|&p| if p > threshold { 255 } else { 0 })
        .collect();

    Ok(ProcessedImage {
        width: new_width,
        height: new_height,
        data,
    })
}

/// Global threshold maximizing between-class variance of the intensity
/// histogram (Otsu's method).
fn otsu_level(pixels: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &p in pixels {
        histogram[p as usize] += 1;
    }

    let total = pixels.len() as f64;
    let weighted_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum();

    let mut sum_background = 0.0;
    let mut weight_background = 0.0;
    let mut best_variance = 0.0;
    let mut level = 0u8;

    for t in 0..256 {
        weight_background += histogram[t] as f64;
        if weight_background == 0.0 {
            continue;
        }
        let weight_foreground = total - weight_background;
        if weight_foreground == 0.0 {
            break;
        }
        sum_background += t as f64 * histogram[t] as f64;

        let mean_background = sum_background / weight_background;
        let mean_foreground = (weighted_sum - sum_background) / weight_foreground;
        let diff = mean_background - mean_foreground;
        let variance = weight_background * weight_foreground * diff * diff;

        if variance > best_variance {
            best_variance = variance;
            level = t as u8;
        }
    }

    level
}

#[cfg(test)]
mod tests {
    use super::*;

    /// White background with a black block in the middle, RGBA.
    fn test_frame(width: u32, height: u32) -> CaptureFrame {
        let mut data = vec![255u8; (width * height * 4) as usize];
        for y in height / 4..height / 2 {
            for x in width / 4..width / 2 {
                let i = ((y * width + x) * 4) as usize;
                data[i] = 0;
                data[i + 1] = 0;
                data[i + 2] = 0;
            }
        }
        CaptureFrame::new(width, height, data)
    }

    #[test]
    fn scale_is_at_least_two() {
        assert_eq!(scale_for_height(100), 2.0);
        assert_eq!(scale_for_height(80), 2.0);
        assert_eq!(scale_for_height(50), 2.0);
        assert_eq!(scale_for_height(25), 4.0);
        assert_eq!(scale_for_height(10), 10.0);
    }

    #[test]
    fn output_dimensions_follow_scale() {
        let frame = test_frame(300, 100);
        let processed = preprocess(&frame).unwrap();
        // height 100 -> scale 2.0
        assert_eq!(processed.width, 600);
        assert_eq!(processed.height, 200);

        let frame = test_frame(120, 40);
        let processed = preprocess(&frame).unwrap();
        // height 40 -> scale 2.5
        assert_eq!(processed.width, 300);
        assert_eq!(processed.height, 100);
    }

    #[test]
    fn output_is_single_channel_binary() {
        let frame = test_frame(64, 32);
        let processed = preprocess(&frame).unwrap();
        assert_eq!(
            processed.data.len(),
            (processed.width * processed.height) as usize
        );

        let mut values: Vec<u8> = processed.data.clone();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values, vec![0, 255]);
    }

    #[test]
    fn preprocess_is_deterministic() {
        let frame = test_frame(90, 45);
        let first = preprocess(&frame).unwrap();
        let second = preprocess(&frame).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_frame_is_rejected() {
        let frame = CaptureFrame::new(0, 10, vec![]);
        assert_eq!(preprocess(&frame), Err(PreprocessError::EmptyFrame));
    }

    #[test]
    fn malformed_buffer_is_rejected() {
        let frame = CaptureFrame::new(10, 10, vec![0u8; 7]);
        assert_eq!(preprocess(&frame), Err(PreprocessError::MalformedBuffer));
    }

    #[test]
    fn otsu_separates_bimodal_distribution() {
        let mut pixels = vec![10u8; 500];
        pixels.extend(vec![200u8; 500]);
        let level = otsu_level(&pixels);
        assert!(level >= 10 && level < 200, "level was {level}");
    }
}
