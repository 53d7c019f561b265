use anyhow::{Context, Result};
use image::{GrayImage, RgbaImage};
use peakwatch_config::debug::{PROCESSED_DUMP_PATH, RAW_DUMP_PATH};
use peakwatch_core::frame::{CaptureFrame, ProcessedImage};

/// Persist the raw and processed images of one cycle under fixed names for
/// offline inspection. Debugging side channel only.
pub fn dump_cycle_images(frame: &CaptureFrame, processed: &ProcessedImage) -> Result<()> {
    let raw = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
        .context("capture frame buffer does not match its dimensions")?;
    raw.save(RAW_DUMP_PATH)
        .with_context(|| format!("failed to write {RAW_DUMP_PATH}"))?;

    let binary = GrayImage::from_raw(processed.width, processed.height, processed.data.clone())
        .context("processed image buffer does not match its dimensions")?;
    binary
        .save(PROCESSED_DUMP_PATH)
        .with_context(|| format!("failed to write {PROCESSED_DUMP_PATH}"))?;

    Ok(())
}
