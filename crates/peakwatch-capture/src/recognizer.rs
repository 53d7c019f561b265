use std::collections::HashMap;

use anyhow::{Context, Result};
use image::{DynamicImage, GrayImage};
use peakwatch_core::frame::ProcessedImage;
use rusty_tesseract::{Args, Image};

/// Text-from-image collaborator. The whitelist restricts output to the
/// given characters to suppress spurious alphabetic misreads.
pub trait Recognizer: Send + Sync {
    /// Failures are per-cycle recoverable; callers treat them as empty text.
    fn recognize(&self, image: &ProcessedImage, whitelist: &str) -> Result<String>;
}

/// Recognizer backed by the tesseract CLI.
pub struct TesseractRecognizer {
    language: String,
    psm: i32,
}

impl TesseractRecognizer {
    pub fn new(language: &str, psm: i32) -> Self {
        Self {
            language: language.to_string(),
            psm,
        }
    }
}

impl Recognizer for TesseractRecognizer {
    fn recognize(&self, image: &ProcessedImage, whitelist: &str) -> Result<String> {
        let gray = GrayImage::from_raw(image.width, image.height, image.data.clone())
            .context("processed image buffer does not match its dimensions")?;

        let input = Image::from_dynamic_image(&DynamicImage::ImageLuma8(gray))
            .context("failed to prepare image for tesseract")?;

        let args = Args {
            lang: self.language.clone(),
            config_variables: HashMap::from([(
                "tessedit_char_whitelist".to_string(),
                whitelist.to_string(),
            )]),
            dpi: Some(150),
            psm: Some(self.psm),
            oem: Some(3),
        };

        let text =
            rusty_tesseract::image_to_string(&input, &args).context("tesseract invocation failed")?;

        tracing::trace!(chars = text.len(), "recognizer output");
        Ok(text)
    }
}
