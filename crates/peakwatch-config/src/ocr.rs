use std::env;

use peakwatch_types::ReadingPolicy;
use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "eng".to_string()
}

fn default_whitelist() -> String {
    // Digits plus '.' and ',' to suppress alphabetic misreads.
    "0123456789.,".to_string()
}

fn default_psm() -> i32 {
    // Assume a single uniform block of text.
    6
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_whitelist")]
    pub char_whitelist: String,
    #[serde(default = "default_psm")]
    pub psm: i32,
    pub reading_policy: ReadingPolicy,
}

impl OcrConfig {
    pub fn new() -> Self {
        let language = env::var("PEAKWATCH_OCR_LANG").unwrap_or_else(|_| default_language());

        let char_whitelist =
            env::var("PEAKWATCH_CHAR_WHITELIST").unwrap_or_else(|_| default_whitelist());

        let psm = env::var("PEAKWATCH_PSM")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_psm);

        let reading_policy = env::var("PEAKWATCH_READING_POLICY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self {
            language,
            char_whitelist,
            psm,
            reading_policy,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            char_whitelist: default_whitelist(),
            psm: default_psm(),
            reading_policy: ReadingPolicy::default(),
        }
    }
}
