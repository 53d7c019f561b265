use std::env;

use serde::{Deserialize, Serialize};

use self::debug::DebugConfig;
use self::ocr::OcrConfig;

pub mod debug;
pub mod ocr;

/// Minimum inter-cycle delay. Bounds resource usage of the monitoring loop.
pub const MIN_CYCLE_DELAY_MS: u64 = 1000;

#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    pub ocr: OcrConfig,
    pub debug: DebugConfig,

    /// Delay between monitoring cycles, clamped to [`MIN_CYCLE_DELAY_MS`].
    pub cycle_delay_ms: u64,
}

impl Config {
    pub fn new() -> Self {
        let cycle_delay_ms = env::var("PEAKWATCH_CYCLE_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(MIN_CYCLE_DELAY_MS)
            .max(MIN_CYCLE_DELAY_MS);

        Config {
            ocr: OcrConfig::new(),
            debug: DebugConfig::new(),
            cycle_delay_ms,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
