use std::env;

use serde::{Deserialize, Serialize};

/// Fixed dump names; a debugging side channel, not a contract.
pub const RAW_DUMP_PATH: &str = "debug_original.png";
pub const PROCESSED_DUMP_PATH: &str = "debug_processed.png";

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DebugConfig {
    /// Persist raw and processed captures each cycle for offline inspection.
    pub dump_images: bool,
}

impl DebugConfig {
    pub fn new() -> Self {
        let dump_images = env::var("PEAKWATCH_DEBUG_DUMP")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Self { dump_images }
    }
}
