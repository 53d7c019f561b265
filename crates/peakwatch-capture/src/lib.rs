mod capture;
mod dump;
mod recognizer;

pub use capture::{CaptureError, FrameSource, ScreenSource, list_monitors, monitor_containing};
pub use dump::dump_cycle_images;
pub use recognizer::{Recognizer, TesseractRecognizer};
