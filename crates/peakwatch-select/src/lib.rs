mod overlay;
mod selector;

pub use overlay::{OverlaySurface, PreviewRect};
pub use selector::{AreaSelector, SelectionState};
