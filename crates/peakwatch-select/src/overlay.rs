/// Display-local preview rectangle. Unnormalized while a drag is live; the
/// first corner is the translated anchor, the second the current pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// One full-screen, semi-transparent surface per display, rendering a
/// crosshair cursor, instructional text, and the selection preview.
///
/// The selector owns its overlays as scoped resources: `close` runs on
/// every exit path, so no stray surface outlives a selection.
pub trait OverlaySurface {
    /// Draw or update the selection outline on this display.
    fn draw_preview(&mut self, rect: PreviewRect);

    /// Remove any selection outline from this display.
    fn clear_preview(&mut self);

    /// Tear the surface down.
    fn close(&mut self);
}
