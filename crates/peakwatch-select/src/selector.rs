//! Multi-display rectangle selection.
//!
//! Pointer events arrive in display-local coordinates together with the id
//! of the display that produced them; the selector translates them through
//! the display's origin into one global rectangle. Drags that wander onto
//! a different display's overlay are not tracked past the originating
//! display. Known limitation, kept on purpose.

use std::collections::HashMap;

use peakwatch_types::{MonitorDescriptor, Point, Rect};

use crate::overlay::{OverlaySurface, PreviewRect};

/// Live drag state. Replaced wholesale on each new press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    /// Press position in global coordinates.
    pub anchor: Point,
    /// Display that received the press; the only one whose events count.
    pub active: u32,
    /// Preview rectangles by display id, in that display's local space.
    pub preview: HashMap<u32, PreviewRect>,
}

pub struct AreaSelector<O: OverlaySurface> {
    displays: Vec<MonitorDescriptor>,
    overlays: HashMap<u32, O>,
    state: Option<SelectionState>,
    finished: bool,
}

impl<O: OverlaySurface> AreaSelector<O> {
    /// Opens one overlay per display via the factory.
    pub fn begin(
        displays: Vec<MonitorDescriptor>,
        mut open_overlay: impl FnMut(&MonitorDescriptor) -> O,
    ) -> Self {
        let overlays = displays.iter().map(|d| (d.id, open_overlay(d))).collect();
        tracing::debug!(displays = displays.len(), "area selection started");
        Self {
            displays,
            overlays,
            state: None,
            finished: false,
        }
    }

    fn descriptor(&self, display_id: u32) -> Option<MonitorDescriptor> {
        self.displays.iter().find(|d| d.id == display_id).copied()
    }

    /// Current preview on a display, if any.
    pub fn preview_on(&self, display_id: u32) -> Option<PreviewRect> {
        self.state
            .as_ref()
            .and_then(|s| s.preview.get(&display_id).copied())
    }

    pub fn on_pressed(&mut self, display_id: u32, local: Point) {
        if self.finished {
            return;
        }
        let Some(descriptor) = self.descriptor(display_id) else {
            return;
        };

        for overlay in self.overlays.values_mut() {
            overlay.clear_preview();
        }

        self.state = Some(SelectionState {
            anchor: descriptor.to_global(local),
            active: display_id,
            preview: HashMap::new(),
        });
    }

    pub fn on_dragged(&mut self, display_id: u32, local: Point) {
        if self.finished {
            return;
        }
        let Some(descriptor) = self.descriptor(display_id) else {
            return;
        };
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.active != display_id {
            return;
        }

        let local_anchor = descriptor.to_local(state.anchor);
        let rect = PreviewRect {
            x1: local_anchor.x,
            y1: local_anchor.y,
            x2: local.x,
            y2: local.y,
        };
        state.preview.insert(display_id, rect);
        if let Some(overlay) = self.overlays.get_mut(&display_id) {
            overlay.draw_preview(rect);
        }
    }

    /// Completes the selection when released on the active display;
    /// returns the normalized global rectangle and closes every overlay.
    pub fn on_released(&mut self, display_id: u32, local: Point) -> Option<Rect> {
        if self.finished {
            return None;
        }
        let descriptor = self.descriptor(display_id)?;
        let state = self.state.as_ref()?;
        if state.active != display_id {
            return None;
        }

        let end = descriptor.to_global(local);
        let rect = Rect::from_points(state.anchor, end).normalized();

        self.state = None;
        self.close_overlays();
        tracing::debug!(?rect, "area selection complete");
        Some(rect)
    }

    /// Aborts the selection (e.g. an escape signal); emits nothing.
    pub fn on_cancelled(&mut self) {
        if self.finished {
            return;
        }
        self.state = None;
        self.close_overlays();
        tracing::debug!("area selection cancelled");
    }

    fn close_overlays(&mut self) {
        for overlay in self.overlays.values_mut() {
            overlay.close();
        }
        self.overlays.clear();
        self.finished = true;
    }
}

impl<O: OverlaySurface> Drop for AreaSelector<O> {
    fn drop(&mut self) {
        if !self.finished {
            self.close_overlays();
        }
    }
}
