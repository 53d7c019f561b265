use peakwatch_core::frame::CaptureFrame;
use peakwatch_types::{MonitorDescriptor, Rect};
use thiserror::Error;
use xcap::Monitor;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("selection rectangle is empty")]
    EmptyRegion,
    #[error("no display fully contains the requested rectangle")]
    OutOfBounds,
    #[error("display backend error: {0}")]
    Backend(#[from] xcap::XCapError),
}

/// Produces one snapshot per call, addressing the virtual desktop by
/// global coordinates.
pub trait FrameSource: Send + Sync {
    fn capture(&self, area: Rect) -> Result<CaptureFrame, CaptureError>;
}

/// Enumerate all displays as descriptors in the global coordinate space.
pub fn list_monitors() -> Result<Vec<MonitorDescriptor>, CaptureError> {
    let monitors = Monitor::all()?;
    Ok(monitors.iter().map(descriptor_of).collect())
}

fn descriptor_of(monitor: &Monitor) -> MonitorDescriptor {
    MonitorDescriptor {
        id: monitor.id(),
        x: monitor.x(),
        y: monitor.y(),
        width: monitor.width(),
        height: monitor.height(),
        is_primary: monitor.is_primary(),
    }
}

/// Index of the display that fully contains the rect, if any. Selections
/// never span displays, so partial containment is not a match.
pub fn monitor_containing(monitors: &[MonitorDescriptor], rect: &Rect) -> Option<usize> {
    monitors.iter().position(|m| m.contains_rect(rect))
}

/// Live screen capture via xcap.
pub struct ScreenSource;

impl FrameSource for ScreenSource {
    fn capture(&self, area: Rect) -> Result<CaptureFrame, CaptureError> {
        let area = area.normalized();
        if area.is_empty() {
            return Err(CaptureError::EmptyRegion);
        }

        let monitors = Monitor::all()?;
        let descriptors: Vec<MonitorDescriptor> = monitors.iter().map(descriptor_of).collect();

        // A display disconnected after selection surfaces here.
        let index = monitor_containing(&descriptors, &area).ok_or(CaptureError::OutOfBounds)?;
        let monitor = &monitors[index];

        let image = monitor.capture_image()?;
        let cropped = xcap::image::imageops::crop_imm(
            &image,
            (area.x1 - monitor.x()) as u32,
            (area.y1 - monitor.y()) as u32,
            area.width(),
            area.height(),
        )
        .to_image();

        tracing::trace!(
            display = monitor.id(),
            width = cropped.width(),
            height = cropped.height(),
            "captured region"
        );

        Ok(CaptureFrame::new(
            cropped.width(),
            cropped.height(),
            cropped.into_raw(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dual_head() -> Vec<MonitorDescriptor> {
        vec![
            MonitorDescriptor {
                id: 1,
                x: 0,
                y: 0,
                width: 1920,
                height: 1080,
                is_primary: true,
            },
            MonitorDescriptor {
                id: 2,
                x: 1920,
                y: -120,
                width: 2560,
                height: 1440,
                is_primary: false,
            },
        ]
    }

    #[test]
    fn finds_the_containing_display() {
        let monitors = dual_head();
        assert_eq!(
            monitor_containing(&monitors, &Rect::new(100, 100, 400, 300)),
            Some(0)
        );
        assert_eq!(
            monitor_containing(&monitors, &Rect::new(2000, 0, 2400, 600)),
            Some(1)
        );
    }

    #[test]
    fn rect_outside_all_displays_has_no_match() {
        let monitors = dual_head();
        assert_eq!(
            monitor_containing(&monitors, &Rect::new(5000, 5000, 5100, 5100)),
            None
        );
    }

    #[test]
    fn rect_straddling_two_displays_has_no_match() {
        let monitors = dual_head();
        assert_eq!(
            monitor_containing(&monitors, &Rect::new(1800, 100, 2100, 300)),
            None
        );
    }

    #[test]
    fn unnormalized_rect_still_matches() {
        let monitors = dual_head();
        assert_eq!(
            monitor_containing(&monitors, &Rect::new(400, 300, 100, 100)),
            Some(0)
        );
    }
}
