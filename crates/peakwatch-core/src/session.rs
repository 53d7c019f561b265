//! Monitoring session lifecycle.
//!
//! A session snapshots its threshold and area at start; the running flag is
//! the only field shared across the controller/worker boundary. The
//! controller writes it, the worker reads it once per cycle boundary.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use peakwatch_types::Rect;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("threshold must be a positive finite number")]
    InvalidThreshold,
    #[error("no selection rectangle available")]
    NoArea,
    #[error("a monitoring session is already active")]
    AlreadyRunning,
}

/// Loop states: Idle is both initial and terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    Alerted,
}

#[derive(Debug, Clone)]
pub struct MonitoringSession {
    threshold: f64,
    area: Rect,
    running: Arc<AtomicBool>,
}

impl MonitoringSession {
    /// Validates inputs before the session may enter `Running`.
    pub fn new(threshold: f64, area: Rect) -> Result<Self, SessionError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(SessionError::InvalidThreshold);
        }
        let area = area.normalized();
        if area.is_empty() {
            return Err(SessionError::NoArea);
        }
        Ok(Self {
            threshold,
            area,
            running: Arc::new(AtomicBool::new(true)),
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Read by the worker at each cycle boundary.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Written by the controlling side; honored at the next cycle boundary.
    pub fn request_stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_or_non_finite_thresholds() {
        let area = Rect::new(0, 0, 10, 10);
        assert_eq!(
            MonitoringSession::new(0.0, area).unwrap_err(),
            SessionError::InvalidThreshold
        );
        assert_eq!(
            MonitoringSession::new(-5.0, area).unwrap_err(),
            SessionError::InvalidThreshold
        );
        assert_eq!(
            MonitoringSession::new(f64::NAN, area).unwrap_err(),
            SessionError::InvalidThreshold
        );
        assert_eq!(
            MonitoringSession::new(f64::INFINITY, area).unwrap_err(),
            SessionError::InvalidThreshold
        );
    }

    #[test]
    fn rejects_empty_area() {
        assert_eq!(
            MonitoringSession::new(100.0, Rect::new(5, 5, 5, 20)).unwrap_err(),
            SessionError::NoArea
        );
    }

    #[test]
    fn area_is_normalized_at_start() {
        let session = MonitoringSession::new(100.0, Rect::new(50, 40, 10, 10)).unwrap();
        assert_eq!(session.area(), Rect::new(10, 10, 50, 40));
    }

    #[test]
    fn stop_request_is_visible_across_clones() {
        let session = MonitoringSession::new(100.0, Rect::new(0, 0, 10, 10)).unwrap();
        let worker_view = session.clone();
        assert!(worker_view.is_running());
        session.request_stop();
        assert!(!worker_view.is_running());
    }
}
