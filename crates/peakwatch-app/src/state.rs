use std::sync::Arc;

use peakwatch_config::Config;
use peakwatch_core::session::{MonitoringSession, SessionError};
use peakwatch_types::Rect;
use tokio::sync::{Mutex, RwLock};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    active_session: Mutex<Option<MonitoringSession>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            active_session: Mutex::new(None),
        }
    }

    /// Validates inputs and enforces the single-active-session invariant.
    pub async fn start_session(
        &self,
        threshold: f64,
        area: Rect,
    ) -> Result<MonitoringSession, SessionError> {
        let mut slot = self.active_session.lock().await;
        if let Some(existing) = slot.as_ref()
            && existing.is_running()
        {
            return Err(SessionError::AlreadyRunning);
        }

        let session = MonitoringSession::new(threshold, area)?;
        *slot = Some(session.clone());
        Ok(session)
    }

    /// User-initiated stop; honored by the worker at its next cycle boundary.
    pub async fn request_stop(&self) {
        if let Some(session) = self.active_session.lock().await.as_ref() {
            session.request_stop();
        }
    }
}
