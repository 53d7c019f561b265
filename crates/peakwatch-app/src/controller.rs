use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use peakwatch_capture::{FrameSource, Recognizer};
use peakwatch_config::Config;
use peakwatch_core::session::MonitoringSession;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::alert::AlertSink;
use crate::events::{WorkerEvent, event_loop};
use crate::worker::monitor_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub worker_to_app: (AsyncSender<WorkerEvent>, AsyncReceiver<WorkerEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            worker_to_app: kanal::bounded_async(64),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Wires the worker and the controlling event loop for one session.
pub struct AppController {
    channels: ChannelSet,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new() -> Self {
        Self {
            channels: ChannelSet::new(),
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks<S, R>(
        &self,
        session: MonitoringSession,
        config: Config,
        source: Arc<S>,
        recognizer: Arc<R>,
        sink: Arc<dyn AlertSink>,
    ) -> JoinSet<anyhow::Result<()>>
    where
        S: FrameSource + 'static,
        R: Recognizer + 'static,
    {
        let mut tasks = JoinSet::new();

        tasks.spawn(monitor_loop(
            session,
            config,
            source,
            recognizer,
            self.channels.worker_to_app.0.clone(),
        ));

        tasks.spawn(event_loop(
            self.channels.worker_to_app.1.clone(),
            sink,
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

impl Default for AppController {
    fn default() -> Self {
        Self::new()
    }
}
