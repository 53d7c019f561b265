use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use peakwatch_types::{AlertDecision, NumericReading};
use tokio_util::sync::CancellationToken;

use crate::alert::AlertSink;

/// Worker -> controller messages. The worker owns no presentation state;
/// everything user-visible happens on the controller side.
#[derive(Clone)]
pub enum WorkerEvent {
    /// One completed below-threshold cycle.
    Cycle(NumericReading),
    /// Threshold crossed. The worker blocks until a decision arrives on
    /// `reply`; no new capture cycle is issued meanwhile.
    Alert {
        value: f64,
        reply: AsyncSender<AlertDecision>,
    },
    /// The loop terminated.
    Ended(EndReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndReason {
    /// External stop request honored at a cycle boundary.
    Stopped,
    /// The alert prompt was answered with Stop.
    AlertStop,
    /// Capture geometry became unavailable mid-session; not retried.
    CaptureFailed(String),
}

/// Controller's main loop: consumes worker events, writes the log, and
/// answers alert prompts.
pub async fn event_loop(
    events_rx: AsyncReceiver<WorkerEvent>,
    sink: Arc<dyn AlertSink>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = events_rx.recv() => event?,
        };

        match event {
            WorkerEvent::Cycle(reading) => {
                tracing::info!(value = reading.value, raw = ?reading.raw_text, "cycle");
            }
            WorkerEvent::Alert { value, reply } => {
                tracing::warn!(value, "threshold crossed");
                let sink = Arc::clone(&sink);
                let decision = tokio::task::spawn_blocking(move || sink.notify(value)).await?;
                tracing::info!(?decision, "alert answered");
                let _ = reply.send(decision).await;
            }
            WorkerEvent::Ended(reason) => {
                match &reason {
                    EndReason::CaptureFailed(err) => {
                        tracing::error!(error = %err, "monitoring ended: capture failed");
                    }
                    _ => tracing::info!(?reason, "monitoring ended"),
                }
                break;
            }
        }
    }

    Ok(())
}
