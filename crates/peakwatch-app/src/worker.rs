//! The monitoring worker: one dedicated task driving
//! capture -> preprocess -> recognize -> extract -> decide cycles.
//!
//! Pixel work runs inside `spawn_blocking`; the async side only sequences
//! cycles, delays, and the alert handshake. The session's running flag is
//! consulted once per cycle boundary, so cancellation latency is bounded
//! by one in-flight cycle plus the inter-cycle delay.

use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use peakwatch_capture::{CaptureError, FrameSource, Recognizer, dump_cycle_images};
use peakwatch_config::Config;
use peakwatch_core::session::{MonitoringSession, SessionState};
use peakwatch_core::{extract, preprocess};

use crate::events::{EndReason, WorkerEvent};

pub async fn monitor_loop<S, R>(
    session: MonitoringSession,
    config: Config,
    source: Arc<S>,
    recognizer: Arc<R>,
    events: AsyncSender<WorkerEvent>,
) -> anyhow::Result<()>
where
    S: FrameSource + 'static,
    R: Recognizer + 'static,
{
    // Immutable snapshots for the session's lifetime.
    let threshold = session.threshold();
    let area = session.area();
    let delay = Duration::from_millis(config.cycle_delay_ms);

    let mut state = SessionState::Running;

    loop {
        if !session.is_running() {
            state = SessionState::Idle;
            let _ = events.send(WorkerEvent::Ended(EndReason::Stopped)).await;
            break;
        }

        let source = Arc::clone(&source);
        let recognizer = Arc::clone(&recognizer);
        let whitelist = config.ocr.char_whitelist.clone();
        let dump = config.debug.dump_images;

        let cycle = tokio::task::spawn_blocking(move || -> Result<String, CaptureError> {
            let frame = source.capture(area)?;

            let processed = match preprocess::preprocess(&frame) {
                Ok(processed) => processed,
                Err(e) => {
                    tracing::warn!("preprocess failed, empty cycle: {e}");
                    return Ok(String::new());
                }
            };

            if dump && let Err(e) = dump_cycle_images(&frame, &processed) {
                tracing::warn!("debug dump failed: {e:#}");
            }

            match recognizer.recognize(&processed, &whitelist) {
                Ok(text) => Ok(text),
                Err(e) => {
                    tracing::warn!("recognition failed, empty cycle: {e:#}");
                    Ok(String::new())
                }
            }
        })
        .await?;

        let text = match cycle {
            Ok(text) => text,
            Err(e) => {
                // Geometry gone mid-session. Session-ending, not retried.
                session.request_stop();
                state = SessionState::Idle;
                let _ = events
                    .send(WorkerEvent::Ended(EndReason::CaptureFailed(e.to_string())))
                    .await;
                break;
            }
        };

        let reading = extract::extract(&text, config.ocr.reading_policy);

        if reading.value >= threshold {
            state = SessionState::Alerted;
            let (reply_tx, reply_rx) = kanal::bounded_async(1);
            events
                .send(WorkerEvent::Alert {
                    value: reading.value,
                    reply: reply_tx,
                })
                .await?;

            // Blocks until the controller answers; no capture meanwhile.
            match reply_rx.recv().await? {
                peakwatch_types::AlertDecision::Continue => {
                    state = SessionState::Running;
                }
                peakwatch_types::AlertDecision::Stop => {
                    session.request_stop();
                    state = SessionState::Idle;
                    let _ = events.send(WorkerEvent::Ended(EndReason::AlertStop)).await;
                    break;
                }
            }
        } else {
            events.send(WorkerEvent::Cycle(reading)).await?;
        }

        tokio::time::sleep(delay).await;
    }

    tracing::debug!(?state, "monitor loop ended");
    Ok(())
}
