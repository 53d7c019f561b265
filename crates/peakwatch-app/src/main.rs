use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::Parser;
use peakwatch_capture::{FrameSource, Recognizer, ScreenSource, TesseractRecognizer};
use peakwatch_config::Config;
use peakwatch_core::{extract, preprocess};
use peakwatch_types::Rect;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod alert;
mod controller;
mod events;
mod state;
mod worker;


use self::alert::TerminalAlert;
use self::controller::AppController;
use self::state::AppState;

/// Watch a screen region, OCR the number displayed there, and alert when
/// it crosses a threshold.
#[derive(Parser)]
#[command(name = "peakwatch", version)]
struct Args {
    /// Alert when the reading is at or above this value.
    #[arg(long)]
    threshold: Option<f64>,

    /// Monitoring area in global coordinates: x1,y1,x2,y2.
    #[arg(long)]
    area: Option<String>,

    /// Print available displays and exit.
    #[arg(long)]
    list_monitors: bool,

    /// Run a single capture cycle, print the reading, and exit.
    #[arg(long)]
    once: bool,
}

fn parse_area(spec: &str) -> anyhow::Result<Rect> {
    let parts: Vec<i32> = spec
        .split(',')
        .map(|p| p.trim().parse::<i32>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("invalid area '{spec}'"))?;
    let [x1, y1, x2, y2] = parts[..] else {
        return Err(anyhow!("area must be four coordinates: x1,y1,x2,y2"));
    };
    Ok(Rect::new(x1, y1, x2, y2))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.list_monitors {
        for m in peakwatch_capture::list_monitors()? {
            println!(
                "display {}: {}x{} at ({}, {}){}",
                m.id,
                m.width,
                m.height,
                m.x,
                m.y,
                if m.is_primary { " [primary]" } else { "" }
            );
        }
        return Ok(());
    }

    let config = Config::new();
    let area = args
        .area
        .as_deref()
        .map(parse_area)
        .transpose()?
        .ok_or_else(|| anyhow!("no selection rectangle available; pass --area x1,y1,x2,y2"))?;

    let source = Arc::new(ScreenSource);
    let recognizer = Arc::new(TesseractRecognizer::new(
        &config.ocr.language,
        config.ocr.psm,
    ));

    if args.once {
        let reading = calibration_cycle(&config, source.as_ref(), recognizer.as_ref(), area)?;
        println!("raw: {:?}", reading.raw_text);
        println!("value: {}", reading.value);
        return Ok(());
    }

    let threshold = args
        .threshold
        .ok_or_else(|| anyhow!("--threshold is required"))?;

    let state = Arc::new(AppState::new(config.clone()));
    let session = state.start_session(threshold, area).await?;
    tracing::info!(threshold, ?area, "monitoring started");

    let controller = AppController::new();
    let mut tasks = controller.spawn_tasks(
        session.clone(),
        config,
        source,
        recognizer,
        Arc::new(TerminalAlert),
    );

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("stop requested");
            state.request_stop().await;
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(e))) => tracing::error!("task exited: {e:#}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
            session.request_stop();
        }
    }

    controller.shutdown();
    while tasks.join_next().await.is_some() {}

    Ok(())
}

/// One synchronous capture/recognize pass, for region calibration.
fn calibration_cycle(
    config: &Config,
    source: &dyn FrameSource,
    recognizer: &dyn Recognizer,
    area: Rect,
) -> anyhow::Result<peakwatch_types::NumericReading> {
    let frame = source.capture(area)?;
    let processed = preprocess::preprocess(&frame)?;
    if config.debug.dump_images {
        peakwatch_capture::dump_cycle_images(&frame, &processed)?;
    }
    let text = recognizer
        .recognize(&processed, &config.ocr.char_whitelist)
        .unwrap_or_else(|e| {
            tracing::warn!("recognition failed, empty reading: {e:#}");
            String::new()
        });
    Ok(extract::extract(&text, config.ocr.reading_policy))
}
