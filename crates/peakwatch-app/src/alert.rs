use std::io::{self, BufRead, Write};

use peakwatch_types::AlertDecision;

/// Blocking alert delivery: an audible cue plus a binary continue/stop
/// question, answered synchronously to the caller.
pub trait AlertSink: Send + Sync {
    fn notify(&self, value: f64) -> AlertDecision;
}

/// Terminal implementation: BEL for the audible cue, stdin for the answer.
/// Anything but an explicit yes stops monitoring.
pub struct TerminalAlert;

impl AlertSink for TerminalAlert {
    fn notify(&self, value: f64) -> AlertDecision {
        print!("\x07");
        println!("ALERT: reading {value} is at or above the threshold.");
        print!("Continue monitoring? [y/N] ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return AlertDecision::Stop;
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => AlertDecision::Continue,
            _ => AlertDecision::Stop,
        }
    }
}
