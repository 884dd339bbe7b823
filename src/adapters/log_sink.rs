//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production).  Telemetry goes out at
//! debug level as one JSON object per tick.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => match serde_json::to_string(t) {
                Ok(json) => debug!("TELEM | {}", json),
                Err(e) => warn!("TELEM | encode failed: {}", e),
            },
            AppEvent::TierChanged { from, to } => {
                info!("TIER  | {} -> {}", from, to);
            }
            AppEvent::PowerCut { at } => {
                warn!("POWER | AC cut at {}", at);
            }
            AppEvent::PowerRestored => {
                info!("POWER | AC restored");
            }
            AppEvent::RestoreHeld { remaining } => {
                info!("POWER | restore held, cool-off {:.1}s left", remaining.as_secs_f32());
            }
            AppEvent::Started(tier) => {
                info!("START | initial_tier={}", tier);
            }
        }
    }
}
