//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured game events to the `log`
//! facade (serial console on the prop, stderr in the simulator). A radio
//! link to a referee tablet would implement the same trait.

use log::{info, warn};

use crate::app::events::GameEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`GameEvent`] and counts them.
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events emitted since construction.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &GameEvent) {
        self.emitted = self.emitted.wrapping_add(1);
        match event {
            GameEvent::Armed { time_limit_secs } => {
                info!("DEFUSE | armed, limit={}s", time_limit_secs);
            }
            GameEvent::Defused { remaining_secs } => {
                info!("DEFUSE | defused, {}s left", remaining_secs);
            }
            GameEvent::Exploded => {
                info!("DEFUSE | exploded");
            }
            GameEvent::CodeRejected(reason) => {
                warn!("DEFUSE | code rejected: {:?}", reason);
            }
            GameEvent::MatchStarted { minutes } => {
                info!("DOM    | match started, {} min", minutes);
            }
            GameEvent::PointCaptured(team) => {
                info!("DOM    | point captured by {}", team);
            }
            GameEvent::MatchOver {
                winner,
                red_score,
                green_score,
            } => {
                info!(
                    "DOM    | match over, red={} green={} winner={}",
                    red_score, green_score, winner
                );
            }
            GameEvent::ModeSelected(kind) => {
                info!("MODE   | {}", kind);
            }
        }
    }
}
