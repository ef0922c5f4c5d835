//! Outbound game events.
//!
//! Controllers emit these through the [`EventSink`](super::ports::EventSink)
//! port. Adapters on the other side decide what to do with them: log to
//! serial, flash an LED, forward to a referee tablet.

use crate::config::GameModeKind;
use crate::game::Team;

/// Why a submitted code was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Fewer than four digits were entered.
    TooShort,
    /// Four digits entered, but not the expected code.
    Mismatch,
}

/// Structured events emitted by the game core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The bomb was armed and the countdown started.
    Armed { time_limit_secs: u32 },
    /// The armed bomb was defused in time (session win).
    Defused { remaining_secs: u32 },
    /// The countdown ran out (session loss).
    Exploded,
    /// A submitted code was refused.
    CodeRejected(RejectReason),
    /// A domination match started.
    MatchStarted { minutes: u32 },
    /// A team completed a capture and now owns the point.
    PointCaptured(Team),
    /// A domination match hit its time limit.
    MatchOver {
        winner: Team,
        red_score: u32,
        green_score: u32,
    },
    /// The runner switched game mode.
    ModeSelected(GameModeKind),
}
