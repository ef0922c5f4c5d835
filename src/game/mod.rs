//! Game-mode controllers and their shared contract.
//!
//! Both controllers are pure polling state machines: the loop driver calls
//! [`GameMode::handle_key`] with at most one key per tick, forwards raw
//! button holds through [`GameMode::update_buttons`], then calls
//! [`GameMode::update`]. Nothing here sleeps except the explicit
//! presentation hold a defuse session ends with.
//!
//! ```text
//!  DEFUSE      WAITING_TO_ARM ──[arming code]──▶ ARMED
//!                    ▲                             │
//!                    ├───────[defuse code]─────────┤ (win, hold, reset)
//!                    └────────[timeout]────────────┘ (loss, hold, reset)
//!
//!  DOMINATION  SETUP ──[#]──▶ RUNNING ──[time up]──▶ GAME_OVER ──[#]──▶ SETUP
//! ```

pub mod defuse;
pub mod domination;

#[cfg(test)]
pub(crate) mod sim;

use core::fmt;

use crate::app::input::Key;
use crate::app::ports::Peripherals;
use crate::config::{GameConfig, GameModeKind};

pub use defuse::{DefuseController, DefuseState};
pub use domination::{DominationController, DominationState, TimeAdjust};

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// Point ownership. `Neutral` doubles as "nobody" for the capturing team
/// and as "draw" for a match result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Team {
    #[default]
    Neutral,
    Red,
    Green,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neutral => write!(f, "neutral"),
            Self::Red => write!(f, "red"),
            Self::Green => write!(f, "green"),
        }
    }
}

/// How a defuse session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Defused,
    Detonated,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// The contract every game mode implements.
pub trait GameMode {
    /// Which mode this is.
    fn kind(&self) -> GameModeKind;

    /// Reset and draw the first screen.
    fn init(&mut self, io: &mut impl Peripherals);

    /// Advance one tick.
    fn update(&mut self, io: &mut impl Peripherals);

    /// Consume one key event.
    fn handle_key(&mut self, key: Key, io: &mut impl Peripherals);

    /// Return to the initial state without touching any collaborator.
    fn reset(&mut self);

    /// Whether the session reached a terminal state that needs a restart.
    fn is_finished(&self) -> bool;

    /// Whether the controller sits in its initial state with no partial input.
    fn is_idle(&self) -> bool;

    /// Raw team-button holds sampled this tick. Only modes that use held
    /// buttons override this; the rest ignore it.
    fn update_buttons(&mut self, red: bool, green: bool, io: &mut impl Peripherals) {
        let _ = (red, green, io);
    }
}

// ---------------------------------------------------------------------------
// ActiveGame
// ---------------------------------------------------------------------------

/// The game currently loaded on the prop.
#[derive(Debug)]
pub enum ActiveGame {
    Defuse(DefuseController),
    Domination(DominationController),
}

impl ActiveGame {
    /// Build the controller for `kind` from the given configuration.
    pub fn build(kind: GameModeKind, config: &GameConfig) -> Self {
        match kind {
            GameModeKind::Defuse => Self::Defuse(DefuseController::from_config(config)),
            GameModeKind::Domination => {
                Self::Domination(DominationController::from_config(config))
            }
        }
    }

    /// Build the controller named by `config.mode`.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::build(config.mode, config)
    }

    pub fn as_defuse(&self) -> Option<&DefuseController> {
        match self {
            Self::Defuse(game) => Some(game),
            Self::Domination(_) => None,
        }
    }

    pub fn as_domination(&self) -> Option<&DominationController> {
        match self {
            Self::Domination(game) => Some(game),
            Self::Defuse(_) => None,
        }
    }
}

impl GameMode for ActiveGame {
    fn kind(&self) -> GameModeKind {
        match self {
            Self::Defuse(game) => game.kind(),
            Self::Domination(game) => game.kind(),
        }
    }

    fn init(&mut self, io: &mut impl Peripherals) {
        match self {
            Self::Defuse(game) => game.init(io),
            Self::Domination(game) => game.init(io),
        }
    }

    fn update(&mut self, io: &mut impl Peripherals) {
        match self {
            Self::Defuse(game) => game.update(io),
            Self::Domination(game) => game.update(io),
        }
    }

    fn handle_key(&mut self, key: Key, io: &mut impl Peripherals) {
        match self {
            Self::Defuse(game) => game.handle_key(key, io),
            Self::Domination(game) => game.handle_key(key, io),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Defuse(game) => game.reset(),
            Self::Domination(game) => game.reset(),
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            Self::Defuse(game) => game.is_finished(),
            Self::Domination(game) => game.is_finished(),
        }
    }

    fn is_idle(&self) -> bool {
        match self {
            Self::Defuse(game) => game.is_idle(),
            Self::Domination(game) => game.is_idle(),
        }
    }

    fn update_buttons(&mut self, red: bool, green: bool, io: &mut impl Peripherals) {
        match self {
            Self::Defuse(game) => game.update_buttons(red, green, io),
            Self::Domination(game) => game.update_buttons(red, green, io),
        }
    }
}
