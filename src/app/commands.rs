//! Inbound commands to the game runner.
//!
//! These represent operator actions from outside the play loop (mode
//! switch, settings menu, referee tablet) that the
//! [`GameRunner`](super::service::GameRunner) interprets and acts upon.

use crate::config::{GameConfig, GameModeKind};

/// Commands that external adapters can send into the game core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Switch to another game mode, abandoning the current session.
    SelectMode(GameModeKind),

    /// Replace the live configuration. Takes effect from the next session.
    UpdateConfig(GameConfig),

    /// Persist the current configuration through the settings store.
    SaveConfig,
}
