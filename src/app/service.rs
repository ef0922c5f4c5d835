//! Game runner, the loop driver at the centre of the hexagon.
//!
//! [`GameRunner`] owns the active controller and the live configuration.
//! It exposes a hardware-agnostic per-tick API. All I/O flows through port
//! traits injected at call sites, so the whole loop is testable with a
//! simulated clock.
//!
//! ```text
//!  keypad / buttons ──▶ ┌────────────────────────┐ ──▶ Display · Sound
//!                       │       GameRunner        │
//!      AppCommand ────▶ │  Defuse | Domination    │ ──▶ EventSink
//!                       └────────────────────────┘ ──▶ ConfigPort
//! ```

use log::{debug, info, warn};

use crate::config::{GameConfig, GameModeKind};
use crate::drivers::team_buttons::{ButtonEdges, TeamButtons};
use crate::game::{ActiveGame, GameMode};

use super::commands::AppCommand;
use super::events::GameEvent;
use super::input::Key;
use super::ports::{ConfigPort, Peripherals, Screen, SoundEffect};

/// Unsaved changes are flushed after this much loop time.
const AUTO_SAVE_DELAY_MS: u64 = 5000;

// ───────────────────────────────────────────────────────────────
// GameRunner
// ───────────────────────────────────────────────────────────────

/// Drives one game mode at a time from the polling loop.
pub struct GameRunner {
    game: ActiveGame,
    config: GameConfig,
    edges: ButtonEdges,
    tick_count: u64,
    config_dirty: bool,
    dirty_since_tick: u64,
    save_requested: bool,
    /// A config update is waiting for the current session to go idle.
    pending_rebuild: bool,
}

impl GameRunner {
    /// Build the runner with the controller named by `config.mode`.
    ///
    /// Nothing is drawn until [`start`](Self::start) is called.
    pub fn new(config: GameConfig) -> Self {
        let game = ActiveGame::from_config(&config);
        Self {
            game,
            config,
            edges: ButtonEdges::new(),
            tick_count: 0,
            config_dirty: false,
            dirty_since_tick: 0,
            save_requested: false,
            pending_rebuild: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Boot sequence: startup jingle, splash, mode banner, first screen.
    pub fn start(&mut self, io: &mut impl Peripherals) {
        io.play(SoundEffect::Startup);
        io.show(&Screen::Welcome);
        io.show(&Screen::ModeBanner(self.game.kind()));
        self.game.init(io);
        info!("GameRunner started in {} mode", self.game.kind());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one loop iteration: keypad key, team buttons, controller update.
    ///
    /// Team buttons are only consulted in domination mode. Their level
    /// changes are forwarded as press/release markers before the hold
    /// snapshot.
    pub fn tick(&mut self, key: Option<Key>, buttons: TeamButtons, io: &mut impl Peripherals) {
        self.tick_count += 1;

        if let Some(key) = key {
            if matches!(key, Key::Digit(_) | Key::Star | Key::Hash) {
                io.play(SoundEffect::Beep);
            }
            debug!("key {:?}", key);
            self.game.handle_key(key, io);
        }

        if self.game.kind() == GameModeKind::Domination {
            for marker in self.edges.update(buttons) {
                self.game.handle_key(marker, io);
            }
            self.game.update_buttons(buttons.red, buttons.green, io);
        }

        self.game.update(io);

        if self.pending_rebuild && self.game.is_idle() {
            self.rebuild(io);
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an operator command (mode switch, settings menu, console).
    pub fn handle_command(&mut self, cmd: AppCommand, io: &mut impl Peripherals) {
        match cmd {
            AppCommand::SelectMode(kind) => {
                info!("Switching to {} mode", kind);
                self.config.mode = kind;
                self.game = ActiveGame::build(kind, &self.config);
                self.edges.reset();
                self.pending_rebuild = false;
                io.emit(&GameEvent::ModeSelected(kind));
                io.show(&Screen::ModeBanner(kind));
                self.game.init(io);
                self.mark_config_dirty();
            }
            AppCommand::UpdateConfig(new_config) => {
                if let Err(e) = new_config.validate() {
                    warn!("Rejected config update: {}", e);
                    io.play(SoundEffect::Error);
                    return;
                }
                let mode_changed = new_config.mode != self.config.mode;
                self.config = new_config;
                self.mark_config_dirty();
                if mode_changed {
                    self.handle_command(AppCommand::SelectMode(self.config.mode), io);
                } else {
                    self.pending_rebuild = true;
                    info!("Configuration updated, applies from the next session");
                }
            }
            AppCommand::SaveConfig => {
                self.save_requested = true;
                info!("Explicit config save requested");
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// The controller currently loaded.
    pub fn game(&self) -> &ActiveGame {
        &self.game
    }

    /// Live configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Loop iterations executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Whether the config has unsaved changes.
    pub fn is_config_dirty(&self) -> bool {
        self.config_dirty
    }

    // ── Internal ──────────────────────────────────────────────

    /// Swap in a controller built from the current config. Only called
    /// while the old one is idle, so no session is lost.
    fn rebuild(&mut self, io: &mut impl Peripherals) {
        self.pending_rebuild = false;
        self.game = ActiveGame::build(self.config.mode, &self.config);
        self.game.init(io);
        debug!("Controller rebuilt from updated config");
    }

    // ── Config dirty-flag management ──────────────────────────

    fn mark_config_dirty(&mut self) {
        if !self.config_dirty {
            self.config_dirty = true;
            self.dirty_since_tick = self.tick_count;
        }
    }

    /// Save when explicitly requested, or once the config has been dirty
    /// for [`AUTO_SAVE_DELAY_MS`] of loop time. Returns `true` on a save.
    pub fn persist_if_needed(&mut self, storage: &mut impl ConfigPort) -> bool {
        if !self.save_requested {
            if !self.config_dirty {
                return false;
            }
            let ticks = self.tick_count.saturating_sub(self.dirty_since_tick);
            if ticks * u64::from(self.config.loop_interval_ms) < AUTO_SAVE_DELAY_MS {
                return false;
            }
        }
        self.save_requested = false;
        match storage.save(&self.config) {
            Ok(()) => {
                self.config_dirty = false;
                info!("Config saved");
                true
            }
            Err(e) => {
                warn!("Config save failed: {}", e);
                false
            }
        }
    }
}
