//! Mock peripherals for integration tests.
//!
//! Records every display, sound and event call so tests can assert on the
//! full history. The clock is simulated: `hold` advances it instantly.

use airsoft_prop::app::events::GameEvent;
use airsoft_prop::app::ports::{
    Clock, ConfigError, ConfigPort, Display, EventSink, Screen, Sound, SoundEffect, StorageError,
    StoragePort,
};
use airsoft_prop::config::GameConfig;

// ── MockPeripherals ───────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MockPeripherals {
    pub now: u32,
    pub holds: Vec<u32>,
    pub screens: Vec<Screen>,
    pub sounds: Vec<SoundEffect>,
    pub events: Vec<GameEvent>,
}

#[allow(dead_code)]
impl MockPeripherals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(now: u32) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    pub fn advance(&mut self, ms: u32) {
        self.now = self.now.wrapping_add(ms);
    }

    pub fn last_screen(&self) -> Option<&Screen> {
        self.screens.last()
    }

    pub fn count_sound(&self, effect: SoundEffect) -> usize {
        self.sounds.iter().filter(|s| **s == effect).count()
    }

    pub fn count_event(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn clear_history(&mut self) {
        self.screens.clear();
        self.sounds.clear();
        self.events.clear();
    }
}

impl Clock for MockPeripherals {
    fn now_ms(&self) -> u32 {
        self.now
    }

    fn hold(&mut self, ms: u32) {
        self.holds.push(ms);
        self.advance(ms);
    }
}

impl Display for MockPeripherals {
    fn show(&mut self, screen: &Screen) {
        self.screens.push(screen.clone());
    }
}

impl Sound for MockPeripherals {
    fn play(&mut self, effect: SoundEffect) {
        self.sounds.push(effect);
    }
}

impl EventSink for MockPeripherals {
    fn emit(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

// ── Config stores ─────────────────────────────────────────────

/// Remembers every saved config.
#[derive(Debug, Default)]
pub struct RecordingConfigStore {
    pub saved: Vec<GameConfig>,
}

impl ConfigPort for RecordingConfigStore {
    fn load(&self) -> Result<GameConfig, ConfigError> {
        Ok(self.saved.last().cloned().unwrap_or_default())
    }

    fn save(&mut self, config: &GameConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.saved.push(config.clone());
        Ok(())
    }
}

/// Storage whose writes always fail with `Full`.
#[derive(Debug, Default)]
pub struct FullStorage;

impl StoragePort for FullStorage {
    fn read(&self, _ns: &str, _key: &str, _buf: &mut [u8]) -> Result<usize, StorageError> {
        Err(StorageError::NotFound)
    }

    fn write(&mut self, _ns: &str, _key: &str, _data: &[u8]) -> Result<(), StorageError> {
        Err(StorageError::Full)
    }

    fn delete(&mut self, _ns: &str, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn exists(&self, _ns: &str, _key: &str) -> bool {
        false
    }
}
