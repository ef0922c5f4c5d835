//! Simulated peripherals for controller unit tests.

use crate::app::events::GameEvent;
use crate::app::ports::{Clock, Display, EventSink, Screen, Sound, SoundEffect};

/// Records every collaborator call; `hold` advances simulated time.
#[derive(Debug, Default)]
pub(crate) struct SimIo {
    pub now: u32,
    pub holds: u32,
    pub sounds: Vec<SoundEffect>,
    pub screens: Vec<Screen>,
    pub events: Vec<GameEvent>,
}

impl SimIo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: u32) {
        self.now = self.now.wrapping_add(ms);
    }

    pub fn count_sound(&self, effect: SoundEffect) -> usize {
        self.sounds.iter().filter(|s| **s == effect).count()
    }

    pub fn last_sound(&self) -> Option<SoundEffect> {
        self.sounds.last().copied()
    }
}

impl Clock for SimIo {
    fn now_ms(&self) -> u32 {
        self.now
    }

    fn hold(&mut self, ms: u32) {
        self.holds += 1;
        self.advance(ms);
    }
}

impl Display for SimIo {
    fn show(&mut self, screen: &Screen) {
        self.screens.push(screen.clone());
    }
}

impl Sound for SimIo {
    fn play(&mut self, effect: SoundEffect) {
        self.sounds.push(effect);
    }
}

impl EventSink for SimIo {
    fn emit(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
