//! Host peripheral bundle.
//!
//! The controllers take a single `&mut impl Peripherals`. [`HostPeripherals`]
//! groups one adapter per port and forwards each trait to its member, the
//! same way the prop wires its display, speaker and serial log together.

use crate::app::events::GameEvent;
use crate::app::ports::{Clock, Display, EventSink, Screen, Sound, SoundEffect};

use super::console::{ConsoleDisplay, ConsoleSound};
use super::log_sink::LogEventSink;
use super::time::SystemClock;

pub struct HostPeripherals<C = SystemClock, D = ConsoleDisplay, S = ConsoleSound, E = LogEventSink> {
    pub clock: C,
    pub display: D,
    pub sound: S,
    pub events: E,
}

impl HostPeripherals {
    /// Real clock, terminal output, logged events.
    pub fn console(verbose_sound: bool) -> Self {
        Self {
            clock: SystemClock::new(),
            display: ConsoleDisplay::new(),
            sound: ConsoleSound::new(verbose_sound),
            events: LogEventSink::new(),
        }
    }
}

impl<C: Clock, D, S, E> Clock for HostPeripherals<C, D, S, E> {
    fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }

    fn hold(&mut self, ms: u32) {
        self.clock.hold(ms);
    }
}

impl<C, D: Display, S, E> Display for HostPeripherals<C, D, S, E> {
    fn show(&mut self, screen: &Screen) {
        self.display.show(screen);
    }
}

impl<C, D, S: Sound, E> Sound for HostPeripherals<C, D, S, E> {
    fn play(&mut self, effect: SoundEffect) {
        self.sound.play(effect);
    }
}

impl<C, D, S, E: EventSink> EventSink for HostPeripherals<C, D, S, E> {
    fn emit(&mut self, event: &GameEvent) {
        self.events.emit(event);
    }
}
