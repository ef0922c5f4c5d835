//! Team capture buttons for domination mode.
//!
//! ## Hardware
//!
//! Two active-low momentary switches (red, green) with internal pull-ups.
//! The loop samples both every tick; a read error counts as "released" so
//! a flaky line can never hand a team the point.
//!
//! ## Edge markers
//!
//! Besides the raw hold snapshot, [`ButtonEdges`] turns level changes into
//! [`Key::TeamPress`] / [`Key::TeamRelease`] markers. Setup uses the press
//! markers to adjust the match length; running matches only look at holds.

use embedded_hal::digital::InputPin;
use heapless::Vec;
use log::warn;

use crate::app::input::Key;
use crate::game::Team;

/// Raw hold snapshot for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeamButtons {
    pub red: bool,
    pub green: bool,
}

impl TeamButtons {
    pub const RELEASED: Self = Self {
        red: false,
        green: false,
    };

    pub fn new(red: bool, green: bool) -> Self {
        Self { red, green }
    }
}

/// Level-change detector producing press/release markers.
#[derive(Debug, Default)]
pub struct ButtonEdges {
    last: TeamButtons,
}

impl ButtonEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare against the previous snapshot. Red changes are reported
    /// before green ones.
    pub fn update(&mut self, now: TeamButtons) -> Vec<Key, 2> {
        let mut keys = Vec::new();
        for (team, was, is) in [
            (Team::Red, self.last.red, now.red),
            (Team::Green, self.last.green, now.green),
        ] {
            let key = match (was, is) {
                (false, true) => Key::TeamPress(team),
                (true, false) => Key::TeamRelease(team),
                _ => continue,
            };
            // Two slots for two buttons.
            let _ = keys.push(key);
        }
        self.last = now;
        keys
    }

    /// Forget the previous snapshot, e.g. after a mode switch.
    pub fn reset(&mut self) {
        self.last = TeamButtons::RELEASED;
    }
}

/// GPIO-backed pair of team buttons.
pub struct PinButtons<R, G> {
    red: R,
    green: G,
}

impl<R: InputPin, G: InputPin> PinButtons<R, G> {
    pub fn new(red: R, green: G) -> Self {
        Self { red, green }
    }

    /// Read both lines. Low means held.
    pub fn sample(&mut self) -> TeamButtons {
        TeamButtons {
            red: read_held(&mut self.red, Team::Red),
            green: read_held(&mut self.green, Team::Green),
        }
    }
}

fn read_held(pin: &mut impl InputPin, team: Team) -> bool {
    match pin.is_low() {
        Ok(held) => held,
        Err(e) => {
            warn!("buttons: {} read failed: {:?}", team, e);
            false
        }
    }
}
