//! Discrete key events delivered to the controllers.
//!
//! The keypad produces `0`–`9`, `*` and `#`. The loop driver adds synthetic
//! team markers when a domination button changes state: uppercase for a
//! press, lowercase for a release.

use crate::game::Team;

/// One debounced input event. At most one arrives per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Numeric key. Values above 9 are a caller bug and are ignored downstream.
    Digit(u8),
    /// `*`: clear the code buffer.
    Star,
    /// `#`: submit / start / restart.
    Hash,
    /// A team button went down.
    TeamPress(Team),
    /// A team button came up.
    TeamRelease(Team),
}

impl Key {
    /// Decode a keypad or marker character. Unknown characters yield `None`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c as u8 - b'0')),
            '*' => Some(Self::Star),
            '#' => Some(Self::Hash),
            'R' => Some(Self::TeamPress(Team::Red)),
            'G' => Some(Self::TeamPress(Team::Green)),
            'r' => Some(Self::TeamRelease(Team::Red)),
            'g' => Some(Self::TeamRelease(Team::Green)),
            _ => None,
        }
    }

    /// Inverse of [`from_char`](Self::from_char).
    pub fn to_char(self) -> Option<char> {
        match self {
            Self::Digit(d @ 0..=9) => Some((b'0' + d) as char),
            Self::Digit(_) | Self::TeamPress(Team::Neutral) | Self::TeamRelease(Team::Neutral) => {
                None
            }
            Self::Star => Some('*'),
            Self::Hash => Some('#'),
            Self::TeamPress(Team::Red) => Some('R'),
            Self::TeamPress(Team::Green) => Some('G'),
            Self::TeamRelease(Team::Red) => Some('r'),
            Self::TeamRelease(Team::Green) => Some('g'),
        }
    }
}
