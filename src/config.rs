//! Game configuration parameters
//!
//! All tunable parameters for the prop: which game mode boots, countdown
//! and match durations, and the two defuse-mode codes.
//! Values can be overridden through the settings store or a JSON file
//! handed to the simulator.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::error::CodeError;

/// Number of digits in an arming or defuse code.
pub const CODE_LEN: usize = 4;

/// Default defuse countdown (seconds).
pub const DEFAULT_DEFUSE_TIME_SECS: u32 = 300;
/// Accepted defuse countdown range (seconds).
pub const DEFUSE_TIME_RANGE_SECS: core::ops::RangeInclusive<u32> = 5..=3600;

/// Default domination match length (minutes).
pub const DEFAULT_DOMINATION_MINUTES: u32 = 1;
/// Accepted stored domination match length (minutes).
pub const DOMINATION_MINUTES_RANGE: core::ops::RangeInclusive<u32> = 1..=60;
/// Step applied by each setup-time adjustment (minutes).
pub const DOMINATION_STEP_MINUTES: u32 = 5;
/// Floor applied by setup-time adjustments (minutes).
pub const DOMINATION_MIN_MINUTES: u32 = 5;
/// Ceiling applied by setup-time adjustments (minutes).
pub const DOMINATION_MAX_MINUTES: u32 = 60;

/// Hold time needed to flip point ownership (milliseconds).
pub const CAPTURE_DURATION_MS: u32 = 1000;

/// Fixed presentation hold after a defuse session ends (milliseconds).
pub const TERMINAL_HOLD_MS: u32 = 5000;

// ---------------------------------------------------------------------------
// Game mode
// ---------------------------------------------------------------------------

/// Which game the prop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameModeKind {
    /// Arm the bomb with a code, defuse it before the countdown expires.
    #[default]
    Defuse,
    /// Two teams contest a capture point for the length of a match.
    Domination,
}

impl fmt::Display for GameModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defuse => write!(f, "defuse"),
            Self::Domination => write!(f, "domination"),
        }
    }
}

// ---------------------------------------------------------------------------
// Code
// ---------------------------------------------------------------------------

/// A fixed-length numeric code, every element in `0..=9`.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u8; 4]", into = "[u8; 4]")]
pub struct Code([u8; CODE_LEN]);

impl Code {
    /// Build a code from raw digits, rejecting anything above 9.
    pub fn new(digits: [u8; CODE_LEN]) -> Result<Self, CodeError> {
        if let Some(&bad) = digits.iter().find(|&&d| d > 9) {
            return Err(CodeError::DigitOutOfRange(bad));
        }
        Ok(Self(digits))
    }

    pub fn digits(&self) -> &[u8; CODE_LEN] {
        &self.0
    }

    /// Exact-match comparison against a fully entered buffer.
    pub fn matches(&self, entered: &[u8]) -> bool {
        self.0.as_slice() == entered
    }
}

impl TryFrom<[u8; CODE_LEN]> for Code {
    type Error = CodeError;

    fn try_from(digits: [u8; CODE_LEN]) -> Result<Self, Self::Error> {
        Self::new(digits)
    }
}

impl From<Code> for [u8; CODE_LEN] {
    fn from(code: Code) -> Self {
        code.0
    }
}

impl FromStr for Code {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s.chars().count();
        if count != CODE_LEN {
            return Err(CodeError::WrongLength(count));
        }
        let mut digits = [0u8; CODE_LEN];
        for (slot, c) in digits.iter_mut().zip(s.chars()) {
            *slot = c.to_digit(10).ok_or(CodeError::NotADigit(c))? as u8;
        }
        Ok(Self(digits))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.0 {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

// Codes are secrets on the field; keep them out of logs.
impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Code(****)")
    }
}

// ---------------------------------------------------------------------------
// GameConfig
// ---------------------------------------------------------------------------

/// Core game configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // --- Mode ---
    /// Game mode started at boot
    pub mode: GameModeKind,

    // --- Defuse ---
    /// Countdown once armed (seconds)
    pub defuse_time_secs: u32,
    /// Code that arms the bomb
    pub arming_code: Code,
    /// Code that defuses the armed bomb
    pub defuse_code: Code,

    // --- Domination ---
    /// Match length restored on every reset (minutes)
    pub domination_minutes: u32,

    // --- Timing ---
    /// Polling loop period (milliseconds)
    pub loop_interval_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameModeKind::Defuse,

            defuse_time_secs: DEFAULT_DEFUSE_TIME_SECS,
            arming_code: Code([1, 2, 3, 4]),
            defuse_code: Code([5, 6, 7, 8]),

            domination_minutes: DEFAULT_DOMINATION_MINUTES,

            loop_interval_ms: 10, // 100 Hz
        }
    }
}

impl GameConfig {
    /// Range-check every field. Used before persisting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !DEFUSE_TIME_RANGE_SECS.contains(&self.defuse_time_secs) {
            return Err(ConfigError::ValidationFailed(
                "defuse_time_secs must be 5–3600",
            ));
        }
        if !DOMINATION_MINUTES_RANGE.contains(&self.domination_minutes) {
            return Err(ConfigError::ValidationFailed(
                "domination_minutes must be 1–60",
            ));
        }
        if !(1..=100).contains(&self.loop_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "loop_interval_ms must be 1–100",
            ));
        }
        Ok(())
    }

    /// Replace every out-of-range field with its default. Used on load so a
    /// stale blob never hands a controller an invalid duration.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !DEFUSE_TIME_RANGE_SECS.contains(&self.defuse_time_secs) {
            log::warn!(
                "config: defuse_time_secs {} out of range, using {}",
                self.defuse_time_secs,
                defaults.defuse_time_secs
            );
            self.defuse_time_secs = defaults.defuse_time_secs;
        }
        if !DOMINATION_MINUTES_RANGE.contains(&self.domination_minutes) {
            log::warn!(
                "config: domination_minutes {} out of range, using {}",
                self.domination_minutes,
                defaults.domination_minutes
            );
            self.domination_minutes = defaults.domination_minutes;
        }
        if !(1..=100).contains(&self.loop_interval_ms) {
            self.loop_interval_ms = defaults.loop_interval_ms;
        }
        self
    }
}
