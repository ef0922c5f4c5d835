//! Port traits: the hexagonal boundary between game logic and the prop hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ GameRunner / controllers (domain)
//! ```
//!
//! Driven adapters (clock, display, sound, event sinks, settings storage)
//! implement these traits. Controllers receive them as `&mut impl Peripherals`
//! on every call, so the domain core never reaches for a global instance
//! and tests can swap in a simulated clock.

use heapless::String;

use crate::config::{GameConfig, GameModeKind};
use crate::game::Team;

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond time source.
///
/// `now_ms` wraps at `u32::MAX` (~49.7 days); callers compute elapsed time
/// with `wrapping_sub` against a captured timestamp and never wait on it.
pub trait Clock {
    /// Milliseconds since boot.
    fn now_ms(&self) -> u32;

    /// Block the whole loop for `ms` milliseconds.
    ///
    /// Only used for terminal presentation holds. Simulated clocks advance
    /// time instead of sleeping.
    fn hold(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Display port
// ───────────────────────────────────────────────────────────────

/// Screens the controllers ask the display to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Boot splash.
    Welcome,
    /// Announces the selected game mode.
    ModeBanner(GameModeKind),
    /// Defuse status: countdown, armed flag, and the digits typed so far.
    Defuse {
        remaining_secs: u32,
        armed: bool,
        entered: String<4>,
    },
    /// Defuse session result.
    MissionResult { victory: bool },
    /// Domination match-length picker.
    DominationSetup { minutes: u32 },
    /// Live domination scoreboard.
    DominationLive {
        red_score: u32,
        green_score: u32,
        capture_progress: u8,
        owner: Team,
        remaining_secs: u32,
    },
    /// Final domination scores. `winner` is `Team::Neutral` on a draw.
    DominationResult {
        winner: Team,
        red_score: u32,
        green_score: u32,
    },
}

/// Render-side port. An uninitialised display is expected to ignore calls.
pub trait Display {
    fn show(&mut self, screen: &Screen);
}

// ───────────────────────────────────────────────────────────────
// Sound port
// ───────────────────────────────────────────────────────────────

/// Sound effects, numbered the way the audio module's track list is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SoundEffect {
    Startup = 0,
    GameStart = 1,
    Explosion = 2,
    Defused = 3,
    Beep = 4,
    ButtonPress = 5,
    Error = 6,
    Warning = 7,
}

/// Fire-and-forget audio.
pub trait Sound {
    fn play(&mut self, effect: SoundEffect);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`GameEvent`](super::events::GameEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::GameEvent);
}

/// Everything a controller touches while it runs.
pub trait Peripherals: Clock + Display + Sound + EventSink {}

impl<T: Clock + Display + Sound + EventSink> Peripherals for T {}

// ───────────────────────────────────────────────────────────────
// Configuration port (domain ↔ persistent settings)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the game configuration.
///
/// Implementations MUST validate before persisting and reject invalid
/// ranges with [`ConfigError::ValidationFailed`] rather than clamping them.
pub trait ConfigPort {
    /// Load configuration. Returns [`GameConfig::default()`] when nothing
    /// has been stored yet.
    fn load(&self) -> Result<GameConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&mut self, config: &GameConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Storage port (domain ↔ EEPROM / flash)
// ───────────────────────────────────────────────────────────────

/// Persistent key-value storage. Keys are namespaced per subsystem.
/// Writes MUST be atomic: no partial blobs after a power cut.
pub trait StoragePort {
    /// Read a value. Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key. Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    /// Check whether a key exists without reading it.
    fn exists(&self, namespace: &str, key: &str) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialisation.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Underlying storage is full.
    StorageFull,
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Storage is full.
    Full,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::StorageFull => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl From<StorageError> for ConfigError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Full => Self::StorageFull,
            StorageError::NotFound | StorageError::IoError => Self::IoError,
        }
    }
}
