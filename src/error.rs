//! Unified error types for the prop core.
//!
//! Player mistakes (wrong code, short code) are never errors here; they are
//! feedback side effects inside the controllers. What remains are boundary
//! failures: malformed codes in configuration and settings-store faults.

use core::fmt;

use crate::app::ports::{ConfigError, StorageError};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible boundary operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A code string or digit array was malformed.
    Code(CodeError),
    /// Configuration could not be loaded, validated, or saved.
    Config(ConfigError),
    /// The key-value store failed.
    Storage(StorageError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(e) => write!(f, "code: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<CodeError> for Error {
    fn from(e: CodeError) -> Self {
        Self::Code(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

// ---------------------------------------------------------------------------
// Code errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeError {
    /// The code did not have exactly four digits.
    WrongLength(usize),
    /// A character other than `0`–`9` appeared.
    NotADigit(char),
    /// A raw digit value above 9.
    DigitOutOfRange(u8),
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength(n) => write!(f, "expected 4 digits, got {n}"),
            Self::NotADigit(c) => write!(f, "'{c}' is not a digit"),
            Self::DigitOutOfRange(d) => write!(f, "digit {d} out of range 0-9"),
        }
    }
}

impl std::error::Error for CodeError {}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
