//! Unified error types for the serial link.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! application's error handling uniform.  All variants are `Copy` so they
//! can be passed between tasks without allocation.
//!
//! Receive overruns and line-buffer overflows are deliberately absent: the
//! framer recovers from both internally and only reports them as
//! diagnostics.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Writing to the console failed.
    Output(OutputError),
    /// Configuration is invalid or could not be decoded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output(e) => write!(f, "output: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Transmit primitive
// ---------------------------------------------------------------------------

/// The transmit primitive did not accept all bytes within its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmitTimeout;

impl fmt::Display for TransmitTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transmit timed out")
    }
}

// ---------------------------------------------------------------------------
// Console output errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    /// `try_write` found the console held by another caller.
    LockUnavailable,
    /// The line did not drain within the transmit timeout.
    TransmitTimeout,
    /// A `Display`/`Debug` implementation in the arguments returned an error.
    Format,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LockUnavailable => write!(f, "console lock unavailable"),
            Self::TransmitTimeout => write!(f, "transmit timed out"),
            Self::Format => write!(f, "formatting failed"),
        }
    }
}

impl core::error::Error for TransmitTimeout {}

impl core::error::Error for OutputError {}

impl From<TransmitTimeout> for OutputError {
    fn from(_: TransmitTimeout) -> Self {
        Self::TransmitTimeout
    }
}

impl From<OutputError> for Error {
    fn from(e: OutputError) -> Self {
        Self::Output(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation.
    /// The `&'static str` names the field and the rule.
    ValidationFailed(&'static str),
    /// Stored bytes could not be decoded.
    Corrupted,
    /// The config could not be encoded.
    EncodeFailed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::EncodeFailed => write!(f, "config encode failed"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
