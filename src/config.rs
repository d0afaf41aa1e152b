//! Link configuration parameters
//!
//! Timing knobs for the framer, console and heartbeat tasks.  Buffer and
//! queue capacities are compile-time constants; everything that trades
//! responsiveness against CPU time is a runtime field.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Line buffer size in bytes.  A frame holds at most `LINE_CAPACITY - 1`
/// characters; the next ordinary byte is an overflow.
pub const LINE_CAPACITY: usize = 16;

/// Console render buffer size in bytes.  Renderings are truncated to
/// `RENDER_CAPACITY - 1` bytes.
pub const RENDER_CAPACITY: usize = 128;

/// Depth of the outbound command queue.
pub const COMMAND_QUEUE_DEPTH: usize = 8;

/// Depth of the heartbeat counter queue.
pub const HEARTBEAT_QUEUE_DEPTH: usize = 8;

/// Serial link configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    // --- Receive ---
    /// Bounded wait for one received byte (milliseconds).  Zero would
    /// busy-poll and starve other tasks.
    pub poll_timeout_ms: u32,
    /// Sleep after an empty poll (milliseconds).  Longer values free more
    /// CPU; anything below ~20 ms is imperceptible to a human typist.
    pub idle_yield_ms: u32,

    // --- Transmit ---
    /// Upper bound on a single console transmit (milliseconds).  A jammed
    /// or disconnected line fails the write instead of stalling the caller.
    pub transmit_timeout_ms: u32,

    // --- Tasks ---
    /// Settle time before the command task prints its ready banner
    /// (milliseconds).
    pub startup_delay_ms: u32,
    /// Heartbeat report period (milliseconds).
    pub heartbeat_interval_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            // Receive
            poll_timeout_ms: 2,
            idle_yield_ms: 10,

            // Transmit
            transmit_timeout_ms: 1000,

            // Tasks
            startup_delay_ms: 1000,
            heartbeat_interval_ms: 1000, // 1 Hz
        }
    }
}

impl LinkConfig {
    /// Reject values that would busy-loop or block without bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("poll_timeout_ms must be > 0"));
        }
        if self.idle_yield_ms == 0 {
            return Err(ConfigError::ValidationFailed("idle_yield_ms must be > 0"));
        }
        if self.transmit_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "transmit_timeout_ms must be > 0",
            ));
        }
        if self.heartbeat_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "heartbeat_interval_ms must be > 0",
            ));
        }
        Ok(())
    }

    /// Encode for persistent storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::EncodeFailed)
    }

    /// Decode and validate a stored config.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }
}
