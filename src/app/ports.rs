//! Port traits — the boundary between link logic and the platform.
//!
//! ```text
//!   UART driver ──▶ SerialRx ──▶ LineFramer ──▶ Outbox<Command> ──▶ consumer
//!                                    │
//!                                    ▼
//!                               EventSink ──▶ Console ──▶ SerialTx ──▶ UART
//! ```
//!
//! Platform adapters implement these traits.  The framer, matcher and
//! console consume them via generics, so none of them touch peripheral
//! registers directly and all of them run on the host in tests.
//!
//! Delays are not a port of their own: anything implementing
//! [`embedded_hal::delay::DelayNs`] is accepted.

use crate::error::TransmitTimeout;

use super::events::LinkEvent;

// ───────────────────────────────────────────────────────────────
// Receive primitive
// ───────────────────────────────────────────────────────────────

/// Byte-at-a-time receive side of a UART.
pub trait SerialRx {
    /// Wait at most `timeout_ms` for one byte.
    /// Must return `None` promptly once the bound elapses.
    fn try_read_byte(&mut self, timeout_ms: u32) -> Option<u8>;

    /// Whether the peripheral has latched a receive-overrun error.
    fn overrun_pending(&self) -> bool;

    /// Acknowledge a latched overrun.  Some UARTs stop receiving until
    /// this is done.
    fn clear_overrun(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Transmit primitive
// ───────────────────────────────────────────────────────────────

/// Blocking transmit side of a UART.
pub trait SerialTx {
    /// Send all of `data`, blocking at most `timeout_ms`.
    fn write_bytes(&mut self, data: &[u8], timeout_ms: u32) -> Result<(), TransmitTimeout>;
}

// ───────────────────────────────────────────────────────────────
// Outbound queue
// ───────────────────────────────────────────────────────────────

/// Non-blocking producer side of a bounded queue.
pub trait Outbox<T> {
    /// Enqueue `item` without waiting.
    /// Returns `false` if the queue was full and the item was dropped.
    fn try_post(&self, item: T) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Diagnostics
// ───────────────────────────────────────────────────────────────

/// Receives [`LinkEvent`]s from the framer and matcher.
pub trait EventSink {
    fn emit(&mut self, event: &LinkEvent<'_>);
}
