//! Diagnostic events emitted by the command path.
//!
//! The framer and matcher report what they did through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them; the production adapter renders them as
//! text on the console.

use super::commands::Command;
use crate::framer::Frame;

/// Structured events emitted while decoding the receive stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent<'a> {
    /// The command task finished its startup sequence.
    Ready,

    /// A complete line arrived.  Borrowed from the line buffer.
    FrameReceived(Frame<'a>),

    /// A recognised command was accepted by the outbound queue.
    CommandPosted(Command),

    /// The line did not match any known command.
    UnknownCommand,

    /// The line buffer filled up and was discarded.
    Overflow,
}
