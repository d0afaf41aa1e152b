//! Command matcher — maps a completed line to a [`Command`] and forwards it.
//!
//! Stateless.  Runs synchronously on the framer task, so it must never
//! block: recognised commands are offered to the outbound queue with a
//! non-blocking post and simply dropped if the queue is full.  Fresh input
//! wins over guaranteed delivery; the queue's drop counter makes the loss
//! observable.

use super::commands::Command;
use super::events::LinkEvent;
use super::ports::{EventSink, Outbox};
use crate::framer::Frame;

/// Exact, case-sensitive match of `frame` against the command table.
/// Lines that are not valid UTF-8 never match.
pub fn match_frame(frame: Frame<'_>) -> Command {
    frame.as_str().map_or(Command::None, Command::from_text)
}

/// Echo `frame`, match it, and post the result to `outbox`.
///
/// Returns the matched command even when the post was dropped.
pub fn dispatch<O, E>(frame: Frame<'_>, outbox: &O, events: &mut E) -> Command
where
    O: Outbox<Command> + ?Sized,
    E: EventSink + ?Sized,
{
    events.emit(&LinkEvent::FrameReceived(frame));

    let cmd = match_frame(frame);
    if cmd.is_none() {
        events.emit(&LinkEvent::UnknownCommand);
    } else if outbox.try_post(cmd) {
        events.emit(&LinkEvent::CommandPosted(cmd));
    }
    cmd
}
