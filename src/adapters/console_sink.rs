//! Console event sink adapter.
//!
//! Implements [`EventSink`] by rendering link events as text on the
//! serialized [`Console`], which goes out on the same UART the commands
//! come in on.

use log::debug;

use crate::app::commands::Command;
use crate::app::events::LinkEvent;
use crate::app::ports::{EventSink, SerialTx};
use crate::console::Console;
use crate::error::OutputError;

/// Adapter that prints every [`LinkEvent`] to the console.
pub struct ConsoleEventSink<'c, T, const N: usize> {
    console: &'c Console<T, N>,
}

impl<'c, T: SerialTx, const N: usize> ConsoleEventSink<'c, T, N> {
    pub fn new(console: &'c Console<T, N>) -> Self {
        Self { console }
    }
}

impl<T: SerialTx, const N: usize> EventSink for ConsoleEventSink<'_, T, N> {
    fn emit(&mut self, event: &LinkEvent<'_>) {
        let c = self.console;
        let sent: Result<usize, OutputError> = match event {
            LinkEvent::Ready => crate::console_print!(
                c,
                "[CMD] Ready. Please send '{}' + Enter.\r\n",
                Command::Toggle.text().unwrap_or_default()
            ),
            LinkEvent::FrameReceived(frame) => {
                crate::console_print!(c, "[CMD] Recv Frame: [{}]\r\n", frame)
            }
            LinkEvent::CommandPosted(cmd) => {
                crate::console_print!(c, "[CMD] Action: {}\r\n", cmd.action())
            }
            LinkEvent::UnknownCommand => crate::console_print!(c, "[CMD] Unknown Cmd.\r\n"),
            LinkEvent::Overflow => crate::console_print!(c, "[CMD] Buffer Overflow, Reset.\r\n"),
        };

        if let Err(e) = sent {
            debug!("console sink: {:?} not shown ({})", event, e);
        }
    }
}
