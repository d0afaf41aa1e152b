//! Periodic heartbeat reporter.
//!
//! Prints a monotonically increasing counter on the console and posts the
//! same value to a mailbox for whoever wants to react to it.  It is the
//! console's second producer alongside the command path.

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::app::ports::{Outbox, SerialTx};
use crate::console::Console;

#[derive(Debug, Default)]
pub struct Heartbeat {
    count: u32,
}

impl Heartbeat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next value to be reported.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Report the current count, post it, and advance.  Returns the value
    /// that was reported.
    pub fn beat<T, O, const N: usize>(&mut self, console: &Console<T, N>, outbox: &O) -> u32
    where
        T: SerialTx,
        O: Outbox<u32> + ?Sized,
    {
        let beat = self.count;
        if let Err(e) = crate::console_print!(console, "[PRINT] heartbeat={}\r\n", beat) {
            debug!("heartbeat: report {} not sent ({})", beat, e);
        }
        outbox.try_post(beat);
        self.count = self.count.wrapping_add(1);
        beat
    }

    /// Beat every `interval_ms`, forever.
    pub fn run<T, O, D, const N: usize>(
        &mut self,
        console: &Console<T, N>,
        outbox: &O,
        delay: &mut D,
        interval_ms: u32,
    ) -> !
    where
        T: SerialTx,
        O: Outbox<u32> + ?Sized,
        D: DelayNs + ?Sized,
    {
        loop {
            self.beat(console, outbox);
            delay.delay_ms(interval_ms);
        }
    }
}
