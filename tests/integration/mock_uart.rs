//! Mock UART adapters for integration tests.
//!
//! Scripted and channel-fed receive sides, a shared wire that records
//! every transmitted byte, and a sink that records every link event.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use uartlink::app::commands::Command;
use uartlink::app::events::LinkEvent;
use uartlink::app::ports::{EventSink, SerialRx, SerialTx};
use uartlink::error::TransmitTimeout;

// ── Receive: scripted ─────────────────────────────────────────

/// Hands out a fixed byte script, one byte per poll.
pub struct ScriptedRx {
    bytes: VecDeque<u8>,
    pub overrun: bool,
    pub overrun_clears: u32,
}

#[allow(dead_code)]
impl ScriptedRx {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().collect(),
            overrun: false,
            overrun_clears: 0,
        }
    }

    pub fn is_drained(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl SerialRx for ScriptedRx {
    fn try_read_byte(&mut self, _timeout_ms: u32) -> Option<u8> {
        self.bytes.pop_front()
    }

    fn overrun_pending(&self) -> bool {
        self.overrun
    }

    fn clear_overrun(&mut self) {
        self.overrun = false;
        self.overrun_clears += 1;
    }
}

// ── Receive: fed from another thread ──────────────────────────

/// Receive side fed through an mpsc channel; honours the read timeout.
pub struct ChannelRx {
    rx: Receiver<u8>,
    overrun: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl ChannelRx {
    /// Returns the receive side, the byte sender, and the overrun latch.
    pub fn new() -> (Self, Sender<u8>, Arc<AtomicBool>) {
        let (tx, rx) = channel();
        let overrun = Arc::new(AtomicBool::new(false));
        (
            Self {
                rx,
                overrun: overrun.clone(),
            },
            tx,
            overrun,
        )
    }
}

impl SerialRx for ChannelRx {
    fn try_read_byte(&mut self, timeout_ms: u32) -> Option<u8> {
        self.rx
            .recv_timeout(Duration::from_millis(timeout_ms.into()))
            .ok()
    }

    fn overrun_pending(&self) -> bool {
        self.overrun.load(Ordering::SeqCst)
    }

    fn clear_overrun(&mut self) {
        self.overrun.store(false, Ordering::SeqCst);
    }
}

// ── Transmit ──────────────────────────────────────────────────

/// Physical line shared between the console and the test.
///
/// Bytes are appended one at a time with a yield in between, so any
/// caller not holding the console exclusively would interleave.
#[derive(Clone, Default)]
pub struct SharedWire {
    line: Arc<Mutex<Vec<u8>>>,
    jammed: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl SharedWire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.line.lock().unwrap()).into_owned()
    }

    pub fn set_jammed(&self, jammed: bool) {
        self.jammed.store(jammed, Ordering::SeqCst);
    }
}

impl SerialTx for SharedWire {
    fn write_bytes(&mut self, data: &[u8], _timeout_ms: u32) -> Result<(), TransmitTimeout> {
        if self.jammed.load(Ordering::SeqCst) {
            return Err(TransmitTimeout);
        }
        for &b in data {
            self.line.lock().unwrap().push(b);
            std::thread::yield_now();
        }
        Ok(())
    }
}

// ── Delay ─────────────────────────────────────────────────────

/// Records requested sleeps instead of sleeping.
#[derive(Default)]
pub struct NoDelay {
    pub slept_ms: Vec<u32>,
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.slept_ms.push(ms);
    }
}

// ── Events ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Ready,
    Frame(Vec<u8>),
    Posted(Command),
    Unknown,
    Overflow,
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<Recorded>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &LinkEvent<'_>) {
        self.events.push(match event {
            LinkEvent::Ready => Recorded::Ready,
            LinkEvent::FrameReceived(f) => Recorded::Frame(f.as_bytes().to_vec()),
            LinkEvent::CommandPosted(c) => Recorded::Posted(*c),
            LinkEvent::UnknownCommand => Recorded::Unknown,
            LinkEvent::Overflow => Recorded::Overflow,
        });
    }
}
