//! Line framer — newline-delimited frames from a byte-at-a-time UART.
//!
//! ```text
//!  byte ──▶ classify ──┬─ Terminator ──▶ empty?  ── yes ──▶ absorb
//!                      │                   └──── no ───▶ Frame ──▶ matcher, reset
//!                      ├─ Overflow ────▶ reset, discard byte, report
//!                      └─ Ordinary ────▶ append
//! ```
//!
//! The classification is computed before anything is touched, and the
//! terminator test comes first, so a CR or LF can never overflow the line.
//! Runs of CR/LF are absorbed, which covers both bare-LF and CR-LF line
//! endings without producing empty frames.

use core::fmt;

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::app::commands::Command;
use crate::app::events::LinkEvent;
use crate::app::matcher;
use crate::app::ports::{EventSink, Outbox, SerialRx};
use crate::config::{LINE_CAPACITY, LinkConfig};

// ── Frame ────────────────────────────────────────────────────

/// A complete, non-empty line without its terminator.
///
/// Borrowed from the framer's line buffer and only valid for the duration
/// of the dispatch that receives it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a>(&'a [u8]);

impl<'a> Frame<'a> {
    /// Wrap `bytes` as a frame.  Returns `None` for an empty slice.
    pub fn new(bytes: &'a [u8]) -> Option<Self> {
        (!bytes.is_empty()).then_some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// The frame as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&'a str> {
        core::str::from_utf8(self.0).ok()
    }
}

/// Renders valid UTF-8 as-is and every other byte as `\xNN`.
impl fmt::Display for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.0.utf8_chunks() {
            f.write_str(chunk.valid())?;
            for b in chunk.invalid() {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame(\"{}\")", self)
    }
}

// ── Line buffer ──────────────────────────────────────────────

/// Fixed-capacity accumulator for one line.  Holds at most `N - 1` bytes.
pub struct LineBuffer<const N: usize> {
    bytes: heapless::Vec<u8, N>,
}

impl<const N: usize> LineBuffer<N> {
    /// Maximum number of bytes a line may hold.
    pub const LIMIT: usize = N - 1;

    pub const fn new() -> Self {
        Self {
            bytes: heapless::Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bytes.len() >= Self::LIMIT
    }

    /// Append one byte.  Returns the byte back if the line is full.
    pub fn push(&mut self, byte: u8) -> Result<(), u8> {
        if self.is_full() {
            return Err(byte);
        }
        self.bytes.push(byte)
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Byte classification ──────────────────────────────────────

/// What an incoming byte means given the current line, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteClass {
    /// CR or LF.
    Terminator,
    /// Ordinary byte with no room left in the line.
    Overflow,
    /// Ordinary byte that fits.
    Ordinary,
}

fn classify(byte: u8, line_full: bool) -> ByteClass {
    match byte {
        b'\r' | b'\n' => ByteClass::Terminator,
        _ if line_full => ByteClass::Overflow,
        _ => ByteClass::Ordinary,
    }
}

// ── Outcomes ─────────────────────────────────────────────────

/// Result of feeding a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed<'a> {
    /// Ordinary byte appended to the line.
    Accepted,
    /// Terminator on an empty line; ignored.
    Absorbed,
    /// Line was full; it and the incoming byte were discarded.
    Overflow,
    /// Terminator completed a line.
    Frame(Frame<'a>),
}

/// Result of one [`LineFramer::poll_once`] iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// No byte arrived; overrun checked and the task yielded.
    Idle,
    Accepted,
    Absorbed,
    Overflow,
    /// A frame was dispatched to the matcher.
    Dispatched(Command),
}

/// Running counters, for diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FramerStats {
    pub frames: u32,
    pub overflows: u32,
    pub overruns: u32,
}

// ── Framer ───────────────────────────────────────────────────

/// Streaming line framer.
///
/// Owns its line buffer exclusively; it is driven from a single task.
pub struct LineFramer<const N: usize = LINE_CAPACITY> {
    line: LineBuffer<N>,
    /// The last `feed` returned a frame still borrowing `line`.
    completed: bool,
    poll_timeout_ms: u32,
    idle_yield_ms: u32,
    stats: FramerStats,
}

impl<const N: usize> LineFramer<N> {
    pub fn new(config: &LinkConfig) -> Self {
        const { assert!(N > 1, "line capacity must leave room for one byte") };
        Self {
            line: LineBuffer::new(),
            completed: false,
            poll_timeout_ms: config.poll_timeout_ms,
            idle_yield_ms: config.idle_yield_ms,
            stats: FramerStats::default(),
        }
    }

    /// Feed one byte into the framer.
    ///
    /// A returned [`Feed::Frame`] borrows the line buffer and is valid until
    /// the next call to `feed`, which clears the line first.
    pub fn feed(&mut self, byte: u8) -> Feed<'_> {
        if core::mem::take(&mut self.completed) {
            self.line.clear();
        }

        match classify(byte, self.line.is_full()) {
            ByteClass::Terminator if self.line.is_empty() => Feed::Absorbed,
            ByteClass::Terminator => {
                self.completed = true;
                self.stats.frames = self.stats.frames.saturating_add(1);
                Feed::Frame(Frame(self.line.as_bytes()))
            }
            ByteClass::Overflow => {
                self.line.clear();
                self.stats.overflows = self.stats.overflows.saturating_add(1);
                Feed::Overflow
            }
            ByteClass::Ordinary => {
                // Room is guaranteed by `classify`.
                let _ = self.line.push(byte);
                Feed::Accepted
            }
        }
    }

    /// One receive iteration: read a byte with a bounded wait and act on it.
    ///
    /// When nothing arrives, any latched overrun is cleared and the task
    /// sleeps for the idle interval so other tasks get the CPU.
    pub fn poll_once<R, D, O, E>(
        &mut self,
        rx: &mut R,
        delay: &mut D,
        outbox: &O,
        events: &mut E,
    ) -> Poll
    where
        R: SerialRx + ?Sized,
        D: DelayNs + ?Sized,
        O: Outbox<Command> + ?Sized,
        E: EventSink + ?Sized,
    {
        let Some(byte) = rx.try_read_byte(self.poll_timeout_ms) else {
            if rx.overrun_pending() {
                rx.clear_overrun();
                self.stats.overruns = self.stats.overruns.saturating_add(1);
                debug!("framer: cleared receive overrun");
            }
            delay.delay_ms(self.idle_yield_ms);
            return Poll::Idle;
        };

        match self.feed(byte) {
            Feed::Accepted => Poll::Accepted,
            Feed::Absorbed => Poll::Absorbed,
            Feed::Overflow => {
                events.emit(&LinkEvent::Overflow);
                Poll::Overflow
            }
            Feed::Frame(frame) => Poll::Dispatched(matcher::dispatch(frame, outbox, events)),
        }
    }

    /// Poll forever.
    pub fn run<R, D, O, E>(&mut self, rx: &mut R, delay: &mut D, outbox: &O, events: &mut E) -> !
    where
        R: SerialRx + ?Sized,
        D: DelayNs + ?Sized,
        O: Outbox<Command> + ?Sized,
        E: EventSink + ?Sized,
    {
        loop {
            self.poll_once(rx, delay, outbox, events);
        }
    }

    /// Bytes accumulated toward the next frame.
    pub fn pending_len(&self) -> usize {
        if self.completed { 0 } else { self.line.len() }
    }

    pub fn stats(&self) -> FramerStats {
        self.stats
    }

    /// Discard any partial line (e.g. after the port is reopened).
    pub fn reset(&mut self) {
        self.line.clear();
        self.completed = false;
    }
}

// ── Tests ────────────────────────────────────────────────────
