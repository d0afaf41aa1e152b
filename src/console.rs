//! Serialized console — formatted text onto a shared UART from any task.
//!
//! ```text
//!  task A ─┐                 ┌──────────── guard held ────────────┐
//!  task B ─┼─▶ lock() ──────▶│ render ──▶ [u8; N] ──▶ write_bytes │──▶ unlock
//!  logger ─┘                 └────────────────────────────────────┘
//! ```
//!
//! The render buffer and the transmit port live together inside one mutex,
//! so a rendering can never be overwritten by another caller before it has
//! been sent and two callers' bytes never interleave on the line.  The
//! guard is scoped to the call and drops on every exit path.
//!
//! Must not be called from interrupt context: acquisition may block.  When
//! the console is installed as the global logger, the [`SerialTx`] behind
//! it must not itself emit `log` records.

use core::fmt::{self, Write as _};
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use log::{LevelFilter, Log, Metadata, Record};

use crate::app::ports::SerialTx;
use crate::config::RENDER_CAPACITY;
use crate::error::OutputError;

/// Write formatted text to a [`Console`].
///
/// ```ignore
/// console_print!(console, "[PRINT] heartbeat={}\r\n", n)?;
/// ```
#[macro_export]
macro_rules! console_print {
    ($console:expr, $($arg:tt)*) => {
        $console.write(core::format_args!($($arg)*))
    };
}

// ── Render target ────────────────────────────────────────────

/// `fmt::Write` into a fixed slice, silently dropping whatever does not fit.
struct Truncating<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl fmt::Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let to_write = bytes.len().min(self.buf.len() - self.pos);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

struct ConsoleInner<T, const N: usize> {
    tx: T,
    buf: [u8; N],
}

impl<T: SerialTx, const N: usize> ConsoleInner<T, N> {
    fn render_and_send(
        &mut self,
        args: fmt::Arguments<'_>,
        timeout_ms: u32,
    ) -> Result<usize, OutputError> {
        // Keep the last slot free, so at most N - 1 bytes go out.
        let mut out = Truncating {
            buf: &mut self.buf[..N - 1],
            pos: 0,
        };
        out.write_fmt(args).map_err(|_| OutputError::Format)?;
        let len = out.pos;

        if len == 0 {
            return Ok(0);
        }
        self.tx.write_bytes(&self.buf[..len], timeout_ms)?;
        Ok(len)
    }
}

// ── Console ──────────────────────────────────────────────────

/// Exclusive, serialized formatted output over a [`SerialTx`].
pub struct Console<T, const N: usize = RENDER_CAPACITY> {
    inner: Mutex<ConsoleInner<T, N>>,
    transmit_timeout_ms: u32,
    max_level: LevelFilter,
}

impl<T: SerialTx, const N: usize> Console<T, N> {
    pub const fn new(tx: T, transmit_timeout_ms: u32) -> Self {
        const { assert!(N > 1, "render buffer must hold at least one byte") };
        Self {
            inner: Mutex::new(ConsoleInner { tx, buf: [0; N] }),
            transmit_timeout_ms,
            max_level: LevelFilter::Info,
        }
    }

    /// Most verbose `log` level forwarded when used as the global logger.
    #[must_use]
    pub fn with_max_level(mut self, level: LevelFilter) -> Self {
        self.max_level = level;
        self
    }

    /// Render `args` and transmit it, holding the console for both steps.
    ///
    /// Output longer than `N - 1` bytes is cut to `N - 1` bytes; the
    /// returned count is what was actually sent.  An empty rendering sends
    /// nothing and returns `Ok(0)`.
    ///
    /// Blocks until the console is free.  A panic in an earlier holder does
    /// not disable the console: nothing in the guarded state outlives a call.
    pub fn write(&self, args: fmt::Arguments<'_>) -> Result<usize, OutputError> {
        self.lock().render_and_send(args, self.transmit_timeout_ms)
    }

    /// Like [`write`](Self::write), but fails with
    /// [`OutputError::LockUnavailable`] instead of waiting for another caller.
    pub fn try_write(&self, args: fmt::Arguments<'_>) -> Result<usize, OutputError> {
        let mut inner = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return Err(OutputError::LockUnavailable),
        };
        inner.render_and_send(args, self.transmit_timeout_ms)
    }

    /// Run `f` on the transmit port while holding the console, e.g. to
    /// reconfigure the UART between writes.
    pub fn with_tx<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.lock().tx)
    }

    pub fn transmit_timeout_ms(&self) -> u32 {
        self.transmit_timeout_ms
    }

    // The render buffer is rewritten from offset 0 on every call, so a
    // poisoned guard holds nothing worth discarding.
    fn lock(&self) -> MutexGuard<'_, ConsoleInner<T, N>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T, const N: usize> Console<T, N>
where
    T: SerialTx + Send + 'static,
{
    /// Route the `log` facade through this console.
    pub fn install_logger(&'static self) -> Result<(), log::SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.max_level);
        Ok(())
    }
}

/// Each record becomes one `[LEVEL] message\r\n` write.
impl<T, const N: usize> Log for Console<T, N>
where
    T: SerialTx + Send,
{
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let _ = self.write(format_args!("[{}] {}\r\n", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

// ── Tests ────────────────────────────────────────────────────
