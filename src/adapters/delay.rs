//! Thread-sleep delay adapter.
//!
//! Implements [`DelayNs`] with `std::thread::sleep`, which on an RTOS-backed
//! std (FreeRTOS pthreads) and on the host both suspend the calling task
//! and let the scheduler run others.  Used for the framer's idle yield and
//! the heartbeat period.

use core::time::Duration;

use embedded_hal::delay::DelayNs;

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl ThreadDelay {
    pub fn new() -> Self {
        Self
    }
}

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns.into()));
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(us.into()));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms.into()));
    }
}
