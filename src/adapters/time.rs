//! Host clock adapter.
//!
//! Implements [`Clock`] on top of `std::time::Instant`. The millisecond
//! counter is truncated to `u32` and wraps after ~49.7 days, matching the
//! microcontroller tick the controllers were written against.

use std::time::{Duration, Instant};

use crate::app::ports::Clock;

/// Monotonic clock measured from construction.
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since construction, not truncated.
    pub fn uptime_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u32 {
        self.uptime_ms() as u32
    }

    fn hold(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
