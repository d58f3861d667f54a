//! Time sources and fixed-step cadence
//!
//! The simulation never reads the wall clock directly. Sessions and loops are
//! handed a [`TimeSource`]; tests and headless runs use [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::consts::MAX_SUBSTEPS;

/// Monotonic milliseconds since an arbitrary origin
pub trait TimeSource {
    fn now_ms(&self) -> u64;
}

/// Real monotonic time
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl TimeSource for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Manually advanced clock. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Accumulator-based fixed tick cadence.
///
/// Once stopped it reports no due ticks until started again.
#[derive(Debug, Clone)]
pub struct FixedStep {
    interval_ms: u64,
    max_substeps: u32,
    accumulator_ms: u64,
    last_ms: u64,
    running: bool,
}

impl FixedStep {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            max_substeps: MAX_SUBSTEPS,
            accumulator_ms: 0,
            last_ms: 0,
            running: false,
        }
    }

    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps.max(1);
        self
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin counting from `now_ms`
    pub fn start(&mut self, now_ms: u64) {
        self.accumulator_ms = 0;
        self.last_ms = now_ms;
        self.running = true;
    }

    /// Stop the cadence; no further ticks are reported
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator_ms = 0;
    }

    /// Number of ticks owed since the previous call.
    ///
    /// Capped at `max_substeps`; time beyond the cap is dropped rather than
    /// carried, so a long stall does not replay as a burst.
    pub fn due_ticks(&mut self, now_ms: u64) -> u32 {
        if !self.running {
            return 0;
        }
        let elapsed = now_ms.saturating_sub(self.last_ms);
        self.last_ms = now_ms.max(self.last_ms);
        self.accumulator_ms += elapsed;

        let due = self.accumulator_ms / self.interval_ms;
        if due > self.max_substeps as u64 {
            log::debug!("Dropping {} ticks behind schedule", due - self.max_substeps as u64);
            self.accumulator_ms = 0;
            return self.max_substeps;
        }
        self.accumulator_ms -= due * self.interval_ms;
        due as u32
    }

    /// Time until the next tick is due
    pub fn until_next_ms(&self) -> u64 {
        self.interval_ms.saturating_sub(self.accumulator_ms)
    }
}
