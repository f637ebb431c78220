//! Time sources for measuring how long a registry tick takes.

use core::cell::Cell;

/// Monotonic microsecond counter.
pub trait Clock {
    fn now_micros(&self) -> u64;
}

/// Wall clock backed by [`std::time::Instant`].
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    pub fn new() -> Self {
        StdClock { origin: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_micros(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }
}

/// A clock that only moves when told to. Lets hosts without a system clock
/// feed their own ticks, and makes durations reproducible in tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, micros: u64) {
        self.micros.set(micros);
    }

    pub fn advance(&self, micros: u64) {
        self.micros.set(self.micros.get() + micros);
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> u64 {
        self.micros.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_micros(&self) -> u64 {
        (**self).now_micros()
    }
}
