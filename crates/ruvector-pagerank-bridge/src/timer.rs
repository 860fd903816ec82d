//! Wall-clock timing.
//!
//! [`measure`] runs an operation once and reports how long it took, without
//! touching its result. [`Stopwatch`] covers the case where the start and
//! end of a phase are in different places.
//!
//! Both read the monotonic [`Instant`] clock, which resolves nanoseconds on
//! every supported platform.

use std::time::{Duration, Instant};

/// Run `op` once and return its result together with the elapsed wall time.
#[inline]
pub fn measure<R>(op: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let result = op();
    (result, start.elapsed())
}

/// Started timer.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    /// Start timing now.
    #[inline]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time since [`start`](Self::start).
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Return the elapsed time and restart.
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let lap = now.duration_since(self.start);
        self.start = now;
        lap
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::start()
    }
}
