//! Monotonic wall-clock timing.

use std::time::Instant;

/// Seconds between two monotonic timestamps.
///
/// Saturates at zero if `end` precedes `start`.
pub fn elapsed_secs(start: Instant, end: Instant) -> f64 {
    end.saturating_duration_since(start).as_nanos() as f64 / 1_000_000_000.0
}

/// Run a closure and measure how long it took.
pub fn time_secs<F, R>(f: F) -> (R, f64)
where
    F: FnOnce() -> R,
{
    let watch = Stopwatch::start();
    let result = f();
    (result, watch.elapsed_secs())
}

/// A started clock.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        elapsed_secs(self.started, Instant::now())
    }
}
