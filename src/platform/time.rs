//! Frame clocks
//!
//! The loop asks a clock for the current time and waits on it between frames.
//! Waiting is pure pacing; nothing in the simulation depends on it.

/// Source of frame timing (milliseconds since an arbitrary origin)
pub trait FrameClock {
    fn now_ms(&mut self) -> f64;

    /// Block until `deadline_ms` (returns at once if it already passed)
    fn wait_until(&mut self, deadline_ms: f64);
}

/// Wall clock with thread-sleep pacing
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl FrameClock for SystemClock {
    fn now_ms(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    fn wait_until(&mut self, deadline_ms: f64) {
        let remaining = deadline_ms - self.now_ms();
        if remaining > 0.0 {
            std::thread::sleep(std::time::Duration::from_secs_f64(remaining / 1000.0));
        }
    }
}

/// Simulated clock: waiting jumps straight to the deadline
///
/// Used for unpaced runs and tests.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward without waiting on a deadline (e.g. a stall)
    pub fn advance(&mut self, ms: f64) {
        self.now += ms;
    }
}

impl FrameClock for ManualClock {
    fn now_ms(&mut self) -> f64 {
        self.now
    }

    fn wait_until(&mut self, deadline_ms: f64) {
        self.now = self.now.max(deadline_ms);
    }
}
