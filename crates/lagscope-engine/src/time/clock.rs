use std::time::{Duration, Instant};

/// Monotonic time + best-effort wait capability.
///
/// `relax` may sleep for more or less than requested; callers must re-check
/// `now_micros` after it returns and never trust the requested duration.
/// Injectable so pacing tests can simulate time without real delays.
pub trait Clock {
    /// Microseconds since an arbitrary process-local epoch.
    ///
    /// Non-decreasing within a process run; never compared across processes.
    fn now_micros(&self) -> u64;

    /// Best-effort sleep. `relax(0)` yields the thread without sleeping.
    fn relax(&self, micros: u64);
}

/// `Instant`-backed monotonic clock.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_micros(&self) -> u64 {
        self.epoch.elapsed().as_micros() as u64
    }

    fn relax(&self, micros: u64) {
        if micros == 0 {
            std::thread::yield_now();
        } else {
            std::thread::sleep(Duration::from_micros(micros));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_non_decreasing() {
        let clock = MonotonicClock::new();
        let a = clock.now_micros();
        let b = clock.now_micros();
        assert!(b >= a);
    }

    #[test]
    fn relax_zero_returns() {
        // A yield must come back promptly; this is a liveness check only.
        let clock = MonotonicClock::new();
        clock.relax(0);
    }
}
