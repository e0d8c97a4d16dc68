//! Deterministic clock for timing tests.

use std::cell::{Cell, RefCell};

use super::clock::Clock;

/// Manually advanced clock implementing [`Clock`].
///
/// Every poll advances time by `poll_cost` and every relax advances it by at
/// least `relax_floor`, so spin loops always terminate without wall-clock
/// sleeps. Relax requests are recorded for assertions about the wait shape.
pub(crate) struct ManualClock {
    now: Cell<u64>,
    poll_cost: u64,
    relax_floor: u64,
    requests: RefCell<Vec<u64>>,
}

impl ManualClock {
    pub(crate) fn new(poll_cost: u64, relax_floor: u64) -> Self {
        Self {
            now: Cell::new(1_000_000),
            poll_cost,
            relax_floor,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Advances simulated time, e.g. to model frame work or a stall.
    pub(crate) fn advance(&self, micros: u64) {
        self.now.set(self.now.get() + micros);
    }

    /// Sets simulated time directly; may move backwards to model a
    /// misbehaving platform clock.
    pub(crate) fn set(&self, micros: u64) {
        self.now.set(micros);
    }

    /// Requested relax durations, in call order.
    pub(crate) fn relax_requests(&self) -> Vec<u64> {
        self.requests.borrow().clone()
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> u64 {
        let t = self.now.get();
        self.now.set(t + self.poll_cost);
        t
    }

    fn relax(&self, micros: u64) {
        self.requests.borrow_mut().push(micros);
        // Best-effort contract: sleeps at least the yield granularity, and
        // exactly what was asked beyond it.
        self.now.set(self.now.get() + micros.max(self.relax_floor));
    }
}
