//! Frame timing core.
//!
//! Provides stable, testable pacing utilities without coupling to the
//! runtime:
//! - `Clock` is the injectable monotonic time + wait capability
//! - `FrameScheduler` targets a frame cadence and measures phase durations
//! - `ReportTimer` bounds the rate of the periodic diagnostic dump
//!
//! All durations are microseconds (`u64`); differences are saturating so a
//! misbehaving platform clock can never produce a negative duration or
//! corrupt the smoothed averages.

mod clock;
mod pacing;
mod report;
mod smoothing;

pub use clock::{Clock, MonotonicClock};
pub use pacing::{
    FrameScheduler, PacingStrategy, PhaseSample, COARSE_MARGIN_MICROS, DRIFT_TARGET_MICROS,
    FALLBACK_REFRESH_HZ, FINE_MARGIN_MICROS,
};
pub use report::{ReportTimer, REPORT_INTERVAL_MICROS};
pub use smoothing::{Ema, SmoothedPhases, SMOOTHING_ALPHA};

#[cfg(test)]
pub(crate) mod testing;
