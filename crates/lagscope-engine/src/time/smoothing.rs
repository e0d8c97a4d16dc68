/// Smoothing factor for the phase-duration averages.
pub const SMOOTHING_ALPHA: f64 = 0.05;

/// Exponential moving average over microsecond durations.
///
/// Invariant: every update is a convex combination of the prior average and
/// the new sample, `avg' = (1 - alpha) * avg + alpha * sample`, so after N
/// identical samples of value V the error shrinks exactly by `(1 - alpha)^N`.
#[derive(Debug, Copy, Clone)]
pub struct Ema {
    alpha: f64,
    value: f64,
}

impl Ema {
    pub fn new(alpha: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&alpha));
        Self { alpha, value: 0.0 }
    }

    pub fn update(&mut self, sample: u64) {
        self.value += self.alpha * (sample as f64 - self.value);
    }

    /// Current average, rounded to whole microseconds for reporting.
    pub fn micros(&self) -> u64 {
        self.value.round() as u64
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Smoothed durations for the measured frame phases.
///
/// Input polling is not smoothed; it is dominated by discrete event bursts
/// and is reported raw.
#[derive(Debug, Copy, Clone)]
pub struct SmoothedPhases {
    pub draw: Ema,
    pub swap: Ema,
    pub sleep: Ema,
    pub total: Ema,
}

impl SmoothedPhases {
    pub fn new(alpha: f64) -> Self {
        Self {
            draw: Ema::new(alpha),
            swap: Ema::new(alpha),
            sleep: Ema::new(alpha),
            total: Ema::new(alpha),
        }
    }

    pub fn observe(&mut self, draw: u64, swap: u64, sleep: u64, total: u64) {
        self.draw.update(draw);
        self.swap.update(swap);
        self.sleep.update(sleep);
        self.total.update(total);
    }
}
