/// Default interval between pacing reports.
pub const REPORT_INTERVAL_MICROS: u64 = 1_000_000;

/// Bounded-rate gate for the periodic diagnostic dump.
///
/// Fires at most once per interval; a manual option change calls
/// [`ReportTimer::make_due`] so the very next check fires immediately.
#[derive(Debug, Clone)]
pub struct ReportTimer {
    interval: u64,
    next_due: u64,
}

impl ReportTimer {
    pub fn new(interval_micros: u64) -> Self {
        Self {
            interval: interval_micros,
            // Never armed yet: the first check fires.
            next_due: 0,
        }
    }

    /// Returns true when a report should be emitted now, and arms the next
    /// deadline.
    pub fn due(&mut self, now_micros: u64) -> bool {
        if now_micros >= self.next_due {
            self.next_due = now_micros + self.interval;
            true
        } else {
            false
        }
    }

    /// Forces the next [`ReportTimer::due`] check to fire.
    pub fn make_due(&mut self) {
        self.next_due = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_check_fires() {
        let mut timer = ReportTimer::new(REPORT_INTERVAL_MICROS);
        assert!(timer.due(5));
    }

    #[test]
    fn rate_is_bounded_by_the_interval() {
        let mut timer = ReportTimer::new(1_000_000);
        assert!(timer.due(0));
        assert!(!timer.due(100));
        assert!(!timer.due(999_999));
        assert!(timer.due(1_000_000));
        assert!(!timer.due(1_500_000));
    }

    #[test]
    fn deadline_is_rearmed_from_fire_time() {
        let mut timer = ReportTimer::new(1_000_000);
        assert!(timer.due(250_000));
        assert!(!timer.due(1_249_999));
        assert!(timer.due(1_250_000));
    }

    #[test]
    fn make_due_fires_on_the_next_check() {
        let mut timer = ReportTimer::new(1_000_000);
        assert!(timer.due(0));
        assert!(!timer.due(1));
        timer.make_due();
        assert!(timer.due(2));
        assert!(!timer.due(3));
    }
}
