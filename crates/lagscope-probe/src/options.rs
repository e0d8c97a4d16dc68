use std::fmt;

use lagscope_engine::input::Key;

/// The runtime-toggleable diagnostic options.
///
/// Everything starts off: the baseline is an uncapped, unsynchronized loop,
/// and each option is switched on one at a time to observe its effect on the
/// measured phases.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OptionSet {
    /// Surface presentation waits for vblank.
    pub vsync: bool,
    /// Borderless fullscreen on the current monitor.
    pub fullscreen: bool,
    /// Frames of pointer-velocity extrapolation for the guide cross. May go
    /// negative, which trails the pointer instead of leading it.
    pub predict_frames: i32,
    /// Acquire and clear the next frame right after presenting, moving any
    /// swapchain block out of the next frame's input phase.
    pub early_clear: bool,
    /// Pace the loop with the scheduler's wait phase.
    pub extra_sleep: bool,
    /// Alternate the clear color every other frame to make tear lines
    /// visible.
    pub tearing: bool,
}

impl Default for OptionSet {
    fn default() -> Self {
        Self {
            vsync: false,
            fullscreen: false,
            predict_frames: 0,
            early_clear: false,
            extra_sleep: false,
            tearing: false,
        }
    }
}

/// The single option changed by a key press, with its new value.
///
/// Carrying exactly one variant per press lets the caller run the side
/// effect for the changed option only, instead of reapplying every setting
/// on every press.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Applied {
    Vsync(bool),
    Fullscreen(bool),
    PredictFrames(i32),
    EarlyClear(bool),
    ExtraSleep(bool),
    Tearing(bool),
}

impl OptionSet {
    /// Applies a key binding and reports what changed.
    ///
    /// Returns `None` for keys with no binding; the caller already filters
    /// out auto-repeat, so every call here is a fresh press edge.
    pub fn apply_key(&mut self, key: Key) -> Option<Applied> {
        match key {
            Key::Digit1 => {
                self.vsync = !self.vsync;
                Some(Applied::Vsync(self.vsync))
            }
            Key::Digit2 => {
                self.fullscreen = !self.fullscreen;
                Some(Applied::Fullscreen(self.fullscreen))
            }
            Key::Digit3 => {
                self.predict_frames -= 1;
                Some(Applied::PredictFrames(self.predict_frames))
            }
            Key::Digit4 => {
                self.predict_frames += 1;
                Some(Applied::PredictFrames(self.predict_frames))
            }
            Key::Digit5 => {
                self.early_clear = !self.early_clear;
                Some(Applied::EarlyClear(self.early_clear))
            }
            Key::Digit6 => {
                self.extra_sleep = !self.extra_sleep;
                Some(Applied::ExtraSleep(self.extra_sleep))
            }
            Key::Digit7 => {
                self.tearing = !self.tearing;
                Some(Applied::Tearing(self.tearing))
            }
            _ => None,
        }
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "options:")?;
        writeln!(f, "  vsync          = {} (press 1)", u8::from(self.vsync))?;
        writeln!(f, "  fullscreen     = {} (press 2)", u8::from(self.fullscreen))?;
        writeln!(f, "  predict frames = {} (press 3 and 4)", self.predict_frames)?;
        writeln!(f, "  early clear    = {} (press 5)", u8::from(self.early_clear))?;
        writeln!(f, "  extra sleep    = {} (press 6)", u8::from(self.extra_sleep))?;
        writeln!(f, "  tearing        = {} (press 7)", u8::from(self.tearing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_starts_off() {
        let opts = OptionSet::default();
        assert_eq!(
            opts,
            OptionSet {
                vsync: false,
                fullscreen: false,
                predict_frames: 0,
                early_clear: false,
                extra_sleep: false,
                tearing: false,
            }
        );
    }

    #[test]
    fn toggles_flip_and_restore() {
        let mut opts = OptionSet::default();
        for key in [
            Key::Digit1,
            Key::Digit2,
            Key::Digit5,
            Key::Digit6,
            Key::Digit7,
        ] {
            assert!(opts.apply_key(key).is_some());
            assert_ne!(opts, OptionSet::default(), "{key:?} should change a flag");
            assert!(opts.apply_key(key).is_some());
            assert_eq!(opts, OptionSet::default(), "{key:?} twice should restore");
        }
    }

    #[test]
    fn predict_frames_steps_and_goes_negative() {
        let mut opts = OptionSet::default();
        assert_eq!(opts.apply_key(Key::Digit4), Some(Applied::PredictFrames(1)));
        assert_eq!(opts.apply_key(Key::Digit4), Some(Applied::PredictFrames(2)));
        assert_eq!(opts.apply_key(Key::Digit3), Some(Applied::PredictFrames(1)));
        assert_eq!(opts.apply_key(Key::Digit3), Some(Applied::PredictFrames(0)));
        // No lower clamp: negative prediction trails the pointer.
        assert_eq!(
            opts.apply_key(Key::Digit3),
            Some(Applied::PredictFrames(-1))
        );
    }

    #[test]
    fn applied_reports_the_new_value() {
        let mut opts = OptionSet::default();
        assert_eq!(opts.apply_key(Key::Digit1), Some(Applied::Vsync(true)));
        assert_eq!(opts.apply_key(Key::Digit1), Some(Applied::Vsync(false)));
        assert_eq!(opts.apply_key(Key::Digit7), Some(Applied::Tearing(true)));
    }

    #[test]
    fn unbound_keys_change_nothing() {
        let mut opts = OptionSet::default();
        for key in [Key::Digit0, Key::Digit8, Key::Digit9, Key::Escape] {
            assert_eq!(opts.apply_key(key), None);
        }
        assert_eq!(opts, OptionSet::default());
    }

    #[test]
    fn display_labels_every_binding() {
        let text = OptionSet::default().to_string();
        for n in 1..=7 {
            assert!(text.contains(&format!("press {n}")) || text.contains("press 3 and 4"));
        }
        assert!(text.contains("press 3 and 4"));
    }
}
