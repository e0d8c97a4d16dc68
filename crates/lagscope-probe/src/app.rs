use lagscope_engine::coords::Vec2;
use lagscope_engine::core::{App, AppControl, FrameCtx, SceneError};
use lagscope_engine::input::{InputEvent, Key};
use lagscope_engine::paint::Color;
use lagscope_engine::render::LineRenderer;
use lagscope_engine::time::{
    Clock, FrameScheduler, MonotonicClock, PacingStrategy, PhaseSample, ReportTimer,
    REPORT_INTERVAL_MICROS,
};

use crate::guide;
use crate::options::{Applied, OptionSet};
use crate::pointer::PointerTrack;

const GUIDE_COLOR: Color = Color::rgb(1.0, 0.0, 0.0);
const CLEAR_NORMAL: Color = Color::BLACK;
/// Tear-test alternate clear, dark blue so tear lines stand out without
/// being blinding.
const CLEAR_TEAR: Color = Color::rgb(0.0, 0.0, 0.3);

/// Per-frame clear color; with the tear test on, every other frame flips to
/// the alternate color so a tear line shows as a hard color boundary.
fn clear_color(tearing: bool, frame_counter: u64) -> Color {
    if tearing && frame_counter % 2 == 0 {
        CLEAR_TEAR
    } else {
        CLEAR_NORMAL
    }
}

/// The latency probe.
///
/// Runs the measured loop: drain input, draw the guide cross, present,
/// optionally pace, and periodically dump the phase report. All option
/// toggles are live, so the effect of each on the measured phases can be
/// observed while the probe runs.
pub struct ProbeApp {
    options: OptionSet,
    pointer: PointerTrack,
    sched: FrameScheduler<MonotonicClock>,
    report: ReportTimer,
    lines: LineRenderer,
    frame_counter: u64,
}

impl ProbeApp {
    pub fn new() -> Self {
        Self {
            options: OptionSet::default(),
            pointer: PointerTrack::default(),
            sched: FrameScheduler::new(MonotonicClock::new(), PacingStrategy::DriftCorrecting),
            report: ReportTimer::new(REPORT_INTERVAL_MICROS),
            lines: LineRenderer::new(),
            frame_counter: 0,
        }
    }

    fn print_report(&self, raw: &PhaseSample) {
        let smoothed = self.sched.smoothed();
        println!("----------------------------");
        print!("{}", self.options);
        println!();
        println!("measured:");
        println!("  input   = {:6} us", raw.input);
        println!("  draw    = {:6} us (avg)", smoothed.draw.micros());
        println!("  swap    = {:6} us (avg)", smoothed.swap.micros());
        println!("  sleep   = {:6} us (avg)", smoothed.sleep.micros());
        println!("  total   = {:6} us (avg)", smoothed.total.micros());
        println!("  polls   = {:6}", raw.polls);
        println!();
    }
}

impl Default for ProbeApp {
    fn default() -> Self {
        Self::new()
    }
}

impl App for ProbeApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // -------- input --------
        self.sched.begin_iteration(ctx.window.refresh_rate_hz());

        // Snapshot before draining, so a burst of move events in one frame
        // measures as a single displacement.
        self.pointer.begin_frame();

        for ev in &ctx.input_frame.events {
            match ev {
                InputEvent::PointerMoved(m) => {
                    self.pointer.move_to(Vec2::new(m.x, m.y));
                }
                InputEvent::PointerLeft => self.pointer.reset(),
                _ => {}
            }
        }

        // Toggles come from the edge set, which already excludes auto-repeat
        // and redundant press events against the held-key state.
        if ctx.input_frame.keys_pressed.contains(&Key::Escape) {
            return AppControl::Exit;
        }
        {
            let runtime = &mut *ctx.runtime;
            for key in &ctx.input_frame.keys_pressed {
                if let Some(applied) = self.options.apply_key(*key) {
                    // Only the changed option runs its side effect.
                    match applied {
                        Applied::Vsync(on) => runtime.set_vsync(on),
                        Applied::Fullscreen(on) => runtime.set_fullscreen(on),
                        Applied::PredictFrames(_)
                        | Applied::EarlyClear(_)
                        | Applied::ExtraSleep(_)
                        | Applied::Tearing(_) => {}
                    }
                    // A toggle invalidates the current report; show the new
                    // configuration immediately.
                    self.report.make_due();
                }
            }
        }

        self.sched.mark_input_done();

        // -------- draw --------
        let clear = clear_color(self.options.tearing, self.frame_counter);
        self.frame_counter = self.frame_counter.wrapping_add(1);

        let mut scene = match ctx.begin_scene(clear) {
            Ok(scene) => scene,
            Err(SceneError::Skipped) => {
                // Transient surface loss: close the iteration's timing
                // without pacing and try again next frame.
                self.sched.mark_draw_done();
                self.sched.mark_swap_done();
                self.sched.finish_iteration(false);
                return AppControl::Continue;
            }
            Err(SceneError::Fatal) => {
                log::error!("surface is gone; shutting down");
                return AppControl::Exit;
            }
        };

        if let Some(center) = self.pointer.predicted(self.options.predict_frames) {
            let segments = guide::cross_segments(center, GUIDE_COLOR);
            let lines = &mut self.lines;
            ctx.draw(&mut scene, |rctx, target| {
                lines.render(rctx, target, &segments);
            });
        }

        self.sched.mark_draw_done();

        // -------- swap --------
        ctx.present(scene);
        if self.options.early_clear {
            ctx.acquire_next_early(clear);
        }
        self.sched.mark_swap_done();

        // -------- sleep --------
        let sample = self.sched.finish_iteration(self.options.extra_sleep);

        // -------- report --------
        if self.report.due(self.sched.clock().now_micros()) {
            self.print_report(&sample);
        }

        AppControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lagscope_engine::input::{InputFrame, InputState, KeyState};

    fn press(state: &mut InputState, frame: &mut InputFrame, key: Key, repeat: bool) {
        state.apply_event(
            frame,
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                code: 0,
                repeat,
            },
        );
    }

    #[test]
    fn report_clock_is_readable_and_monotonic() {
        let app = ProbeApp::new();
        let a = app.sched.clock().now_micros();
        let b = app.sched.clock().now_micros();
        assert!(b >= a);
    }

    #[test]
    fn held_key_repeats_do_not_double_toggle() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        // One real press followed by platform auto-repeat within the frame.
        press(&mut state, &mut frame, Key::Digit1, false);
        for _ in 0..4 {
            press(&mut state, &mut frame, Key::Digit1, true);
        }

        // Apply the frame's edges the way the probe loop does.
        let mut options = OptionSet::default();
        for key in &frame.keys_pressed {
            options.apply_key(*key);
        }
        assert!(options.vsync, "one press edge flips the flag once");
    }

    #[test]
    fn tear_clear_alternates_only_when_enabled() {
        assert_eq!(clear_color(false, 0), CLEAR_NORMAL);
        assert_eq!(clear_color(false, 1), CLEAR_NORMAL);
        assert_eq!(clear_color(true, 0), CLEAR_TEAR);
        assert_eq!(clear_color(true, 1), CLEAR_NORMAL);
        assert_eq!(clear_color(true, 2), CLEAR_TEAR);
    }
}
