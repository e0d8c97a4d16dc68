use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the probe.
pub trait App {
    /// Called for raw window events, after the runtime's own translation.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per loop iteration.
    ///
    /// The app owns the iteration order (input → draw → present → wait →
    /// report) and may block inside this call for pacing; the runtime will
    /// not deliver events until it returns.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
