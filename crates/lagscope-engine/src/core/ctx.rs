use winit::window::Window;

use crate::coords::Viewport;
use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::window::RuntimeCtx;

/// Per-window handles and window metadata.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Returns the logical window size as `(width, height)`.
    pub fn logical_size(&self) -> (f32, f32) {
        let phys = self.window.inner_size();
        let scale = self.window.scale_factor();
        let logi: winit::dpi::LogicalSize<f64> = phys.to_logical(scale);
        (logi.width as f32, logi.height as f32)
    }

    /// Current monitor refresh rate in whole Hz.
    ///
    /// Returns 0 when the query fails (no monitor, or the backend does not
    /// report a rate); callers must substitute a fallback rather than
    /// dividing by this value. Queried every frame: display and fullscreen
    /// changes move the window across refresh rates at any time.
    pub fn refresh_rate_hz(&self) -> u32 {
        self.window
            .current_monitor()
            .and_then(|m| m.refresh_rate_millihertz())
            .map(|mhz| mhz / 1_000)
            .unwrap_or(0)
    }
}

/// Why a scene could not be started this iteration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SceneError {
    /// Transient surface problem; skip this frame and continue.
    Skipped,
    /// Unrecoverable surface problem; the app should exit.
    Fatal,
}

/// An in-progress frame: acquired surface texture plus its clear pass.
pub struct Scene {
    frame: GpuFrame,
    viewport: Viewport,
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// The scene lifecycle is split into `begin_scene` / `draw` / `present` so
/// the app can timestamp each phase boundary of the render loop; a combined
/// render call would fold draw submission and presentation into one opaque
/// duration.
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Acquires the surface texture (or a pending early-acquired one) and
    /// records a clear pass with `clear`.
    pub fn begin_scene(&mut self, clear: Color) -> Result<Scene, SceneError> {
        let (w, h) = self.window.logical_size();

        match self.gpu.begin_frame() {
            Ok(mut frame) => {
                frame.record_clear(clear.to_wgpu());
                Ok(Scene {
                    frame,
                    viewport: Viewport::new(w, h),
                })
            }
            Err(err) => match self.gpu.handle_surface_error(err) {
                SurfaceErrorAction::Fatal => Err(SceneError::Fatal),
                SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                    Err(SceneError::Skipped)
                }
            },
        }
    }

    /// Runs `draw` with a ready [`RenderCtx`] and [`RenderTarget`] borrowing
    /// the scene's encoder.
    pub fn draw<F>(&mut self, scene: &mut Scene, draw: F)
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let rctx = RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
            scene.viewport,
        );
        let mut target = RenderTarget::new(&mut scene.frame.encoder, &scene.frame.view);
        draw(&rctx, &mut target);
    }

    /// Submits the scene's commands and presents the frame.
    pub fn present(&mut self, scene: Scene) {
        self.window.window.pre_present_notify();
        self.gpu.submit(scene.frame);
    }

    /// Early-clear experiment: acquire the next surface texture right after
    /// a present and record a clear into it, so the swapchain block lands in
    /// the swap phase instead of the next iteration's input phase.
    pub fn acquire_next_early(&mut self, clear: Color) {
        self.gpu.acquire_early(clear.to_wgpu());
    }
}
