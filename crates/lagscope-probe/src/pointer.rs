use lagscope_engine::coords::Vec2;

/// Pointer position tracking with a per-frame velocity estimate.
///
/// Velocity is the displacement between the position at the end of the
/// previous frame and the latest position this frame. `begin_frame` must run
/// before the frame's events are drained, so that several move events within
/// one frame collapse into a single displacement instead of measuring only
/// the last hop.
#[derive(Debug, Default)]
pub struct PointerTrack {
    current: Option<Vec2>,
    previous: Option<Vec2>,
}

impl PointerTrack {
    /// Snapshots the previous-frame position. Call once per frame, before
    /// applying pointer events.
    pub fn begin_frame(&mut self) {
        self.previous = self.current;
    }

    pub fn move_to(&mut self, pos: Vec2) {
        self.current = Some(pos);
    }

    /// Pointer left the window; both positions are forgotten so velocity
    /// does not spike when it re-enters somewhere else.
    pub fn reset(&mut self) {
        self.current = None;
        self.previous = None;
    }

    pub fn position(&self) -> Option<Vec2> {
        self.current
    }

    /// Displacement since the previous frame. Zero when either end is
    /// unknown.
    pub fn velocity(&self) -> Vec2 {
        match (self.current, self.previous) {
            (Some(c), Some(p)) => c - p,
            _ => Vec2::zero(),
        }
    }

    /// Position extrapolated `frames` frames ahead along the current
    /// velocity. Negative `frames` extrapolates backwards.
    pub fn predicted(&self, frames: i32) -> Option<Vec2> {
        self.current.map(|p| p + self.velocity() * frames as f32)
    }
}
