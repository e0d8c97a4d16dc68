use lagscope_engine::coords::Vec2;
use lagscope_engine::paint::Color;
use lagscope_engine::render::Segment;

/// Half-length of each arm of the guide cross, in logical pixels.
pub const CROSS_ARM: f32 = 100.0;

/// Builds the axis-aligned cross centered on `center`.
///
/// Long thin arms make the perceived gap between the cross and the hardware
/// cursor easy to judge while the pointer is moving.
pub fn cross_segments(center: Vec2, color: Color) -> [Segment; 2] {
    [
        Segment::new(
            Vec2::new(center.x, center.y - CROSS_ARM),
            Vec2::new(center.x, center.y + CROSS_ARM),
            color,
        ),
        Segment::new(
            Vec2::new(center.x - CROSS_ARM, center.y),
            Vec2::new(center.x + CROSS_ARM, center.y),
            color,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arms_are_centered_and_axis_aligned() {
        let c = Vec2::new(320.0, 240.0);
        let [vertical, horizontal] = cross_segments(c, Color::rgb(1.0, 0.0, 0.0));

        assert_eq!(vertical.a, Vec2::new(320.0, 140.0));
        assert_eq!(vertical.b, Vec2::new(320.0, 340.0));
        assert_eq!(horizontal.a, Vec2::new(220.0, 240.0));
        assert_eq!(horizontal.b, Vec2::new(420.0, 240.0));
    }

    #[test]
    fn color_applies_to_both_segments() {
        let color = Color::rgb(1.0, 0.0, 0.0);
        let segs = cross_segments(Vec2::zero(), color);
        assert!(segs.iter().all(|s| s.color == color));
    }
}
