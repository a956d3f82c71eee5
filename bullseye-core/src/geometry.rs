//! Polar geometry for the watch face
//!
//! Angles are measured clockwise from 12 o'clock as a fraction of a full
//! turn. Trigonometry is fixed-point (`TRIG_MAX_RATIO` scale) so callers
//! stay in integer pixel space.

use core::f32::consts::TAU;

use embedded_graphics_core::geometry::{Point, Size};
use embedded_graphics_core::primitives::Rectangle;

/// One full turn in `TrigAngle` units
pub const TRIG_MAX_ANGLE: i32 = 0x10000;

/// Fixed-point scale of `sin_lookup` / `cos_lookup` results
pub const TRIG_MAX_RATIO: i32 = 0xFFFF;

/// Angle as a fraction of a full turn (`TRIG_MAX_ANGLE` units)
///
/// The raw value is not normalized so that `FULL_TURN` can describe a
/// complete sweep; trigonometry wraps it modulo one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrigAngle(i32);

impl TrigAngle {
    /// 12 o'clock
    pub const ZERO: Self = Self(0);

    /// A complete turn, used as the end of full-circle sweeps
    pub const FULL_TURN: Self = Self(TRIG_MAX_ANGLE);

    /// Create from raw `TRIG_MAX_ANGLE` units
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Create from the ratio `num / den` of a full turn
    ///
    /// A zero denominator yields `ZERO`.
    pub const fn from_ratio(num: i32, den: i32) -> Self {
        if den == 0 {
            return Self::ZERO;
        }
        Self((TRIG_MAX_ANGLE as i64 * num as i64 / den as i64) as i32)
    }

    /// Create from whole degrees
    pub const fn from_degrees(degrees: i32) -> Self {
        Self::from_ratio(degrees, 360)
    }

    /// Raw value in `TRIG_MAX_ANGLE` units
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Same direction wrapped into `[0, TRIG_MAX_ANGLE)`
    pub const fn normalized(self) -> Self {
        Self(self.0.rem_euclid(TRIG_MAX_ANGLE))
    }

    /// Clockwise degrees from 12 o'clock in `[0, 360)`
    pub fn degrees(self) -> f32 {
        self.normalized().0 as f32 * 360.0 / TRIG_MAX_ANGLE as f32
    }

    /// Clockwise radians from 12 o'clock in `[0, TAU)`
    pub fn radians(self) -> f32 {
        self.normalized().0 as f32 * TAU / TRIG_MAX_ANGLE as f32
    }
}

/// Sine of `angle`, scaled by `TRIG_MAX_RATIO`
pub fn sin_lookup(angle: TrigAngle) -> i32 {
    libm::roundf(libm::sinf(angle.radians()) * TRIG_MAX_RATIO as f32) as i32
}

/// Cosine of `angle`, scaled by `TRIG_MAX_RATIO`
pub fn cos_lookup(angle: TrigAngle) -> i32 {
    libm::roundf(libm::cosf(angle.radians()) * TRIG_MAX_RATIO as f32) as i32
}

/// Integer division rounding half away from zero (`den` > 0)
fn div_round(num: i64, den: i64) -> i64 {
    if num < 0 {
        (num - den / 2) / den
    } else {
        (num + den / 2) / den
    }
}

/// Shrink `rect` by `inset` pixels on every edge
///
/// Negative insets grow the rectangle. The size saturates at zero.
pub fn inset_rect(rect: Rectangle, inset: i32) -> Rectangle {
    let shrink = |len: u32| (i64::from(len) - 2 * i64::from(inset)).max(0) as u32;
    Rectangle::new(
        Point::new(rect.top_left.x + inset, rect.top_left.y + inset),
        Size::new(shrink(rect.size.width), shrink(rect.size.height)),
    )
}

/// Largest circle that fits `frame`, centered in it
///
/// Returns `(center, diameter)`.
pub fn fit_circle(frame: Rectangle) -> (Point, u32) {
    let diameter = frame.size.width.min(frame.size.height);
    let center = Point::new(
        frame.top_left.x + (frame.size.width / 2) as i32,
        frame.top_left.y + (frame.size.height / 2) as i32,
    );
    (center, diameter)
}

/// Display bounds and center, derived once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayGeometry {
    bounds: Rectangle,
    center: Point,
}

impl DisplayGeometry {
    /// Derive geometry from the host's display bounds
    pub fn from_bounds(bounds: Rectangle) -> Self {
        let center = Point::new(
            bounds.top_left.x + (bounds.size.width / 2) as i32,
            bounds.top_left.y + (bounds.size.height / 2) as i32,
        );
        Self { bounds, center }
    }

    /// Display bounding rectangle
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Center point of the display
    pub fn center(&self) -> Point {
        self.center
    }

    /// Point at `radius` pixels from the center along `angle`
    ///
    /// Angle zero points up; positive angles turn clockwise.
    pub fn point_of_polar(&self, angle: TrigAngle, radius: u32) -> Point {
        let r = i64::from(radius);
        let ratio = i64::from(TRIG_MAX_RATIO);
        let dx = div_round(i64::from(sin_lookup(angle)) * r, ratio);
        let dy = div_round(-i64::from(cos_lookup(angle)) * r, ratio);
        Point::new(self.center.x + dx as i32, self.center.y + dy as i32)
    }

    /// Display bounds shrunk by `inset` pixels on every edge
    pub fn inset(&self, inset: i32) -> Rectangle {
        inset_rect(self.bounds, inset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn geometry() -> DisplayGeometry {
        DisplayGeometry::from_bounds(Rectangle::new(Point::zero(), Size::new(144, 168)))
    }

    #[test]
    fn test_center_from_bounds() {
        assert_eq!(geometry().center(), Point::new(72, 84));

        let round = DisplayGeometry::from_bounds(Rectangle::new(Point::zero(), Size::new(180, 180)));
        assert_eq!(round.center(), Point::new(90, 90));
    }

    #[test]
    fn test_angle_conversions() {
        assert_eq!(TrigAngle::from_ratio(30, 60).raw(), TRIG_MAX_ANGLE / 2);
        assert_eq!(TrigAngle::from_degrees(90).raw(), TRIG_MAX_ANGLE / 4);
        assert_eq!(TrigAngle::from_ratio(1, 0), TrigAngle::ZERO);
        assert_eq!(TrigAngle::FULL_TURN.normalized(), TrigAngle::ZERO);
        assert_eq!(TrigAngle::from_ratio(45, 60).degrees(), 270.0);
    }

    #[test]
    fn test_cardinal_points() {
        let g = geometry();
        assert_eq!(g.point_of_polar(TrigAngle::ZERO, 50), Point::new(72, 34));
        assert_eq!(g.point_of_polar(TrigAngle::from_degrees(90), 50), Point::new(122, 84));
        assert_eq!(g.point_of_polar(TrigAngle::from_degrees(180), 50), Point::new(72, 134));
        assert_eq!(g.point_of_polar(TrigAngle::from_degrees(270), 50), Point::new(22, 84));
    }

    #[test]
    fn test_zero_radius_is_center() {
        let g = geometry();
        assert_eq!(g.point_of_polar(TrigAngle::from_degrees(123), 0), g.center());
    }

    #[test]
    fn test_inset() {
        let g = geometry();
        let frame = g.inset(12);
        assert_eq!(frame.top_left, Point::new(12, 12));
        assert_eq!(frame.size, Size::new(120, 144));

        // Saturates instead of wrapping
        let collapsed = g.inset(100);
        assert_eq!(collapsed.size, Size::new(0, 0));
    }

    #[test]
    fn test_fit_circle() {
        let (center, diameter) = fit_circle(Rectangle::new(Point::new(12, 12), Size::new(120, 144)));
        assert_eq!(center, Point::new(72, 84));
        assert_eq!(diameter, 120);
    }

    proptest! {
        #[test]
        fn prop_point_lies_on_circle(raw in 0i32..TRIG_MAX_ANGLE, radius in 0u32..2000) {
            let g = geometry();
            let p = g.point_of_polar(TrigAngle::from_raw(raw), radius);
            let dx = (p.x - g.center().x) as f32;
            let dy = (p.y - g.center().y) as f32;
            let distance = libm::sqrtf(dx * dx + dy * dy);
            prop_assert!((distance - radius as f32).abs() <= 1.0);
        }

        #[test]
        fn prop_angle_wraps_modulo_turn(raw in 0i32..TRIG_MAX_ANGLE, radius in 0u32..500) {
            let g = geometry();
            let once = g.point_of_polar(TrigAngle::from_raw(raw), radius);
            let wrapped = g.point_of_polar(TrigAngle::from_raw(raw + TRIG_MAX_ANGLE), radius);
            prop_assert_eq!(once, wrapped);
        }

        #[test]
        fn prop_first_quadrant_is_up_and_right(raw in 1i32..(TRIG_MAX_ANGLE / 4), radius in 100u32..500) {
            let g = geometry();
            let p = g.point_of_polar(TrigAngle::from_raw(raw), radius);
            prop_assert!(p.x >= g.center().x);
            prop_assert!(p.y <= g.center().y);
        }
    }
}
