//! Hands layer
//!
//! Minute hand first, hour hand over it, then the second dot on top.
//! Every hand is a pure function of the wall-clock sample taken at the
//! start of the pass.

use crate::config::{FaceConfig, HourHandMode};
use crate::geometry::{DisplayGeometry, TrigAngle};
use crate::state::WallClock;
use crate::traits::{Canvas, CanvasError};

/// Hand directions for one wall-clock sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandAngles {
    pub hour: TrigAngle,
    pub minute: TrigAngle,
    pub second: TrigAngle,
}

impl HandAngles {
    /// Compute hand directions for `time`
    pub fn from_time(time: &WallClock, mode: HourHandMode) -> Self {
        let hour = match mode {
            HourHandMode::Stepped => TrigAngle::from_ratio(i32::from(time.dial_hour()), 12),
            HourHandMode::Sweeping => TrigAngle::from_ratio(
                i32::from(time.dial_hour()) * 60 + i32::from(time.minute),
                12 * 60,
            ),
        };

        Self {
            hour,
            minute: TrigAngle::from_ratio(i32::from(time.minute), 60),
            second: TrigAngle::from_ratio(i32::from(time.second), 60),
        }
    }
}

/// Paint the hands for `time`
///
/// Returns the angles that were drawn.
pub fn draw_hands<C: Canvas>(
    canvas: &mut C,
    geometry: &DisplayGeometry,
    config: &FaceConfig,
    time: &WallClock,
) -> Result<HandAngles, CanvasError> {
    let angles = HandAngles::from_time(time, config.hour_hand);
    let hands = &config.hands;
    let palette = &config.palette;
    let center = geometry.center();

    canvas.set_stroke_color(palette.minute_hand.to_rgb565());
    canvas.set_stroke_width(hands.minute_width);
    canvas.draw_line(
        center,
        geometry.point_of_polar(angles.minute, u32::from(hands.minute_length)),
    )?;

    canvas.set_stroke_color(palette.hour_hand.to_rgb565());
    canvas.set_stroke_width(hands.hour_width);
    canvas.draw_line(
        center,
        geometry.point_of_polar(angles.hour, u32::from(hands.hour_length)),
    )?;

    canvas.set_fill_color(palette.second_hand.to_rgb565());
    canvas.fill_circle(
        geometry.point_of_polar(angles.second, u32::from(hands.second_length)),
        u32::from(hands.second_radius),
    )?;

    Ok(angles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PaletteColor, Platform, TickUnit};
    use crate::geometry::TRIG_MAX_ANGLE;
    use crate::render::testing::{Op, Recorder};
    use embedded_graphics_core::geometry::Point;
    use proptest::prelude::*;

    #[test]
    fn test_angles_at_half_past_three() {
        let time = WallClock::new(3, 30, 45, 7);

        let stepped = HandAngles::from_time(&time, HourHandMode::Stepped);
        assert_eq!(stepped.hour.degrees(), 90.0);
        assert_eq!(stepped.minute.degrees(), 180.0);
        assert_eq!(stepped.second.degrees(), 270.0);

        let sweeping = HandAngles::from_time(&time, HourHandMode::Sweeping);
        assert!((sweeping.hour.degrees() - 105.0).abs() < 0.01);
        assert_eq!(sweeping.minute, stepped.minute);
    }

    #[test]
    fn test_pm_hours_share_the_dial() {
        let am = HandAngles::from_time(&WallClock::new(3, 0, 0, 1), HourHandMode::Stepped);
        let pm = HandAngles::from_time(&WallClock::new(15, 0, 0, 1), HourHandMode::Stepped);
        assert_eq!(am, pm);

        let midnight = HandAngles::from_time(&WallClock::new(0, 0, 0, 1), HourHandMode::Stepped);
        assert_eq!(midnight.hour, TrigAngle::ZERO);
    }

    #[test]
    fn test_stepped_hour_ignores_minutes() {
        let early = HandAngles::from_time(&WallClock::new(9, 0, 0, 1), HourHandMode::Stepped);
        let late = HandAngles::from_time(&WallClock::new(9, 59, 59, 1), HourHandMode::Stepped);
        assert_eq!(early.hour, late.hour);
    }

    #[test]
    fn test_draw_order() {
        let config = FaceConfig::for_platform(&Platform::RECTANGULAR);
        let geometry = DisplayGeometry::from_bounds(Platform::RECTANGULAR.bounds());
        let mut canvas = Recorder::default();
        let center = Point::new(72, 84);

        // 12:15:30 puts minute at 3 o'clock, hour at 12, second at 6
        draw_hands(&mut canvas, &geometry, &config, &WallClock::new(12, 15, 30, 1)).unwrap();

        assert_eq!(
            canvas.ops,
            [
                Op::Stroke(PaletteColor::WHITE.to_rgb565()),
                Op::Width(6),
                Op::Line(center, Point::new(150, 84)),
                Op::Stroke(PaletteColor::WHITE.to_rgb565()),
                Op::Width(8),
                Op::Line(center, Point::new(72, 31)),
                Op::Fill(PaletteColor::BLACK.to_rgb565()),
                Op::Circle(Point::new(72, 156), 7),
            ]
        );
    }

    #[test]
    fn test_minute_ticks_keep_second_dot() {
        let config = FaceConfig {
            tick_unit: TickUnit::Minute,
            ..FaceConfig::default()
        };
        let geometry = DisplayGeometry::from_bounds(config.platform.bounds());
        let mut canvas = Recorder::default();

        draw_hands(&mut canvas, &geometry, &config, &WallClock::new(8, 20, 40, 2)).unwrap();

        // The dot shows the second sampled at the last redraw
        let dots = canvas.ops.iter().filter(|op| matches!(op, Op::Circle(..))).count();
        assert_eq!(dots, 1);
        assert_eq!(canvas.ops.iter().filter(|op| matches!(op, Op::Line(..))).count(), 2);
    }

    proptest! {
        #[test]
        fn prop_minute_and_second_are_linear(minute in 0u8..60, second in 0u8..60) {
            let angles = HandAngles::from_time(
                &WallClock::new(0, minute, second, 1),
                HourHandMode::Stepped,
            );
            prop_assert_eq!(angles.minute.raw(), TRIG_MAX_ANGLE * i32::from(minute) / 60);
            prop_assert_eq!(angles.second.raw(), TRIG_MAX_ANGLE * i32::from(second) / 60);
        }

        #[test]
        fn prop_sweeping_hour_stays_within_its_step(hour in 0u8..24, minute in 0u8..60) {
            let time = WallClock::new(hour, minute, 0, 1);
            let stepped = HandAngles::from_time(&time, HourHandMode::Stepped).hour.raw();
            let sweeping = HandAngles::from_time(&time, HourHandMode::Sweeping).hour.raw();
            prop_assert!(sweeping >= stepped);
            prop_assert!(sweeping < stepped + TRIG_MAX_ANGLE / 12);
        }
    }
}
