//! Face renderers
//!
//! Three layers composited bottom to top:
//!
//! - **Background**: base fill, center hub, two wide bands. Static.
//! - **Hands**: minute, hour and second hands. Redrawn every tick.
//! - **Foreground**: two narrow bands over the hands, plus the day and
//!   connectivity labels. Redrawn on show and on connectivity changes.

pub mod background;
pub mod foreground;
pub mod hands;
pub mod overlay;

pub use background::draw_background;
pub use foreground::draw_foreground;
pub use hands::{draw_hands, HandAngles};
pub use overlay::glyph_text;

use crate::config::{Band, PaletteColor};
use crate::geometry::{DisplayGeometry, TrigAngle};
use crate::traits::{Canvas, CanvasError};

/// Role of a face layer, in z-order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayerRole {
    Background,
    Hands,
    Foreground,
}

impl LayerRole {
    /// All roles, bottom to top
    pub const ALL: [LayerRole; 3] = [LayerRole::Background, LayerRole::Hands, LayerRole::Foreground];

    /// Position in the composition stack (0 is the bottom)
    pub const fn z_index(self) -> usize {
        match self {
            LayerRole::Background => 0,
            LayerRole::Hands => 1,
            LayerRole::Foreground => 2,
        }
    }
}

/// Paint a full-circle band inset from the display bounds
pub(crate) fn draw_band<C: Canvas>(
    canvas: &mut C,
    geometry: &DisplayGeometry,
    band: Band,
    color: PaletteColor,
) -> Result<(), CanvasError> {
    canvas.set_fill_color(color.to_rgb565());
    canvas.fill_radial(
        geometry.inset(band.inset),
        u32::from(band.thickness),
        TrigAngle::ZERO,
        TrigAngle::FULL_TURN,
    )
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording canvas for renderer tests

    use super::*;
    use embedded_graphics_core::geometry::Point;
    use embedded_graphics_core::pixelcolor::Rgb565;
    use embedded_graphics_core::primitives::Rectangle;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Fill(Rgb565),
        Stroke(Rgb565),
        Width(u8),
        Rect(Rectangle),
        Circle(Point, u32),
        Radial(Rectangle, u32),
        Line(Point, Point),
    }

    #[derive(Debug, Default)]
    pub struct Recorder {
        pub ops: std::vec::Vec<Op>,
    }

    impl Canvas for Recorder {
        fn set_fill_color(&mut self, color: Rgb565) {
            self.ops.push(Op::Fill(color));
        }

        fn set_stroke_color(&mut self, color: Rgb565) {
            self.ops.push(Op::Stroke(color));
        }

        fn set_stroke_width(&mut self, width: u8) {
            self.ops.push(Op::Width(width));
        }

        fn fill_rect(&mut self, rect: Rectangle) -> Result<(), CanvasError> {
            self.ops.push(Op::Rect(rect));
            Ok(())
        }

        fn fill_circle(&mut self, center: Point, radius: u32) -> Result<(), CanvasError> {
            self.ops.push(Op::Circle(center, radius));
            Ok(())
        }

        fn fill_radial(
            &mut self,
            frame: Rectangle,
            thickness: u32,
            _start: TrigAngle,
            _end: TrigAngle,
        ) -> Result<(), CanvasError> {
            self.ops.push(Op::Radial(frame, thickness));
            Ok(())
        }

        fn draw_line(&mut self, from: Point, to: Point) -> Result<(), CanvasError> {
            self.ops.push(Op::Line(from, to));
            Ok(())
        }
    }
}
