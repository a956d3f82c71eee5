//! Face canvas over an embedded-graphics draw target

use bullseye_core::geometry::{fit_circle, TrigAngle};
use bullseye_core::traits::{Canvas, CanvasError};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Arc, Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
};

/// Drawing context bound to a draw target for one redraw pass
pub struct GraphicsCanvas<'a, D> {
    target: &'a mut D,
    fill: Rgb565,
    stroke: Rgb565,
    stroke_width: u8,
}

impl<'a, D> GraphicsCanvas<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap a draw target; fill and stroke start black, one pixel wide
    pub fn new(target: &'a mut D) -> Self {
        Self {
            target,
            fill: Rgb565::BLACK,
            stroke: Rgb565::BLACK,
            stroke_width: 1,
        }
    }

    /// Current fill colour
    pub fn fill_color(&self) -> Rgb565 {
        self.fill
    }

    fn draw<P>(&mut self, primitive: P) -> Result<(), CanvasError>
    where
        P: Drawable<Color = Rgb565>,
    {
        primitive
            .draw(&mut *self.target)
            .map(|_| ())
            .map_err(|_| CanvasError::Surface)
    }
}

impl<D> Canvas for GraphicsCanvas<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn set_fill_color(&mut self, color: Rgb565) {
        self.fill = color;
    }

    fn set_stroke_color(&mut self, color: Rgb565) {
        self.stroke = color;
    }

    fn set_stroke_width(&mut self, width: u8) {
        self.stroke_width = width;
    }

    fn fill_rect(&mut self, rect: Rectangle) -> Result<(), CanvasError> {
        let style = PrimitiveStyle::with_fill(self.fill);
        self.draw(rect.into_styled(style))
    }

    fn fill_circle(&mut self, center: Point, radius: u32) -> Result<(), CanvasError> {
        let style = PrimitiveStyle::with_fill(self.fill);
        self.draw(Circle::with_center(center, radius * 2 + 1).into_styled(style))
    }

    fn fill_radial(
        &mut self,
        frame: Rectangle,
        thickness: u32,
        start: TrigAngle,
        end: TrigAngle,
    ) -> Result<(), CanvasError> {
        let (center, diameter) = fit_circle(frame);
        if diameter == 0 || thickness == 0 {
            return Ok(());
        }

        let style = PrimitiveStyleBuilder::new()
            .stroke_color(self.fill)
            .stroke_width(thickness)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();

        let sweep = end.raw() - start.raw();
        if sweep.abs() >= TrigAngle::FULL_TURN.raw() {
            return self.draw(Circle::with_center(center, diameter).into_styled(style));
        }

        // embedded-graphics measures from 3 o'clock, also clockwise
        let start_deg = start.raw() as f32 * 360.0 / TrigAngle::FULL_TURN.raw() as f32 - 90.0;
        let sweep_deg = sweep as f32 * 360.0 / TrigAngle::FULL_TURN.raw() as f32;
        let arc = Arc::with_center(
            center,
            diameter,
            Angle::from_degrees(start_deg),
            Angle::from_degrees(sweep_deg),
        );
        self.draw(arc.into_styled(style))
    }

    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), CanvasError> {
        let style = PrimitiveStyle::with_stroke(self.stroke, u32::from(self.stroke_width));
        self.draw(Line::new(from, to).into_styled(style))
    }
}
