//! Drawing context trait

use embedded_graphics_core::geometry::Point;
use embedded_graphics_core::pixelcolor::Rgb565;
use embedded_graphics_core::primitives::Rectangle;

use crate::geometry::TrigAngle;

/// Errors reported by a drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanvasError {
    /// The underlying surface rejected the draw
    #[error("surface rejected the draw")]
    Surface,
    /// The draw list or command buffer is full
    #[error("draw buffer is full")]
    BufferOverflow,
}

/// Drawing context handed to a layer's redraw callback
///
/// Colours and stroke width are context state, set before the primitives
/// that use them.
pub trait Canvas {
    /// Set the colour used by fills
    fn set_fill_color(&mut self, color: Rgb565);

    /// Set the colour used by lines
    fn set_stroke_color(&mut self, color: Rgb565);

    /// Set the line width in pixels
    fn set_stroke_width(&mut self, width: u8);

    /// Fill a rectangle with the fill colour
    fn fill_rect(&mut self, rect: Rectangle) -> Result<(), CanvasError>;

    /// Fill a disc of `radius` pixels around `center`
    fn fill_circle(&mut self, center: Point, radius: u32) -> Result<(), CanvasError>;

    /// Fill a radial band
    ///
    /// The band's outer edge is the largest circle fitting `frame`; it
    /// extends `thickness` pixels inward and sweeps clockwise from `start`
    /// to `end` (12 o'clock is zero).
    fn fill_radial(
        &mut self,
        frame: Rectangle,
        thickness: u32,
        start: TrigAngle,
        end: TrigAngle,
    ) -> Result<(), CanvasError>;

    /// Draw a line with the stroke colour and width
    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), CanvasError>;
}
