//! Retained per-layer drawing
//!
//! A layer's redraw callback records into a `DrawList`; the compositor
//! replays the last list of every layer each frame, so layers that were
//! not invalidated keep their previous content.

use bullseye_core::traits::{Canvas, CanvasError};
use bullseye_core::TrigAngle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;
use embedded_graphics::primitives::Rectangle;

/// Upper bound on commands per layer
pub const MAX_COMMANDS: usize = 256;

/// One recorded canvas call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    FillColor(Rgb565),
    StrokeColor(Rgb565),
    StrokeWidth(u8),
    FillRect(Rectangle),
    FillCircle { center: Point, radius: u32 },
    FillRadial {
        frame: Rectangle,
        thickness: u32,
        start: TrigAngle,
        end: TrigAngle,
    },
    Line { from: Point, to: Point },
}

/// Recorded canvas calls for one layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay every command onto `canvas`
    pub fn replay<C: Canvas>(&self, canvas: &mut C) -> Result<(), CanvasError> {
        for command in &self.commands {
            match *command {
                DrawCommand::FillColor(color) => canvas.set_fill_color(color),
                DrawCommand::StrokeColor(color) => canvas.set_stroke_color(color),
                DrawCommand::StrokeWidth(width) => canvas.set_stroke_width(width),
                DrawCommand::FillRect(rect) => canvas.fill_rect(rect)?,
                DrawCommand::FillCircle { center, radius } => canvas.fill_circle(center, radius)?,
                DrawCommand::FillRadial {
                    frame,
                    thickness,
                    start,
                    end,
                } => canvas.fill_radial(frame, thickness, start, end)?,
                DrawCommand::Line { from, to } => canvas.draw_line(from, to)?,
            }
        }
        Ok(())
    }

    fn push(&mut self, command: DrawCommand) -> Result<(), CanvasError> {
        if self.commands.len() >= MAX_COMMANDS {
            return Err(CanvasError::BufferOverflow);
        }
        self.commands.push(command);
        Ok(())
    }

    /// Count of drawing primitives, ignoring context state changes
    pub fn primitives(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                !matches!(
                    c,
                    DrawCommand::FillColor(_) | DrawCommand::StrokeColor(_) | DrawCommand::StrokeWidth(_)
                )
            })
            .count()
    }
}

impl Canvas for DrawList {
    // State changes are dropped once the list is full. Every later primitive
    // overflows too, so only primitives report it.
    fn set_fill_color(&mut self, color: Rgb565) {
        let _ = self.push(DrawCommand::FillColor(color));
    }

    fn set_stroke_color(&mut self, color: Rgb565) {
        let _ = self.push(DrawCommand::StrokeColor(color));
    }

    fn set_stroke_width(&mut self, width: u8) {
        let _ = self.push(DrawCommand::StrokeWidth(width));
    }

    fn fill_rect(&mut self, rect: Rectangle) -> Result<(), CanvasError> {
        self.push(DrawCommand::FillRect(rect))
    }

    fn fill_circle(&mut self, center: Point, radius: u32) -> Result<(), CanvasError> {
        self.push(DrawCommand::FillCircle { center, radius })
    }

    fn fill_radial(
        &mut self,
        frame: Rectangle,
        thickness: u32,
        start: TrigAngle,
        end: TrigAngle,
    ) -> Result<(), CanvasError> {
        self.push(DrawCommand::FillRadial {
            frame,
            thickness,
            start,
            end,
        })
    }

    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), CanvasError> {
        self.push(DrawCommand::Line { from, to })
    }
}
