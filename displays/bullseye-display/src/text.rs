//! Label text rendering
//!
//! Bundled face fonts map onto the built-in mono fonts. The symbol font's
//! private-use glyphs have no mono equivalent and render as the font's
//! replacement character.

use bullseye_core::config::FontResource;
use bullseye_core::traits::TextAlignment;
use embedded_graphics::draw_target::DrawTargetExt;
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_9X15_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

/// Mono font standing in for a bundled font resource
pub fn font_for(resource: FontResource) -> &'static MonoFont<'static> {
    match resource {
        FontResource::Day24 => &FONT_10X20,
        FontResource::Symbols64 => &FONT_9X15_BOLD,
    }
}

/// How a label is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelStyle {
    pub font: FontResource,
    pub color: Rgb565,
    /// `None` leaves the layer below visible
    pub background: Option<Rgb565>,
    pub alignment: TextAlignment,
}

/// Draw `text` into `frame`, clipped to the frame
pub fn draw_label<D>(
    target: &mut D,
    frame: Rectangle,
    text: &str,
    style: &LabelStyle,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let mut clipped = target.clipped(&frame);

    if let Some(background) = style.background {
        clipped.fill_solid(&frame, background)?;
    }
    if text.is_empty() {
        return Ok(());
    }

    let (alignment, x) = match style.alignment {
        TextAlignment::Left => (Alignment::Left, frame.top_left.x),
        TextAlignment::Center => (Alignment::Center, frame.center().x),
        TextAlignment::Right => (
            Alignment::Right,
            frame.top_left.x + frame.size.width as i32 - 1,
        ),
    };
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Top)
        .build();
    let character_style = MonoTextStyle::new(font_for(style.font), style.color);

    Text::with_text_style(
        text,
        Point::new(x, frame.top_left.y),
        character_style,
        text_style,
    )
    .draw(&mut clipped)?;
    Ok(())
}
