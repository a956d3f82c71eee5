//! embedded-graphics backend for the Bullseye watch face
//!
//! This crate provides:
//! - `GraphicsCanvas`, a face `Canvas` over any RGB565 `DrawTarget`
//! - `FrameBuffer`, an in-memory RGB565 draw target
//! - Label text rendering with the built-in mono fonts
//!
//! A panel driver only has to implement `DrawTarget<Color = Rgb565>` to
//! show the face; the simulator uses `FrameBuffer`.

#![no_std]
#![deny(unsafe_code)]

pub mod canvas;
pub mod framebuffer;
pub mod text;

pub use canvas::GraphicsCanvas;
pub use framebuffer::{FrameBuffer, FrameBufferError};
pub use text::{draw_label, font_for, LabelStyle};

#[cfg(test)]
mod tests {
    use super::*;
    use bullseye_core::config::{FaceConfig, PaletteColor, Platform};
    use bullseye_core::render::{draw_background, draw_foreground};
    use bullseye_core::DisplayGeometry;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::*;

    const W: u32 = 144;
    const H: u32 = 168;

    #[test]
    fn test_background_pixels() {
        let config = FaceConfig::for_platform(&Platform::RECTANGULAR);
        let bounds = Platform::RECTANGULAR.bounds();
        let geometry = DisplayGeometry::from_bounds(bounds);
        let mut pixels = [0u16; (W * H) as usize];
        let mut fb = FrameBuffer::new(&mut pixels, W, H).unwrap();

        draw_background(&mut GraphicsCanvas::new(&mut fb), bounds, &geometry, &config).unwrap();

        let color = |x, y| fb.pixel(Point::new(x, y));
        assert_eq!(color(2, 2), Some(PaletteColor::VIVID_CERULEAN.to_rgb565()));
        assert_eq!(color(72, 84), Some(PaletteColor::WHITE.to_rgb565()));
        // 50px above center: outer band
        assert_eq!(color(72, 34), Some(PaletteColor::RED.to_rgb565()));
        // 25px above center: inner band
        assert_eq!(color(72, 59), Some(PaletteColor::ISLAMIC_GREEN.to_rgb565()));
        // Gap between the bands
        assert_eq!(color(72, 44), Some(PaletteColor::VIVID_CERULEAN.to_rgb565()));
    }

    #[test]
    fn test_foreground_edge_band() {
        let config = FaceConfig::for_platform(&Platform::RECTANGULAR);
        let geometry = DisplayGeometry::from_bounds(Platform::RECTANGULAR.bounds());
        let mut pixels = [0u16; (W * H) as usize];
        let mut fb = FrameBuffer::new(&mut pixels, W, H).unwrap();

        draw_foreground(&mut GraphicsCanvas::new(&mut fb), &geometry, &config).unwrap();

        // Outer ring touches the left and right edges at mid-height
        assert_eq!(fb.pixel(Point::new(3, 84)), Some(PaletteColor::BULGARIAN_ROSE.to_rgb565()));
        assert_eq!(fb.pixel(Point::new(72, 84)), Some(Rgb565::BLACK));
    }
}
