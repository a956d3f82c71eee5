//! In-memory RGB565 frame buffer
//!
//! Pixels are stored row-major in the panel's native 16-bit format so a
//! driver can stream the buffer straight out.

use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Frame buffer construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameBufferError {
    /// Storage is smaller than `width * height`
    StorageTooSmall,
}

/// RGB565 draw target over borrowed storage
pub struct FrameBuffer<'fb> {
    pixels: &'fb mut [u16],
    width: u32,
    height: u32,
}

impl<'fb> FrameBuffer<'fb> {
    /// Wrap `pixels` as a `width` x `height` buffer
    pub fn new(pixels: &'fb mut [u16], width: u32, height: u32) -> Result<Self, FrameBufferError> {
        let needed = (width as usize).saturating_mul(height as usize);
        if pixels.len() < needed {
            return Err(FrameBufferError::StorageTooSmall);
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Colour at `point`, `None` outside the buffer
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index(point)
            .map(|index| Rgb565::from(RawU16::new(self.pixels[index])))
    }

    /// Raw row-major pixel storage
    pub fn as_raw(&self) -> &[u16] {
        &self.pixels[..(self.width * self.height) as usize]
    }

    fn index(&self, point: Point) -> Option<usize> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }
}

impl OriginDimensions for FrameBuffer<'_> {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Rgb565>>,
    {
        for Pixel(point, color) in pixels {
            // Clip silently
            if let Some(index) = self.index(point) {
                self.pixels[index] = color.into_storage();
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        let raw = color.into_storage();
        for y in area.top_left.y..=bottom_right.y {
            let row = (y as u32 * self.width) as usize;
            let start = row + area.top_left.x as usize;
            let end = row + bottom_right.x as usize + 1;
            self.pixels[start..end].fill(raw);
        }
        Ok(())
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        let len = (self.width * self.height) as usize;
        self.pixels[..len].fill(color.into_storage());
        Ok(())
    }
}
