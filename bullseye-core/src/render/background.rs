//! Background layer
//!
//! Painted in order: base fill, center hub, outer band, inner band. It
//! has no time dependency and is only redrawn when the host invalidates it.

use embedded_graphics_core::primitives::Rectangle;

use super::draw_band;
use crate::config::FaceConfig;
use crate::geometry::DisplayGeometry;
use crate::traits::{Canvas, CanvasError};

/// Paint the background layer
pub fn draw_background<C: Canvas>(
    canvas: &mut C,
    layer_bounds: Rectangle,
    geometry: &DisplayGeometry,
    config: &FaceConfig,
) -> Result<(), CanvasError> {
    let palette = &config.palette;

    canvas.set_fill_color(palette.background.to_rgb565());
    canvas.fill_rect(layer_bounds)?;

    canvas.set_fill_color(palette.hub.to_rgb565());
    canvas.fill_circle(geometry.center(), u32::from(config.hub_radius))?;

    for (band, color) in config
        .bands
        .background_bands()
        .into_iter()
        .zip(palette.background_bands)
    {
        draw_band(canvas, geometry, band, color)?;
    }

    Ok(())
}
