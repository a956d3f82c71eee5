//! Foreground layer
//!
//! Two narrow bands drawn over the hands. The day and connectivity labels
//! are children of this layer and are composited by the host on top.

use super::draw_band;
use crate::config::FaceConfig;
use crate::geometry::DisplayGeometry;
use crate::traits::{Canvas, CanvasError};

/// Paint the foreground bands
pub fn draw_foreground<C: Canvas>(
    canvas: &mut C,
    geometry: &DisplayGeometry,
    config: &FaceConfig,
) -> Result<(), CanvasError> {
    for (band, color) in config
        .bands
        .foreground_bands()
        .into_iter()
        .zip(config.palette.foreground_bands)
    {
        draw_band(canvas, geometry, band, color)?;
    }

    Ok(())
}
