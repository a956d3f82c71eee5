//! Connectivity overlay text

use crate::config::FaceConfig;

/// Text for the connectivity glyph label
///
/// Empty while connected; the configured glyph otherwise.
pub fn glyph_text(connected: bool, config: &FaceConfig) -> &str {
    if connected {
        ""
    } else {
        config.disconnect_glyph.as_str()
    }
}
