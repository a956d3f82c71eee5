//! Face configuration overrides from TOML
//!
//! ```toml
//! [face]
//! shape = "round"          # or "rectangular"
//! tick_unit = "minute"     # or "second"
//! hour_hand = "sweeping"   # or "stepped"
//! hub_radius = 18
//! disconnect_glyph = "!"
//!
//! [palette]
//! background = "#00AAFF"
//! background_bands = ["#FF0000", "#00AA00"]
//!
//! [hands]
//! minute_length = 70
//! ```
//!
//! `shape` resets every shape-dependent value, so it is applied first.
//! All problems are collected and reported together. [`dump_face_config`]
//! writes a resolved configuration back out in this format.

use std::path::Path;

use bullseye_core::config::{
    DisplayShape, FaceConfig, HandConfig, HourHandMode, Palette, PaletteColor, Platform, TickUnit,
    MAX_GLYPH_LEN,
};
use heapless::String as HString;
use log::info;
use serde::Serialize;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config:\n  {}", .0.join("\n  "))]
    Invalid(Vec<String>),
}

/// Load `path` and apply it on top of `base`
pub fn load_face_config(path: &Path, base: FaceConfig) -> Result<FaceConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_face_config(&content, base)?;
    info!("Loaded face config from {}", path.display());
    Ok(config)
}

/// Apply TOML overrides in `input` on top of `base`
pub fn parse_face_config(input: &str, base: FaceConfig) -> Result<FaceConfig, ConfigError> {
    let value: toml::Value = toml::from_str(input)?;
    let mut config = base;
    let mut errors = Vec::new();

    if let Some(face) = table(&value, "face", &mut errors) {
        apply_face(face, &mut config, &mut errors);
    }
    if let Some(palette) = table(&value, "palette", &mut errors) {
        apply_palette(palette, &mut config, &mut errors);
    }
    if let Some(hands) = table(&value, "hands", &mut errors) {
        apply_hands(hands, &mut config, &mut errors);
    }

    if errors.is_empty() {
        Ok(config)
    } else {
        Err(ConfigError::Invalid(errors))
    }
}

/// Tables written by [`dump_face_config`]
#[derive(Debug, Serialize)]
struct FaceOverrides<'a> {
    face: FaceSection<'a>,
    palette: &'a Palette,
    hands: &'a HandConfig,
}

#[derive(Debug, Serialize)]
struct FaceSection<'a> {
    shape: &'static str,
    tick_unit: &'static str,
    hour_hand: &'static str,
    hub_radius: u16,
    disconnect_glyph: &'a str,
}

/// Write `config` as overrides that [`parse_face_config`] reads back
///
/// Geometry that follows from the shape is not written; `shape` restores it
/// from the stock platform.
pub fn dump_face_config(config: &FaceConfig) -> Result<String, toml::ser::Error> {
    let overrides = FaceOverrides {
        face: FaceSection {
            shape: match config.platform.shape {
                DisplayShape::Round => "round",
                DisplayShape::Rectangular => "rectangular",
            },
            tick_unit: match config.tick_unit {
                TickUnit::Second => "second",
                TickUnit::Minute => "minute",
            },
            hour_hand: match config.hour_hand {
                HourHandMode::Stepped => "stepped",
                HourHandMode::Sweeping => "sweeping",
            },
            hub_radius: config.hub_radius,
            disconnect_glyph: config.disconnect_glyph.as_str(),
        },
        palette: &config.palette,
        hands: &config.hands,
    };
    toml::to_string_pretty(&overrides)
}

fn table<'a>(
    value: &'a toml::Value,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::value::Table> {
    match value.get(name) {
        None => None,
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
    }
}

fn apply_face(face: &toml::value::Table, config: &mut FaceConfig, errors: &mut Vec<String>) {
    if let Some(shape) = face.get("shape") {
        match shape.as_str() {
            Some("round") => *config = reshape(config, Platform::ROUND),
            Some("rectangular") => *config = reshape(config, Platform::RECTANGULAR),
            _ => errors.push("[face] shape must be 'round' or 'rectangular'".to_string()),
        }
    }

    if let Some(unit) = face.get("tick_unit") {
        match unit.as_str() {
            Some("second") => config.tick_unit = TickUnit::Second,
            Some("minute") => config.tick_unit = TickUnit::Minute,
            _ => errors.push("[face] tick_unit must be 'second' or 'minute'".to_string()),
        }
    }

    if let Some(mode) = face.get("hour_hand") {
        match mode.as_str() {
            Some("stepped") => config.hour_hand = HourHandMode::Stepped,
            Some("sweeping") => config.hour_hand = HourHandMode::Sweeping,
            _ => errors.push("[face] hour_hand must be 'stepped' or 'sweeping'".to_string()),
        }
    }

    if let Some(radius) = face.get("hub_radius") {
        match radius.as_integer().and_then(|r| u16::try_from(r).ok()) {
            Some(r) if r <= 90 => config.hub_radius = r,
            _ => errors.push("[face] hub_radius must be 0-90".to_string()),
        }
    }

    if let Some(glyph) = face.get("disconnect_glyph") {
        let parsed = glyph
            .as_str()
            .and_then(|s| HString::<MAX_GLYPH_LEN>::try_from(s).ok());
        match parsed {
            Some(glyph) if !glyph.is_empty() => config.disconnect_glyph = glyph,
            _ => errors.push(format!(
                "[face] disconnect_glyph must be a non-empty string of at most {} bytes",
                MAX_GLYPH_LEN
            )),
        }
    }
}

/// Resolve `platform` while keeping the non-shape settings of `config`
fn reshape(config: &FaceConfig, platform: Platform) -> FaceConfig {
    FaceConfig {
        palette: config.palette,
        tick_unit: config.tick_unit,
        hour_hand: config.hour_hand,
        disconnect_glyph: config.disconnect_glyph.clone(),
        ..FaceConfig::for_platform(&platform)
    }
}

fn apply_palette(palette: &toml::value::Table, config: &mut FaceConfig, errors: &mut Vec<String>) {
    let p = &mut config.palette;
    let singles: [(&str, &mut PaletteColor); 7] = [
        ("background", &mut p.background),
        ("hub", &mut p.hub),
        ("minute_hand", &mut p.minute_hand),
        ("hour_hand", &mut p.hour_hand),
        ("second_hand", &mut p.second_hand),
        ("day_text", &mut p.day_text),
        ("glyph_text", &mut p.glyph_text),
    ];
    for (key, slot) in singles {
        if let Some(value) = palette.get(key) {
            match parse_color(value) {
                Some(color) => *slot = color,
                None => errors.push(format!("[palette] {} is not a colour", key)),
            }
        }
    }

    let pairs: [(&str, &mut [PaletteColor; 2]); 2] = [
        ("background_bands", &mut p.background_bands),
        ("foreground_bands", &mut p.foreground_bands),
    ];
    for (key, slot) in pairs {
        if let Some(value) = palette.get(key) {
            let colors: Option<Vec<PaletteColor>> = value
                .as_array()
                .and_then(|items| items.iter().map(parse_color).collect());
            match colors.as_deref() {
                Some(&[outer, inner]) => *slot = [outer, inner],
                _ => errors.push(format!("[palette] {} must be two colours", key)),
            }
        }
    }
}

fn apply_hands(hands: &toml::value::Table, config: &mut FaceConfig, errors: &mut Vec<String>) {
    let h = &mut config.hands;
    let lengths: [(&str, &mut u16); 4] = [
        ("minute_length", &mut h.minute_length),
        ("hour_length", &mut h.hour_length),
        ("second_length", &mut h.second_length),
        ("second_radius", &mut h.second_radius),
    ];
    for (key, slot) in lengths {
        if let Some(value) = hands.get(key) {
            match value.as_integer().and_then(|v| u16::try_from(v).ok()) {
                Some(v) if v <= 200 => *slot = v,
                _ => errors.push(format!("[hands] {} must be 0-200", key)),
            }
        }
    }

    let widths: [(&str, &mut u8); 2] = [
        ("minute_width", &mut h.minute_width),
        ("hour_width", &mut h.hour_width),
    ];
    for (key, slot) in widths {
        if let Some(value) = hands.get(key) {
            match value.as_integer().and_then(|v| u8::try_from(v).ok()) {
                Some(v) if v > 0 => *slot = v,
                _ => errors.push(format!("[hands] {} must be 1-255", key)),
            }
        }
    }
}

/// `"#RRGGBB"` string or `0xRRGGBB` integer
fn parse_color(value: &toml::Value) -> Option<PaletteColor> {
    let rgb = match value {
        toml::Value::String(s) => {
            let hex = s.strip_prefix('#')?;
            if hex.len() != 6 {
                return None;
            }
            u32::from_str_radix(hex, 16).ok()?
        }
        toml::Value::Integer(i) => u32::try_from(*i).ok()?,
        _ => return None,
    };
    (rgb <= 0xFF_FFFF).then_some(PaletteColor(rgb))
}
