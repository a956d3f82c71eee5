//! Face configuration
//!
//! Hand lengths, band insets, label placement and colours differ between
//! round and rectangular panels. `FaceConfig::for_platform` resolves them
//! once so the renderers never branch on the platform themselves.

use embedded_graphics_core::geometry::{Point, Size};
use embedded_graphics_core::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics_core::primitives::Rectangle;
use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::platform::{DisplayShape, Platform};

/// Maximum byte length of the disconnect glyph text
pub const MAX_GLYPH_LEN: usize = 8;

/// Glyph shown while the companion device is unreachable
pub const DISCONNECT_GLYPH: &str = "\u{F10B}";

/// Center hub radius in pixels
pub const HUB_RADIUS: u16 = 20;

/// Tick granularity requested from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TickUnit {
    /// One tick per second
    #[default]
    Second,
    /// One tick per minute
    Minute,
}

/// How the hour hand follows the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HourHandMode {
    /// Jumps on the hour, ignoring minutes
    #[default]
    Stepped,
    /// Advances with the minutes within the hour
    Sweeping,
}

/// Font resources the face asks the host to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FontResource {
    /// 24px numeral font for the day label
    Day24,
    /// 64px symbol font for the connectivity glyph
    Symbols64,
}

/// 24-bit `0xRRGGBB` colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PaletteColor(pub u32);

impl PaletteColor {
    pub const BLACK: Self = Self(0x000000);
    pub const WHITE: Self = Self(0xFFFFFF);
    pub const RED: Self = Self(0xFF0000);
    pub const YELLOW: Self = Self(0xFFFF00);
    pub const VIVID_CERULEAN: Self = Self(0x00AAFF);
    pub const ISLAMIC_GREEN: Self = Self(0x00AA00);
    pub const BULGARIAN_ROSE: Self = Self(0x550000);
    pub const OXFORD_BLUE: Self = Self(0x000055);

    /// Convert to the panel's RGB565 format
    pub fn to_rgb565(self) -> Rgb565 {
        let [_, r, g, b] = self.0.to_be_bytes();
        Rgb565::from(Rgb888::new(r, g, b))
    }
}

/// Face colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Palette {
    /// Full-bounds background fill
    pub background: PaletteColor,
    /// Center hub disc
    pub hub: PaletteColor,
    /// Background bands, outer then inner
    pub background_bands: [PaletteColor; 2],
    /// Foreground bands, outer then inner
    pub foreground_bands: [PaletteColor; 2],
    /// Minute hand stroke
    pub minute_hand: PaletteColor,
    /// Hour hand stroke
    pub hour_hand: PaletteColor,
    /// Second hand dot
    pub second_hand: PaletteColor,
    /// Day label text
    pub day_text: PaletteColor,
    /// Connectivity glyph text
    pub glyph_text: PaletteColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: PaletteColor::VIVID_CERULEAN,
            hub: PaletteColor::WHITE,
            background_bands: [PaletteColor::RED, PaletteColor::ISLAMIC_GREEN],
            foreground_bands: [PaletteColor::BULGARIAN_ROSE, PaletteColor::YELLOW],
            minute_hand: PaletteColor::WHITE,
            hour_hand: PaletteColor::WHITE,
            second_hand: PaletteColor::BLACK,
            day_text: PaletteColor::BLACK,
            glyph_text: PaletteColor::OXFORD_BLUE,
        }
    }
}

/// Hand dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HandConfig {
    /// Minute hand length from the center
    pub minute_length: u16,
    /// Hour hand length from the center
    pub hour_length: u16,
    /// Distance of the second dot from the center
    pub second_length: u16,
    /// Radius of the second dot
    pub second_radius: u16,
    /// Minute hand stroke width
    pub minute_width: u8,
    /// Hour hand stroke width
    pub hour_width: u8,
}

impl HandConfig {
    /// Hand dimensions for a display shape
    pub const fn for_shape(shape: DisplayShape) -> Self {
        let round = matches!(shape, DisplayShape::Round);
        Self {
            minute_length: if round { 80 } else { 78 },
            hour_length: 53,
            second_length: if round { 77 } else { 72 },
            second_radius: 7,
            minute_width: 6,
            hour_width: 8,
        }
    }
}

/// A radial band: ring inset from the display edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Band {
    /// Inset of the band's fit frame from the display bounds
    pub inset: i32,
    /// Ring thickness, measured inward from the outer edge
    pub thickness: u16,
}

/// Inset schedule for the decorative bands
///
/// The inset of band `k` is `fatness * k` on round panels and
/// `fatness * (k - 1)` on rectangular ones, so the same band indices work
/// for both shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BandSchedule {
    /// Band thickness constant
    pub fatness: u16,
    /// Use the round-panel inset formula
    pub round: bool,
}

impl BandSchedule {
    /// Schedule for a display shape
    pub const fn for_shape(shape: DisplayShape) -> Self {
        let round = matches!(shape, DisplayShape::Round);
        Self {
            fatness: if round { 14 } else { 13 },
            round,
        }
    }

    /// Inset for band index `index`
    pub const fn inset(&self, index: u16) -> i32 {
        let fatness = self.fatness as i32;
        if self.round {
            fatness * index as i32
        } else {
            fatness * (index as i32 - 1)
        }
    }

    /// Background bands, outer then inner
    pub const fn background_bands(&self) -> [Band; 2] {
        [self.background_band(2), self.background_band(4)]
    }

    /// Foreground bands, outer then inner
    pub const fn foreground_bands(&self) -> [Band; 2] {
        [self.foreground_band(1), self.foreground_band(3)]
    }

    const fn background_band(&self, index: u16) -> Band {
        Band {
            inset: self.inset(index) - 1,
            thickness: self.fatness + 2,
        }
    }

    const fn foreground_band(&self, index: u16) -> Band {
        Band {
            inset: self.inset(index),
            thickness: self.fatness,
        }
    }
}

/// Label frame in display coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelFrame {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

impl LabelFrame {
    pub const fn new(x: i16, y: i16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Frame as a rectangle
    pub fn to_rectangle(self) -> Rectangle {
        Rectangle::new(
            Point::new(i32::from(self.x), i32::from(self.y)),
            Size::new(u32::from(self.width), u32::from(self.height)),
        )
    }
}

/// Placement of the text labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelLayout {
    /// Day-of-month label
    pub day: LabelFrame,
    /// Connectivity glyph label
    pub glyph: LabelFrame,
}

impl LabelLayout {
    /// Label placement for a display shape
    pub const fn for_shape(shape: DisplayShape) -> Self {
        match shape {
            DisplayShape::Round => Self {
                day: LabelFrame::new(75, 75, 30, 24),
                glyph: LabelFrame::new(26, 50, 52, 64),
            },
            DisplayShape::Rectangular => Self {
                day: LabelFrame::new(57, 69, 30, 24),
                glyph: LabelFrame::new(10, 42, 52, 64),
            },
        }
    }
}

/// Complete face configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceConfig {
    /// Platform this configuration was resolved for
    pub platform: Platform,
    /// Hand dimensions
    pub hands: HandConfig,
    /// Band inset schedule
    pub bands: BandSchedule,
    /// Label placement
    pub labels: LabelLayout,
    /// Colours
    pub palette: Palette,
    /// Center hub radius
    pub hub_radius: u16,
    /// Tick granularity
    pub tick_unit: TickUnit,
    /// Hour hand behaviour
    pub hour_hand: HourHandMode,
    /// Text shown in the glyph label while disconnected
    pub disconnect_glyph: String<MAX_GLYPH_LEN>,
    /// Font for the day label
    pub day_font: FontResource,
    /// Font for the connectivity glyph
    pub glyph_font: FontResource,
}

impl FaceConfig {
    /// Resolve the configuration for a platform
    pub fn for_platform(platform: &Platform) -> Self {
        let mut disconnect_glyph = String::new();
        // Fits: the glyph is a single 3-byte code point
        let _ = disconnect_glyph.push_str(DISCONNECT_GLYPH);

        Self {
            platform: *platform,
            hands: HandConfig::for_shape(platform.shape),
            bands: BandSchedule::for_shape(platform.shape),
            labels: LabelLayout::for_shape(platform.shape),
            palette: Palette::default(),
            hub_radius: HUB_RADIUS,
            tick_unit: TickUnit::Second,
            hour_hand: HourHandMode::Stepped,
            disconnect_glyph,
            day_font: FontResource::Day24,
            glyph_font: FontResource::Symbols64,
        }
    }
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self::for_platform(&Platform::default())
    }
}
