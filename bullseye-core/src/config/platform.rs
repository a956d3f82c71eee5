//! Platform descriptor
//!
//! Describes the display the face runs on. Everything shape-dependent in
//! `FaceConfig` is derived from this once.

use embedded_graphics_core::geometry::{Point, Size};
use embedded_graphics_core::primitives::Rectangle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical display shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DisplayShape {
    /// Circular panel
    Round,
    /// Rectangular panel
    #[default]
    Rectangular,
}

/// Display platform descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Platform {
    /// Panel shape
    pub shape: DisplayShape,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Platform {
    /// 180x180 round panel
    pub const ROUND: Self = Self {
        shape: DisplayShape::Round,
        width: 180,
        height: 180,
    };

    /// 144x168 rectangular panel
    pub const RECTANGULAR: Self = Self {
        shape: DisplayShape::Rectangular,
        width: 144,
        height: 168,
    };

    /// Check if the panel is round
    pub const fn is_round(&self) -> bool {
        matches!(self.shape, DisplayShape::Round)
    }

    /// Full display bounds with the origin at the top-left corner
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(
            Point::zero(),
            Size::new(u32::from(self.width), u32::from(self.height)),
        )
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::RECTANGULAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_platforms() {
        assert!(Platform::ROUND.is_round());
        assert!(!Platform::RECTANGULAR.is_round());
        assert_eq!(Platform::default(), Platform::RECTANGULAR);
        assert_eq!(Platform::ROUND.bounds().size, Size::new(180, 180));
    }
}
