// Copyright 2026 the Montage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container-level configuration: sheet format and background color.
//!
//! The sheet has a fixed aspect ratio chosen from three presets or explicit
//! custom pixel dimensions. Custom dimensions are retained even while a
//! preset is active, so switching to [`SheetFormat::Custom`] restores the
//! last values entered.

use core::fmt;

/// Smallest accepted custom dimension, in pixels.
pub const MIN_DIMENSION_PX: u32 = 1;

/// Largest accepted custom dimension, in pixels. Also the long-edge size
/// used when exporting preset formats.
pub const MAX_DIMENSION_PX: u32 = 3840;

/// The shape of the sheet container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SheetFormat {
    /// 16:9.
    #[default]
    Landscape,
    /// 9:16.
    Portrait,
    /// 1:1.
    Square,
    /// Explicit pixel dimensions from [`CanvasConfig::custom`].
    Custom,
}

/// Custom sheet dimensions in pixels.
///
/// Both fields are kept within `[MIN_DIMENSION_PX, MAX_DIMENSION_PX]` by
/// [`CanvasConfig::set_custom_dimensions`]; out-of-range input is clamped,
/// never rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CustomSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for CustomSize {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Container-level state for one sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasConfig {
    /// Active sheet format.
    pub format: SheetFormat,
    /// Custom dimensions, used when `format` is [`SheetFormat::Custom`].
    pub custom: CustomSize,
    /// Background fill color.
    pub background: Color,
}

impl CanvasConfig {
    /// Returns the container's aspect ratio (width over height).
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        match self.format {
            SheetFormat::Landscape => 16.0 / 9.0,
            SheetFormat::Portrait => 9.0 / 16.0,
            SheetFormat::Square => 1.0,
            SheetFormat::Custom => f64::from(self.custom.width) / f64::from(self.custom.height),
        }
    }

    /// Sets custom dimensions, clamping each to
    /// `[MIN_DIMENSION_PX, MAX_DIMENSION_PX]`.
    pub fn set_custom_dimensions(&mut self, width: u32, height: u32) {
        self.custom = CustomSize {
            width: width.clamp(MIN_DIMENSION_PX, MAX_DIMENSION_PX),
            height: height.clamp(MIN_DIMENSION_PX, MAX_DIMENSION_PX),
        };
    }
}

/// An RGBA color with 8 bits per channel.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Opaque white, the default sheet background.
    pub const WHITE: Self = Self::from_rgb8(0xFF, 0xFF, 0xFF);

    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb8(0x00, 0x00, 0x00);

    /// Creates an opaque color from RGB components.
    #[inline]
    #[must_use]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Creates a color from RGBA components.
    #[inline]
    #[must_use]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a CSS-style hex color: `#rgb`, `#rrggbb`, or `#rrggbbaa`.
    ///
    /// The leading `#` is optional. This is the format produced by color
    /// picker inputs, which are the expected source of background colors.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        let nibble = |i: usize| -> Result<u8, ColorParseError> {
            let d = digits.as_bytes()[i];
            match d {
                b'0'..=b'9' => Ok(d - b'0'),
                b'a'..=b'f' => Ok(d - b'a' + 10),
                b'A'..=b'F' => Ok(d - b'A' + 10),
                _ => Err(ColorParseError),
            }
        };
        let byte = |i: usize| -> Result<u8, ColorParseError> {
            Ok((nibble(i)? << 4) | nibble(i + 1)?)
        };
        match digits.len() {
            3 => {
                let r = nibble(0)?;
                let g = nibble(1)?;
                let b = nibble(2)?;
                Ok(Self::from_rgb8((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            6 => Ok(Self::from_rgb8(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(ColorParseError),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(#{:02x}{:02x}{:02x}{:02x})", self.r, self.g, self.b, self.a)
    }
}

/// The given string is not a recognized hex color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorParseError;

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("not a hex color (expected #rgb, #rrggbb, or #rrggbbaa)")
    }
}

impl core::error::Error for ColorParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_landscape_white() {
        let config = CanvasConfig::default();
        assert_eq!(config.format, SheetFormat::Landscape);
        assert_eq!(config.background, Color::WHITE);
        assert_eq!(config.custom, CustomSize { width: 1920, height: 1080 });
    }

    #[test]
    fn preset_aspect_ratios() {
        let mut config = CanvasConfig::default();
        assert_eq!(config.aspect_ratio(), 16.0 / 9.0);
        config.format = SheetFormat::Portrait;
        assert_eq!(config.aspect_ratio(), 9.0 / 16.0);
        config.format = SheetFormat::Square;
        assert_eq!(config.aspect_ratio(), 1.0);
    }

    #[test]
    fn custom_aspect_ratio_uses_stored_dimensions() {
        let mut config = CanvasConfig::default();
        config.format = SheetFormat::Custom;
        config.set_custom_dimensions(1000, 500);
        assert_eq!(config.aspect_ratio(), 2.0);
    }

    #[test]
    fn oversized_custom_dimensions_clamp_to_3840() {
        let mut config = CanvasConfig::default();
        config.set_custom_dimensions(5000, 5000);
        assert_eq!(config.custom, CustomSize { width: 3840, height: 3840 });
    }

    #[test]
    fn zero_custom_dimensions_clamp_to_1() {
        let mut config = CanvasConfig::default();
        config.set_custom_dimensions(0, 0);
        assert_eq!(config.custom, CustomSize { width: 1, height: 1 });
    }

    #[test]
    fn hex_six_digit() {
        assert_eq!(Color::from_hex("#ff8000"), Ok(Color::from_rgb8(255, 128, 0)));
        assert_eq!(Color::from_hex("FFFFFF"), Ok(Color::WHITE));
    }

    #[test]
    fn hex_three_digit_expands() {
        assert_eq!(Color::from_hex("#f80"), Ok(Color::from_rgb8(0xFF, 0x88, 0x00)));
    }

    #[test]
    fn hex_eight_digit_carries_alpha() {
        assert_eq!(
            Color::from_hex("#00000080"),
            Ok(Color::from_rgba8(0, 0, 0, 0x80))
        );
    }

    #[test]
    fn hex_rejects_garbage() {
        assert_eq!(Color::from_hex("#zzz"), Err(ColorParseError));
        assert_eq!(Color::from_hex("#12345"), Err(ColorParseError));
        assert_eq!(Color::from_hex(""), Err(ColorParseError));
    }
}
