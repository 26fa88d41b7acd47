use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// An RGB color with a straight (not premultiplied) alpha channel in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Color {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) alpha: f32,
}

impl Color {
    pub(crate) const WHITE: Color = Color::new(255, 255, 255);
    pub(crate) const BLACK: Color = Color::new(0, 0, 0);

    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Build an opaque color out of a `0xRRGGBB` literal.
    pub(crate) const fn from_hex(hex: u32) -> Self {
        Self::new(((hex >> 16) & 0xff) as u8, ((hex >> 8) & 0xff) as u8, (hex & 0xff) as u8)
    }

    /// Same color with a different alpha. Out of range values are clamped.
    pub(crate) fn with_alpha(self, alpha: f32) -> Self {
        let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        Self { alpha, ..self }
    }

    /// Linear interpolation between two colors, alpha included.
    pub(crate) fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            alpha: self.alpha + (other.alpha - self.alpha) * t,
        }
    }

    /// Scale the RGB channels towards black.
    pub(crate) fn darken(self, factor: f32) -> Color {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * (1.0 - factor)).round() as u8;
        Color { r: scale(self.r), g: scale(self.g), b: scale(self.b), alpha: self.alpha }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.alpha < 1.0 {
            write!(f, "{:02x}", (self.alpha * 255.0).round() as u8)?;
        }
        Ok(())
    }
}

/// Errors produced when parsing a `#RRGGBB` or `#RRGGBBAA` color
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ColorParseError {
    #[error("color '{0}' must have 6 or 8 hex digits")]
    InvalidLength(String),

    #[error("color '{0}' contains non hex digits")]
    InvalidDigits(String),
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let digits = input.trim().trim_start_matches('#');
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::InvalidLength(input.to_string()));
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| ColorParseError::InvalidDigits(input.to_string()))?;
        let color = if digits.len() == 6 {
            Color::from_hex(value)
        } else {
            Color::from_hex(value >> 8).with_alpha((value & 0xff) as f32 / 255.0)
        };
        Ok(color)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
