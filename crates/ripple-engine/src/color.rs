use derive_more::{Deref, From, Into};
use palette::Srgba;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An sRGB colour with straight alpha, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, DeserializeFromStr, SerializeDisplay)]
pub struct Color(Srgba<f64>);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected #RRGGBB or #AARRGGBB, got {0:?}")]
    InvalidLength(String),
    #[error("invalid hex digits in {0:?}")]
    InvalidHex(String),
    #[error("unknown colour name {0:?}")]
    UnknownName(String),
}

impl Color {
    pub fn from_argb(argb: u32) -> Self {
        let channel = |shift: u32| f64::from((argb >> shift) & 0xFF) / 255.0;
        Self(Srgba::new(channel(16), channel(8), channel(0), channel(24)))
    }

    pub fn white() -> Self {
        Self::from_argb(0xFFFF_FFFF)
    }

    pub fn gray() -> Self {
        Self::from_argb(0xFF88_8888)
    }

    pub fn ripple_blue() -> Self {
        Self::from_argb(0xFF28_89C3)
    }

    /// Channels as `(r, g, b, a)`, with alpha scaled by `opacity`.
    pub fn components_with_opacity(&self, opacity: f64) -> (f64, f64, f64, f64) {
        let (r, g, b, a) = self.0.into_components();
        (r, g, b, a * opacity.clamp(0.0, 1.0))
    }

    pub fn to_argb(&self) -> u32 {
        let (r, g, b, a) = self.0.into_components();
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (byte(a) << 24) | (byte(r) << 16) | (byte(g) << 8) | byte(b)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(hex) = s.strip_prefix('#') else {
            return match s.to_ascii_lowercase().as_str() {
                "white" => Ok(Self::white()),
                "gray" | "grey" => Ok(Self::gray()),
                "black" => Ok(Self::from_argb(0xFF00_0000)),
                "transparent" => Ok(Self::from_argb(0)),
                _ => Err(ColorParseError::UnknownName(s.to_string())),
            };
        };

        let value =
            u32::from_str_radix(hex, 16).map_err(|_| ColorParseError::InvalidHex(s.to_string()))?;
        match hex.len() {
            6 => Ok(Self::from_argb(0xFF00_0000 | value)),
            8 => Ok(Self::from_argb(value)),
            _ => Err(ColorParseError::InvalidLength(s.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_argb())
    }
}
