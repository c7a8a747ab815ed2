//! RGB colours for view backgrounds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ViewError;

/// Linear RGB colour, components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red component
    pub r: f64,
    /// Green component
    pub g: f64,
    /// Blue component
    pub b: f64,
}

impl Rgb {
    /// Black, the default background
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    /// White
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    /// Create a colour; components are clamped to `[0, 1]`
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
        }
    }

    /// Create from 8-bit components
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(hex: &str) -> Result<Self, ViewError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ViewError::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ViewError::InvalidColor(hex.to_string()))
        };
        Ok(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Components as an array
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// 8-bit components, rounded
    pub fn to_rgb8(self) -> [u8; 3] {
        let quantize = |c: f64| (c * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

fn clamp_unit(value: f64) -> f64 {
    // NaN collapses to 0
    if value >= 1.0 {
        1.0
    } else if value > 0.0 {
        value
    } else {
        0.0
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f64; 3]> for Rgb {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_rgb8();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl FromStr for Rgb {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.trim())
    }
}

// Configuration files spell colours as hex strings
impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::from_hex("#ffffff").unwrap(), Rgb::WHITE);
        assert_eq!(Rgb::from_hex("000000").unwrap(), Rgb::BLACK);
        assert_eq!(Rgb::from_hex("#336699").unwrap().to_rgb8(), [0x33, 0x66, 0x99]);

        assert!(Rgb::from_hex("#fff").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
        assert!(Rgb::from_hex("#ff00ää").is_err());
    }

    #[test]
    fn test_components_are_clamped() {
        let c = Rgb::new(-0.5, 0.25, 3.0);
        assert_eq!(c.to_array(), [0.0, 0.25, 1.0]);
        assert_eq!(Rgb::new(f64::NAN, 0.0, 0.0).r, 0.0);
    }

    #[test]
    fn test_display_roundtrip() {
        let c = Rgb::from_rgb8(0x1a, 0x2b, 0x3c);
        assert_eq!(c.to_string(), "#1a2b3c");
        assert_eq!(c.to_string().parse::<Rgb>().unwrap(), c);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Rgb::WHITE).unwrap();
        assert_eq!(json, "\"#ffffff\"");

        let parsed: Rgb = serde_json::from_str("\"#000000\"").unwrap();
        assert_eq!(parsed, Rgb::BLACK);
        assert!(serde_json::from_str::<Rgb>("\"blue\"").is_err());
    }
}
