//! Colour type and hex conversion.

use std::fmt;
use std::str::FromStr;

use crate::error::{BeltscreenError, Result};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create an opaque achromatic colour.
    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Accepts `#RGB` and `#RRGGBB`, with or without the leading `#`.
    /// Alpha is always opaque: palette lookups compare RGB only.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 => {
                let mut digits = [0u8; 3];
                for (slot, c) in digits.iter_mut().zip(hex.chars()) {
                    *slot = parse_hex_digit(c)?;
                }
                let [r, g, b] = digits;
                Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                Ok(Self::rgb(r, g, b))
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// Lowercase `#rrggbb` form, ignoring alpha.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Same RGB with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// True when r, g and b are equal.
    pub fn is_achromatic(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Colour> for [f64; 3] {
    fn from(c: Colour) -> Self {
        [c.r as f64, c.g as f64, c.b as f64]
    }
}

impl FromStr for Colour {
    type Err = BeltscreenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn invalid_hex(s: &str) -> BeltscreenError {
    BeltscreenError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB or #RRGGBB format".to_string()),
    }
}

fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| BeltscreenError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| BeltscreenError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_6digit() {
        let c = Colour::from_hex("#FF0000").unwrap();
        assert_eq!(c, Colour::rgb(255, 0, 0));

        let c = Colour::from_hex("#1a1a2e").unwrap();
        assert_eq!(c, Colour::rgb(0x1a, 0x1a, 0x2e));
    }

    #[test]
    fn test_from_hex_3digit() {
        let c = Colour::from_hex("#ABC").unwrap();
        assert_eq!(c, Colour::rgb(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("#ff00000").is_err());
        assert!(Colour::from_hex("").is_err());
    }

    #[test]
    fn test_to_hex_pads_and_lowercases() {
        assert_eq!(Colour::rgb(3, 3, 3).to_hex(), "#030303");
        assert_eq!(Colour::rgb(0xAB, 0, 0xFF).to_hex(), "#ab00ff");
        // alpha never appears
        assert_eq!(Colour::new(1, 2, 3, 0).to_hex(), "#010203");
    }

    #[test]
    fn test_hex_roundtrip_ignores_alpha() {
        let c = Colour::new(12, 200, 99, 17);
        assert_eq!(Colour::from_hex(&c.to_hex()).unwrap(), c.with_alpha(255));
    }

    #[test]
    fn test_achromatic() {
        assert!(Colour::gray(119).is_achromatic());
        assert!(!Colour::rgb(255, 0, 0).is_achromatic());
    }

    #[test]
    fn test_channels_as_f64() {
        let rgb: [f64; 3] = Colour::rgb(1, 2, 3).into();
        assert_eq!(rgb, [1.0, 2.0, 3.0]);
    }
}
