//! `#rrggbb` colors as emitted by the color pickers

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque RGB color. Always displayed as lower-case `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const BLACK: HexColor = HexColor::rgb(0, 0, 0);
    pub const WHITE: HexColor = HexColor::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// RGBA tuple with full opacity, in the shape paint commands use.
    pub fn rgba(self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, 255)
    }
}

impl FromStr for HexColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(s.to_string());
        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for HexColor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_case() {
        let c: HexColor = "#AaBbCc".parse().unwrap();
        assert_eq!(c, HexColor::rgb(0xaa, 0xbb, 0xcc));
        assert_eq!(c.to_string(), "#aabbcc");
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["112233", "#12345", "#1234567", "#gg0000", "", "#"] {
            assert!(bad.parse::<HexColor>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn serde_uses_hex_string() {
        let json = serde_json::to_string(&HexColor::rgb(0x11, 0x22, 0x33)).unwrap();
        assert_eq!(json, "\"#112233\"");
        let back: HexColor = serde_json::from_str("\"#ffffff\"").unwrap();
        assert_eq!(back, HexColor::WHITE);
    }
}
