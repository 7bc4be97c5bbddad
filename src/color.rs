// src/color.rs

//! Defines the `Rgb` color type used for every pixel slot in a crate's
//! color buffer, plus hex-string conversions.
//!
//! Channels are `u8` end to end, so the 0-255 precondition on serialized
//! bytes is a type invariant rather than a runtime check. The only lossy
//! boundary is hex parsing, which reports an error instead of clamping.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

/// An RGB true color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Default color of every buffer slot: an unlit LED.
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Initial paint color, matching the original tool's startup palette.
pub const DEFAULT_PAINT: Rgb = Rgb { r: 128, g: 0, b: 128 };

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// The 3 raw channel bytes in R,G,B order, as the controller firmware
    /// expects them in the `.crate` stream.
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Parses a `#rrggbb` hex string (the form color pickers produce).
    pub fn from_hex(s: &str) -> anyhow::Result<Self> {
        let digits = match s.strip_prefix('#') {
            Some(rest) => rest,
            None => bail!("hex color {:?} must start with '#'", s),
        };
        if digits.len() != 6 || !digits.is_ascii() {
            bail!("hex color {:?} must be of the form #rrggbb", s);
        }
        let channel = |range: std::ops::Range<usize>| -> anyhow::Result<u8> {
            u8::from_str_radix(&digits[range], 16)
                .with_context(|| format!("invalid hex digits in color {:?}", s))
        };
        Ok(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Formats as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_in_rgb_order() {
        assert_eq!(Rgb::new(1, 2, 3).to_bytes(), [1, 2, 3]);
        assert_eq!(BLACK.to_bytes(), [0, 0, 0]);
    }

    #[test]
    fn hex_round_trip() {
        let c = Rgb::new(0x52, 0xb4, 0xd8);
        assert_eq!(c.to_hex(), "#52b4d8");
        assert_eq!(Rgb::from_hex("#52b4d8").unwrap(), c);
        assert_eq!(Rgb::from_hex("#FFFFFF").unwrap(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(Rgb::from_hex("52b4d8").is_err()); // missing '#'
        assert!(Rgb::from_hex("#52b4").is_err()); // too short
        assert!(Rgb::from_hex("#52b4d8ff").is_err()); // too long
        assert!(Rgb::from_hex("#zzzzzz").is_err()); // not hex
    }
}
