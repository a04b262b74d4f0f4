//! Color and tolerance value types for color keying.
//!
//! A key color is an RGB triple; matching uses Manhattan distance over the
//! three color channels (alpha never participates). The maximum possible
//! distance is `3 * 255 = 765`, which bounds the valid tolerance range.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An 8-bit RGB color with no alpha component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from its three channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Manhattan distance to another color: `|dR| + |dG| + |dB|`.
    ///
    /// Always in `[0, 765]`.
    #[must_use]
    pub fn distance(self, other: Self) -> u16 {
        u16::from(self.r.abs_diff(other.r))
            + u16::from(self.g.abs_diff(other.g))
            + u16::from(self.b.abs_diff(other.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse a 6-digit hex color, with or without a leading `#`.
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Error::InvalidHexColor {
                input: s.to_string(),
            });
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidHexColor {
                input: s.to_string(),
            })
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

/// Maximum color-matching tolerance (the largest possible Manhattan distance).
pub const MAX_TOLERANCE: u16 = 765;

/// A validated color-matching tolerance in `[0, 765]`.
///
/// `0` means exact RGB match only. Construction rejects out-of-range
/// values so processing never starts with an invalid tolerance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tolerance(u16);

impl Tolerance {
    /// Validate and wrap a tolerance value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToleranceOutOfRange`] if `value` is negative or
    /// greater than [`MAX_TOLERANCE`].
    pub fn new(value: i64) -> Result<Self> {
        match u16::try_from(value) {
            Ok(v) if v <= MAX_TOLERANCE => Ok(Self(v)),
            _ => Err(Error::ToleranceOutOfRange { value }),
        }
    }

    /// The wrapped tolerance value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}
