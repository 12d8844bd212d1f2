use std::{fmt, str::FromStr};

use image::Rgba;
use thiserror::Error;

use crate::error::{Error, Result};

/// Tolerance used when the caller does not pick one.
pub const DEFAULT_TOLERANCE: f64 = 30.0;

/// What a removed pixel becomes.
pub const TRANSPARENT: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// An opaque RGB target color. Only ever compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance in RGB space. Alpha is not considered.
    pub fn distance(&self, px: &Rgba<u8>) -> f64 {
        let dr = px[0] as i32 - self.r as i32;
        let dg = px[1] as i32 - self.g as i32;
        let db = px[2] as i32 - self.b as i32;
        ((dr * dr + dg * dg + db * db) as f64).sqrt()
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid color `{0}`, expected R,G,B or rrggbb")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let trimmed = s.trim();

        if trimmed.contains(',') {
            let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(err());
            }
            let mut buf = [0; 3];
            for (i, part) in parts.iter().enumerate() {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(err());
                }
                buf[i] = part.parse().map_err(|_| err())?;
            }
            return Ok(buf.into());
        }

        let hex = trimmed.trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let mut buf = [0; 3];
        for i in 0..3 {
            let idx = i * 2;
            buf[i] = u8::from_str_radix(&hex[idx..(idx + 2)], 16).map_err(|_| err())?;
        }
        Ok(buf.into())
    }
}

/// Target colors plus the tolerance shared by all of them.
///
/// A pixel belongs to the set when it lies within `tolerance` of any
/// color; the boundary is inclusive.
#[derive(Debug, Clone)]
pub struct RemovalSet {
    colors: Vec<Color>,
    tolerance: f64,
}

impl RemovalSet {
    pub fn new(colors: Vec<Color>, tolerance: f64) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::InvalidRemovalSet(
                "at least one color is required".to_string(),
            ));
        }
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(Error::InvalidRemovalSet(format!(
                "tolerance must be a non-negative number, got {tolerance}"
            )));
        }

        Ok(Self { colors, tolerance })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[inline]
    pub fn matches(&self, px: &Rgba<u8>) -> bool {
        self.colors
            .iter()
            .any(|color| color.distance(px) <= self.tolerance)
    }
}
