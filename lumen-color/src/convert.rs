// SPDX-License-Identifier: LGPL-3.0-only

//! Conversions between hex strings, RGB, HSL and HSV.
//!
//! All conversions round to the nearest integer in the target range and
//! wrap hue into `[0, 360)`. They are lossy: `hex -> HSL -> hex` is not
//! guaranteed to be bit exact.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing colors through [FromStr].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string is not a 6-digit hex color.
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
}

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// A color in hue/saturation/lightness form.
///
/// Hue is in degrees `0..360`, saturation and lightness in percent `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: u16,
    /// Saturation in percent.
    pub s: u8,
    /// Lightness in percent.
    pub l: u8,
}

/// A color in hue/saturation/value form.
///
/// Hue is in degrees `0..360`, saturation and value in percent `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue in degrees.
    pub h: u16,
    /// Saturation in percent.
    pub s: u8,
    /// Value in percent.
    pub v: u8,
}

impl Rgb {
    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format the color as a lowercase `#rrggbb` string.
    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }

    /// Convert to HSL.
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }

    /// Convert to HSV.
    pub fn to_hsv(self) -> Hsv {
        rgb_to_hsv(self)
    }

    fn normalized(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

impl Hsl {
    /// Create an HSL color. Hue is wrapped, saturation and lightness clamped.
    pub fn new(h: u16, s: u8, l: u8) -> Self {
        Self {
            h: h % 360,
            s: s.min(100),
            l: l.min(100),
        }
    }

    /// Convert to RGB.
    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self)
    }
}

impl Hsv {
    /// Create an HSV color. Hue is wrapped, saturation and value clamped.
    pub fn new(h: u16, s: u8, v: u8) -> Self {
        Self {
            h: h % 360,
            s: s.min(100),
            v: v.min(100),
        }
    }

    /// Convert to RGB.
    pub fn to_rgb(self) -> Rgb {
        hsv_to_rgb(self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s).ok_or_else(|| ColorError::InvalidHex(s.to_string()))
    }
}

/// Parse a 6-digit hex color.
///
/// The leading `#` is optional and digits are case-insensitive. Returns
/// `None` for anything else, including 3-digit shorthand and alpha suffixes.
///
/// ```rust
/// use lumen_color::convert::{hex_to_rgb, Rgb};
///
/// assert_eq!(hex_to_rgb("#FF8000"), Some(Rgb::new(255, 128, 0)));
/// assert_eq!(hex_to_rgb("ff8000"), Some(Rgb::new(255, 128, 0)));
/// assert_eq!(hex_to_rgb("#fff"), None);
/// ```
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |start: usize| u8::from_str_radix(&digits[start..start + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Format a color as a lowercase `#rrggbb` string.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    rgb.to_string()
}

/// Hue in `[0, 1)` from normalized channels, using the max-channel branch.
fn hue_fraction(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    let sector = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    sector / 6.0
}

fn round_hue(fraction: f64) -> u16 {
    ((fraction * 360.0).round() as u16) % 360
}

fn round_percent(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

fn round_channel(fraction: f64) -> u8 {
    (fraction * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert RGB to HSL.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let (r, g, b) = rgb.normalized();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    let (h, s) = if delta > 0.0 {
        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };
        (hue_fraction(r, g, b, max, delta), s)
    } else {
        (0.0, 0.0)
    };

    Hsl {
        h: round_hue(h),
        s: round_percent(s),
        l: round_percent(l),
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Convert HSL to RGB.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = f64::from(hsl.h % 360) / 360.0;
    let s = f64::from(hsl.s.min(100)) / 100.0;
    let l = f64::from(hsl.l.min(100)) / 100.0;

    if s == 0.0 {
        let gray = round_channel(l);
        return Rgb::new(gray, gray, gray);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        round_channel(hue_to_channel(p, q, h + 1.0 / 3.0)),
        round_channel(hue_to_channel(p, q, h)),
        round_channel(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

/// Convert RGB to HSV.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let (r, g, b) = rgb.normalized();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max == 0.0 { 0.0 } else { delta / max };
    let h = if delta > 0.0 {
        hue_fraction(r, g, b, max, delta)
    } else {
        0.0
    };

    Hsv {
        h: round_hue(h),
        s: round_percent(s),
        v: round_percent(max),
    }
}

/// Convert HSV to RGB.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = f64::from(hsv.h % 360) / 360.0;
    let s = f64::from(hsv.s.min(100)) / 100.0;
    let v = f64::from(hsv.v.min(100)) / 100.0;

    let c = v * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h * 6.0).floor() as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb::new(round_channel(r + m), round_channel(g + m), round_channel(b + m))
}

/// Parse a hex color straight into HSL.
pub fn hex_to_hsl(hex: &str) -> Option<Hsl> {
    hex_to_rgb(hex).map(rgb_to_hsl)
}

/// Format an HSL color as a hex string.
pub fn hsl_to_hex(hsl: Hsl) -> String {
    rgb_to_hex(hsl_to_rgb(hsl))
}

/// Parse a hex color straight into HSV.
pub fn hex_to_hsv(hex: &str) -> Option<Hsv> {
    hex_to_rgb(hex).map(rgb_to_hsv)
}

/// Format an HSV color as a hex string.
pub fn hsv_to_hex(hsv: Hsv) -> String {
    rgb_to_hex(hsv_to_rgb(hsv))
}
