// SPDX-License-Identifier: LGPL-3.0-only

//! WCAG 2.x relative luminance and contrast ratio.
//!
//! Luminance is computed in linear sRGB:
//!
//! - Normalized channels at or below `0.03928` are divided by `12.92`
//! - Everything above follows `((c + 0.055) / 1.055) ^ 2.4`
//! - Channels are weighted `0.2126 R + 0.7152 G + 0.0722 B`

use crate::convert::hex_to_rgb;

/// Conformance level for [is_accessible].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WcagLevel {
    /// Normal text at level AA: contrast of at least 4.5:1.
    #[default]
    Aa,
    /// Normal text at level AAA: contrast of at least 7:1.
    Aaa,
}

impl WcagLevel {
    /// Minimum contrast ratio required by this level.
    pub fn threshold(self) -> f64 {
        match self {
            WcagLevel::Aa => 4.5,
            WcagLevel::Aaa => 7.0,
        }
    }
}

fn srgb_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of a hex color in `[0, 1]`.
///
/// Returns `0.0` for unparsable input.
pub fn luminance(hex: &str) -> f64 {
    let Some(rgb) = hex_to_rgb(hex) else {
        return 0.0;
    };

    0.2126 * srgb_to_linear(rgb.r) + 0.7152 * srgb_to_linear(rgb.g) + 0.0722 * srgb_to_linear(rgb.b)
}

/// Contrast ratio between two hex colors, in `[1, 21]`.
///
/// Argument order does not matter.
pub fn contrast_ratio(a: &str, b: &str) -> f64 {
    let la = luminance(a);
    let lb = luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether `foreground` on `background` meets the given WCAG level.
pub fn is_accessible(foreground: &str, background: &str, level: WcagLevel) -> bool {
    contrast_ratio(foreground, background) >= level.threshold()
}

/// Pick black or white text, whichever reads better on `background`.
pub fn readable_text_color(background: &str) -> &'static str {
    let white = contrast_ratio("#ffffff", background);
    let black = contrast_ratio("#000000", background);
    if white > black { "#ffffff" } else { "#000000" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_luminance_extremes() {
        assert!(approx_eq(luminance("#000000"), 0.0, 1e-12));
        assert!(approx_eq(luminance("#ffffff"), 1.0, 1e-12));
        assert!(approx_eq(luminance("#ff0000"), 0.2126, 1e-12));
        assert!(approx_eq(luminance("#00ff00"), 0.7152, 1e-12));
    }

    #[test]
    fn test_luminance_of_garbage_is_zero() {
        assert_eq!(luminance("garbage"), 0.0);
        assert_eq!(luminance(""), 0.0);
    }

    #[test]
    fn test_contrast_black_white_is_21() {
        let ratio = contrast_ratio("#000000", "#ffffff");
        assert!(approx_eq(ratio, 21.0, 1e-9), "B/W contrast: {ratio}");
    }

    #[test]
    fn test_contrast_same_color_is_1() {
        for hex in ["#000000", "#1b9aaa", "#ffffff", "#7f7f7f"] {
            assert!(approx_eq(contrast_ratio(hex, hex), 1.0, 1e-12));
        }
    }

    #[test]
    fn test_contrast_is_symmetric() {
        let ab = contrast_ratio("#1b9aaa", "#f5f1e3");
        let ba = contrast_ratio("#f5f1e3", "#1b9aaa");
        assert!(approx_eq(ab, ba, 1e-12));
        assert!(ab >= 1.0);
    }

    #[test]
    fn test_accessibility_levels() {
        assert!(is_accessible("#000000", "#ffffff", WcagLevel::Aaa));
        // #767676 is the lightest gray that still passes AA on white.
        assert!(is_accessible("#767676", "#ffffff", WcagLevel::Aa));
        assert!(!is_accessible("#767676", "#ffffff", WcagLevel::Aaa));
        assert!(!is_accessible("#777777", "#ffffff", WcagLevel::Aa));
        assert!(!is_accessible("#dddbcb", "#ffffff", WcagLevel::default()));
    }

    #[test]
    fn test_readable_text_color() {
        assert_eq!(readable_text_color("#121212"), "#ffffff");
        assert_eq!(readable_text_color("#f5f1e3"), "#000000");
    }
}
