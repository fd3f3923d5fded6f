// SPDX-License-Identifier: LGPL-3.0-only

//! Derived colors: lightness, saturation, hue rotation, mixing and palettes.
//!
//! Every operation parses its input, applies a clamped delta in HSL (or RGB
//! for [mix]) and formats the result back to hex. Malformed input is handed
//! back unchanged. A zero delta also returns the input untouched, so that
//! no-op adjustments never pay for the lossy HSL round trip.

use crate::convert::{hex_to_hsl, hex_to_rgb, hsl_to_hex, rgb_to_hex, Hsl, Rgb};

/// Palette steps on the conventional 50–950 scale with their HSL lightness.
///
/// Step 500 has no fixed lightness: it is always the base color itself.
pub const PALETTE_STEPS: [(u16, Option<u8>); 11] = [
    (50, Some(95)),
    (100, Some(90)),
    (200, Some(80)),
    (300, Some(70)),
    (400, Some(60)),
    (500, None),
    (600, Some(40)),
    (700, Some(30)),
    (800, Some(20)),
    (900, Some(10)),
    (950, Some(5)),
];

/// An 11-step tonal palette generated by [generate_palette].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    shades: Vec<(u16, String)>,
}

impl Palette {
    /// Get the shade for a step such as `50` or `900`.
    pub fn get(&self, step: u16) -> Option<&str> {
        self.shades
            .iter()
            .find(|(key, _)| *key == step)
            .map(|(_, hex)| hex.as_str())
    }

    /// The base color at step 500, exactly as it was supplied.
    pub fn base(&self) -> &str {
        self.get(500).unwrap_or_default()
    }

    /// Iterate over `(step, hex)` pairs from lightest to darkest.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> {
        self.shades.iter().map(|(step, hex)| (*step, hex.as_str()))
    }

    /// Number of shades (always 11).
    pub fn len(&self) -> usize {
        self.shades.len()
    }

    /// Whether the palette has no shades. Never true for a generated palette.
    pub fn is_empty(&self) -> bool {
        self.shades.is_empty()
    }
}

fn with_hsl(color: &str, op: impl FnOnce(Hsl) -> Hsl) -> String {
    match hex_to_hsl(color) {
        Some(hsl) => hsl_to_hex(op(hsl)),
        None => color.to_string(),
    }
}

/// Raise HSL lightness by `amount` percent, capped at 100.
pub fn lighten(color: &str, amount: u8) -> String {
    if amount == 0 {
        return color.to_string();
    }
    with_hsl(color, |hsl| Hsl::new(hsl.h, hsl.s, hsl.l.saturating_add(amount)))
}

/// Lower HSL lightness by `amount` percent, floored at 0.
pub fn darken(color: &str, amount: u8) -> String {
    if amount == 0 {
        return color.to_string();
    }
    with_hsl(color, |hsl| Hsl::new(hsl.h, hsl.s, hsl.l.saturating_sub(amount)))
}

/// Raise HSL saturation by `amount` percent, capped at 100.
pub fn saturate(color: &str, amount: u8) -> String {
    if amount == 0 {
        return color.to_string();
    }
    with_hsl(color, |hsl| Hsl::new(hsl.h, hsl.s.saturating_add(amount), hsl.l))
}

/// Lower HSL saturation by `amount` percent, floored at 0.
pub fn desaturate(color: &str, amount: u8) -> String {
    if amount == 0 {
        return color.to_string();
    }
    with_hsl(color, |hsl| Hsl::new(hsl.h, hsl.s.saturating_sub(amount), hsl.l))
}

/// Rotate the hue by `degrees`, wrapping around the color wheel.
///
/// Whole turns (including `0`) return the input unchanged.
pub fn adjust_hue(color: &str, degrees: i32) -> String {
    let turn = degrees.rem_euclid(360);
    if turn == 0 {
        return color.to_string();
    }
    with_hsl(color, |hsl| {
        let hue = (i32::from(hsl.h) + turn).rem_euclid(360) as u16;
        Hsl::new(hue, hsl.s, hsl.l)
    })
}

/// The color opposite on the color wheel.
pub fn complement(color: &str) -> String {
    adjust_hue(color, 180)
}

/// Colors `offset` degrees to either side of `color`, as `(left, right)`.
pub fn analogous(color: &str, offset: u16) -> (String, String) {
    let offset = i32::from(offset);
    (adjust_hue(color, -offset), adjust_hue(color, offset))
}

/// The two colors completing a triad with `color`.
pub fn triadic(color: &str) -> (String, String) {
    (adjust_hue(color, 120), adjust_hue(color, 240))
}

/// Blend two colors in RGB space.
///
/// `weight` is the percentage of `other` in the result (clamped to 100).
/// If either color is malformed, `color` is returned unchanged.
pub fn mix(color: &str, other: &str, weight: u8) -> String {
    let (Some(a), Some(b)) = (hex_to_rgb(color), hex_to_rgb(other)) else {
        return color.to_string();
    };

    let w = f64::from(weight.min(100)) / 100.0;
    let blend = |x: u8, y: u8| (f64::from(x) * (1.0 - w) + f64::from(y) * w).round() as u8;
    rgb_to_hex(Rgb::new(blend(a.r, b.r), blend(a.g, b.g), blend(a.b, b.b)))
}

/// Generate an 11-step palette around `base`.
///
/// Shades keep the base hue and saturation at fixed lightness levels; step
/// 500 is `base` verbatim. Returns `None` when `base` is not a hex color.
///
/// ```rust
/// use lumen_color::adjust::generate_palette;
///
/// let palette = generate_palette("#1B9AAA").unwrap();
/// assert_eq!(palette.get(500), Some("#1B9AAA"));
/// assert_eq!(palette.len(), 11);
/// ```
pub fn generate_palette(base: &str) -> Option<Palette> {
    let hsl = hex_to_hsl(base)?;
    let shades = PALETTE_STEPS
        .iter()
        .map(|&(step, lightness)| {
            let hex = match lightness {
                Some(l) => hsl_to_hex(Hsl::new(hsl.h, hsl.s, l)),
                None => base.to_string(),
            };
            (step, hex)
        })
        .collect();

    Some(Palette { shades })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::luminance;

    #[test]
    fn test_zero_deltas_are_identity() {
        let c = "#1b9aaa";
        assert_eq!(lighten(&lighten(c, 0), 0), c);
        assert_eq!(darken(c, 0), c);
        assert_eq!(saturate(c, 0), c);
        assert_eq!(desaturate(c, 0), c);
        assert_eq!(adjust_hue(c, 360), c);
        assert_eq!(adjust_hue(c, -720), c);
        assert_eq!(mix(c, "#000000", 0), c);
    }

    #[test]
    fn test_lighten_and_darken_move_luminance() {
        let c = "#52489c";
        assert!(luminance(&lighten(c, 20)) > luminance(c));
        assert!(luminance(&darken(c, 20)) < luminance(c));
        assert_eq!(lighten(c, 100), "#ffffff");
        assert_eq!(darken(c, 100), "#000000");
    }

    #[test]
    fn test_saturation_bounds() {
        assert_eq!(desaturate("#ff0000", 100), "#808080");
        assert_eq!(saturate("#bf4040", 100), "#ff0000");
    }

    #[test]
    fn test_hue_rotation() {
        assert_eq!(complement("#ff0000"), "#00ffff");
        assert_eq!(adjust_hue("#ff0000", -120), "#0000ff");
        assert_eq!(triadic("#ff0000"), ("#00ff00".to_string(), "#0000ff".to_string()));
        assert_eq!(analogous("#ff0000", 60), ("#ff00ff".to_string(), "#ffff00".to_string()));
    }

    #[test]
    fn test_mix() {
        assert_eq!(mix("#000000", "#ffffff", 50), "#808080");
        assert_eq!(mix("#000000", "#ffffff", 100), "#ffffff");
        assert_eq!(mix("#000000", "#ffffff", 250), "#ffffff");
        assert_eq!(mix("#102030", "oops", 50), "#102030");
        assert_eq!(mix("oops", "#102030", 50), "oops");
    }

    #[test]
    fn test_malformed_input_is_returned_unchanged() {
        for op in [lighten, darken, saturate, desaturate] {
            assert_eq!(op("#12", 10), "#12");
        }
        assert_eq!(complement("blue"), "blue");
        assert!(generate_palette("blue").is_none());
    }

    #[test]
    fn test_palette_preserves_base() {
        for base in ["#1b9aaa", "#F0A202", "52489c", "#000000"] {
            let palette = generate_palette(base).unwrap();
            assert_eq!(palette.get(500), Some(base));
            assert_eq!(palette.base(), base);
        }
    }

    #[test]
    fn test_palette_lightness_ladder() {
        let palette = generate_palette("#1b9aaa").unwrap();
        let steps: Vec<u16> = palette.iter().map(|(step, _)| step).collect();
        assert_eq!(steps, vec![50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950]);

        let lum: Vec<f64> = palette
            .iter()
            .filter(|(step, _)| *step != 500)
            .map(|(_, hex)| luminance(hex))
            .collect();
        assert!(lum.windows(2).all(|pair| pair[0] > pair[1]));
        assert_eq!(palette.get(123), None);
    }
}
