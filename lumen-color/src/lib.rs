// SPDX-License-Identifier: LGPL-3.0-only
#![warn(missing_docs)]

//! # Lumen Color Engine
//!
//! Pure, stateless color math for the lumen theming system. Every function
//! works on sRGB hex strings (`#rrggbb`, with or without the leading `#`)
//! or on the small integer color structs defined in [convert].
//!
//! ## Overview
//!
//! - **[convert]**: hex / RGB / HSL / HSV conversions
//! - **[contrast]**: WCAG relative luminance, contrast ratio and accessibility checks
//! - **[adjust]**: lighten, darken, saturate, hue rotation, mixing and palettes
//!
//! ## Failure Policy
//!
//! Malformed input never panics. Parsing returns `None`, luminance returns
//! `0.0`, and derived operations hand the input back unchanged, so callers
//! that project colors onto a style surface can never crash on bad data.
//!
//! ```rust
//! use lumen_color::{adjust, contrast, convert};
//!
//! let rgb = convert::hex_to_rgb("#1b9aaa").unwrap();
//! assert_eq!(convert::rgb_to_hex(rgb), "#1b9aaa");
//!
//! let ratio = contrast::contrast_ratio("#000000", "#ffffff");
//! assert!((ratio - 21.0).abs() < 1e-9);
//!
//! assert_eq!(adjust::lighten("not a color", 10), "not a color");
//! ```

/// Contains lightness, saturation, hue and mixing operations.
pub mod adjust;
/// Contains WCAG luminance and contrast helpers.
pub mod contrast;
/// Contains the color structs and conversions between them.
pub mod convert;

pub use adjust::Palette;
pub use contrast::WcagLevel;
pub use convert::{ColorError, Hsl, Hsv, Rgb};
