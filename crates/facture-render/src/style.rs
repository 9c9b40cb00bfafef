//! Colors and text metrics shared by the document sections.
//!
//! The palette mirrors the preview surface: near-black primary text,
//! slate secondary text, light dividers, and the accent color taken from
//! the appearance settings.

use serde::{Deserialize, Serialize};

// =============================================================================
// Color
// =============================================================================

/// An RGB color with components in [0, 1] (the range PDF operators use).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    /// Parses a `#rrggbb` (or `#rgb`) hex string.
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let hex = hex.strip_prefix('#')?;
        let (r, g, b) = match hex.len() {
            6 => (
                u8::from_str_radix(&hex[0..2], 16).ok()?,
                u8::from_str_radix(&hex[2..4], 16).ok()?,
                u8::from_str_radix(&hex[4..6], 16).ok()?,
            ),
            3 => {
                let c = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                (c(0)?, c(1)?, c(2)?)
            }
            _ => return None,
        };
        Some(Rgb {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        })
    }

    /// Parses a hex color, falling back to black for anything malformed.
    ///
    /// Settings colors come from a color picker so they are normally valid;
    /// a bad value must still never fail a render.
    pub fn parse(hex: &str) -> Rgb {
        Rgb::from_hex(hex).unwrap_or(Rgb::BLACK)
    }
}

/// Primary text, near-black.
pub const TEXT_PRIMARY: Rgb = Rgb {
    r: 0x1f as f32 / 255.0,
    g: 0x29 as f32 / 255.0,
    b: 0x37 as f32 / 255.0,
};

/// Secondary text, slate.
pub const TEXT_SECONDARY: Rgb = Rgb {
    r: 0x4b as f32 / 255.0,
    g: 0x55 as f32 / 255.0,
    b: 0x63 as f32 / 255.0,
};

/// Divider lines.
pub const DIVIDER: Rgb = Rgb {
    r: 0xe5 as f32 / 255.0,
    g: 0xe7 as f32 / 255.0,
    b: 0xeb as f32 / 255.0,
};

/// Section card background.
pub const CARD_BACKGROUND: Rgb = Rgb {
    r: 0xf8 as f32 / 255.0,
    g: 0xfa as f32 / 255.0,
    b: 0xfc as f32 / 255.0,
};

/// Page-number stamp gray.
pub const STAMP_GRAY: Rgb = Rgb {
    r: 0.5,
    g: 0.5,
    b: 0.5,
};

// =============================================================================
// Fonts & Metrics
// =============================================================================

/// The two faces the document uses (base-14 Helvetica pair in the PDF).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontId {
    Regular,
    Bold,
}

/// Estimated advance width of a string, in the same logical units as the
/// font size.
///
/// A fixed average-advance factor keeps layout deterministic without font
/// I/O; it is good enough for centering and right-aligning short labels.
pub fn text_width(text: &str, size: f64, font: FontId) -> f64 {
    let factor = match font {
        FontId::Regular => 0.50,
        FontId::Bold => 0.53,
    };
    text.chars().count() as f64 * size * factor
}

// =============================================================================
// Unit Tests
// =============================================================================
