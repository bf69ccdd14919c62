//! RGB colors used for text runs.

use serde::Serialize;

/// An RGB color with components in `0.0..=1.0`.
///
/// Construction clamps out-of-range components instead of rejecting them, so
/// every `Color` value is valid for a PDF `rg` operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0 };
    pub const GREEN: Color = Color { r: 0.0, g: 1.0, b: 0.0 };
    pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0 };
    pub const YELLOW: Color = Color { r: 1.0, g: 1.0, b: 0.0 };
    pub const MAGENTA: Color = Color { r: 1.0, g: 0.0, b: 1.0 };
    pub const CYAN: Color = Color { r: 0.0, g: 1.0, b: 1.0 };
    pub const GRAY: Color = Color { r: 0.5, g: 0.5, b: 0.5 };
    pub const ORANGE: Color = Color { r: 1.0, g: 0.647, b: 0.0 };

    /// Create a color, clamping each component into `0.0..=1.0`.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
        }
    }

    /// Create a color from 8-bit channel values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub fn r(&self) -> f32 {
        self.r
    }

    pub fn g(&self) -> f32 {
        self.g
    }

    pub fn b(&self) -> f32 {
        self.b
    }

    /// Check if this is exactly black.
    pub fn is_black(&self) -> bool {
        *self == Self::BLACK
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Parse a hex color string into a [`Color`].
///
/// Accepts `RRGGBB`, `AARRGGBB` (alpha is skipped) and either form with a
/// leading `#`. Any other input yields [`Color::BLACK`].
///
/// ```
/// use sheetpdf::model::{parse_color, Color};
///
/// assert_eq!(parse_color("FFFF0000"), Color::RED);
/// assert_eq!(parse_color("#0000FF"), Color::BLUE);
/// assert_eq!(parse_color("xyz"), Color::BLACK);
/// ```
pub fn parse_color(hex: &str) -> Color {
    try_parse_color(hex).unwrap_or(Color::BLACK)
}

/// Parse a hex color, returning `None` when the input is not a valid hex color.
fn try_parse_color(hex: &str) -> Option<Color> {
    let hex = hex.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.is_ascii() {
        return None;
    }
    let rgb = match hex.len() {
        6 => hex,
        8 => &hex[2..],
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&rgb[i..i + 2], 16).ok();
    Some(Color::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
}
