//! Colors and gradient stops

use std::fmt;

use serde::{Deserialize, Serialize};

/// A CSS-expressible color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Color {
    /// Hue in degrees, saturation/lightness in percent, alpha in 0..1
    Hsla { h: f32, s: f32, l: f32, a: f32 },
    Rgba { r: u8, g: u8, b: u8, a: f32 },
}

impl Color {
    pub const fn hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        Color::Hsla { h, s, l, a }
    }

    /// Opaque color from a 0xRRGGBB literal
    pub const fn hex(rgb: u32) -> Self {
        Color::Rgba {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub fn alpha(&self) -> f32 {
        match *self {
            Color::Hsla { a, .. } | Color::Rgba { a, .. } => a,
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        match self {
            Color::Hsla { h, s, l, .. } => Color::Hsla { h, s, l, a: alpha },
            Color::Rgba { r, g, b, .. } => Color::Rgba { r, g, b, a: alpha },
        }
    }

    /// All channels are finite numbers
    pub fn is_finite(&self) -> bool {
        match *self {
            Color::Hsla { h, s, l, a } => h.is_finite() && s.is_finite() && l.is_finite() && a.is_finite(),
            Color::Rgba { a, .. } => a.is_finite(),
        }
    }

    /// CSS color string, channels clamped to their valid ranges
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Hsla { h, s, l, a } => write!(
                f,
                "hsla({:.1},{:.1}%,{:.1}%,{:.3})",
                h.rem_euclid(360.0),
                s.clamp(0.0, 100.0),
                l.clamp(0.0, 100.0),
                a.clamp(0.0, 1.0)
            ),
            Color::Rgba { r, g, b, a } => {
                write!(f, "rgba({},{},{},{:.3})", r, g, b, a.clamp(0.0, 1.0))
            }
        }
    }
}

/// A color stop on a gradient (offset in 0..1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_formatting() {
        assert_eq!(Color::hsla(200.0, 100.0, 50.0, 0.15).css(), "hsla(200.0,100.0%,50.0%,0.150)");
        assert_eq!(Color::hex(0x0a0e27).css(), "rgba(10,14,39,1.000)");
    }

    #[test]
    fn test_css_clamps_out_of_range_channels() {
        assert_eq!(Color::hsla(-20.0, 120.0, -5.0, 1.4).css(), "hsla(340.0,100.0%,0.0%,1.000)");
    }

    #[test]
    fn test_with_alpha() {
        let c = Color::hex(0xffffff).with_alpha(0.25);
        assert_eq!(c.alpha(), 0.25);
        assert!(!Color::hsla(f32::NAN, 0.0, 0.0, 1.0).is_finite());
    }
}
