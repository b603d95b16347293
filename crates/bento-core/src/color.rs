// File: crates/bento-core/src/color.rs
// Summary: RGBA colors, hex parsing, RGB interpolation and continuous color ramps.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_argb(0, 0, 0, 0);
    pub const WHITE: Color = Color::from_argb(255, 255, 255, 255);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
            _ => None,
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Alpha as a 0..=1 float.
    pub fn alpha_f(&self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Component-wise linear interpolation in sRGB space.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "{}", self.to_hex())
        } else {
            write!(f, "rgba({},{},{},{:.3})", self.r, self.g, self.b, self.alpha_f())
        }
    }
}

const VIRIDIS: [Color; 10] = [
    Color::rgb(0x44, 0x01, 0x54),
    Color::rgb(0x48, 0x28, 0x78),
    Color::rgb(0x3e, 0x49, 0x89),
    Color::rgb(0x31, 0x68, 0x8e),
    Color::rgb(0x26, 0x82, 0x8e),
    Color::rgb(0x1f, 0x9e, 0x89),
    Color::rgb(0x35, 0xb7, 0x79),
    Color::rgb(0x6e, 0xce, 0x58),
    Color::rgb(0xb5, 0xde, 0x2b),
    Color::rgb(0xfd, 0xe7, 0x25),
];

/// Maps t in [0, 1] to a color.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorRamp {
    TwoStop(Color, Color),
    Viridis,
}

impl ColorRamp {
    pub fn at(&self, t: f64) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            ColorRamp::TwoStop(from, to) => from.lerp(*to, t),
            ColorRamp::Viridis => {
                let last = VIRIDIS.len() - 1;
                let pos = t * last as f64;
                let i = (pos.floor() as usize).min(last - 1);
                VIRIDIS[i].lerp(VIRIDIS[i + 1], pos - i as f64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("#6366f1"), Some(Color::rgb(0x63, 0x66, 0xf1)));
        assert_eq!(Color::from_hex("#00000080").map(|c| c.a), Some(0x80));
        assert_eq!(Color::from_hex("6366f1"), None);
        assert_eq!(Color::from_hex("#12345"), None);
    }

    #[test]
    fn ramp_endpoints() {
        let ramp = ColorRamp::TwoStop(Color::rgb(0, 0, 0), Color::rgb(200, 100, 50));
        assert_eq!(ramp.at(0.0), Color::rgb(0, 0, 0));
        assert_eq!(ramp.at(1.0), Color::rgb(200, 100, 50));
        assert_eq!(ramp.at(0.5), Color::rgb(100, 50, 25));
        assert_eq!(ramp.at(f64::NAN), Color::rgb(0, 0, 0));
        assert_eq!(ColorRamp::Viridis.at(0.0), VIRIDIS[0]);
        assert_eq!(ColorRamp::Viridis.at(1.0), VIRIDIS[9]);
    }

    #[test]
    fn display_uses_rgba_when_translucent() {
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "#010203");
        assert_eq!(Color::from_argb(0, 1, 2, 3).to_string(), "rgba(1,2,3,0.000)");
    }
}
