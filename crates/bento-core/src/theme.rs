// File: crates/bento-core/src/theme.rs
// Summary: Light/Dark dashboard themes: surface, text, accent and chart palette tokens.

use crate::color::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,
    pub bg_panel: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub accent_secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    /// `chart-1` .. `chart-6`
    pub chart: [Color; 6],
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            bg_primary: Color::rgb(0x0b, 0x0d, 0x12),
            bg_secondary: Color::rgb(0x13, 0x16, 0x1f),
            bg_tertiary: Color::rgb(0x1c, 0x20, 0x2c),
            bg_panel: Color::rgb(0x24, 0x29, 0x37),
            border: Color::rgb(0x2a, 0x2f, 0x3d),
            text_primary: Color::rgb(0xf3, 0xf4, 0xf6),
            text_secondary: Color::rgb(0xc4, 0xc8, 0xd2),
            text_muted: Color::rgb(0x8b, 0x92, 0xa3),
            accent: Color::rgb(0x63, 0x66, 0xf1),
            accent_secondary: Color::rgb(0xa8, 0x55, 0xf7),
            success: Color::rgb(0x10, 0xb9, 0x81),
            warning: Color::rgb(0xf5, 0x9e, 0x0b),
            danger: Color::rgb(0xf4, 0x3f, 0x5e),
            chart: [
                Color::rgb(0x63, 0x66, 0xf1),
                Color::rgb(0x22, 0xd3, 0xee),
                Color::rgb(0x10, 0xb9, 0x81),
                Color::rgb(0xf5, 0x9e, 0x0b),
                Color::rgb(0xec, 0x48, 0x99),
                Color::rgb(0xa8, 0x55, 0xf7),
            ],
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            bg_primary: Color::rgb(0xf8, 0xfa, 0xfc),
            bg_secondary: Color::rgb(0xff, 0xff, 0xff),
            bg_tertiary: Color::rgb(0xf1, 0xf5, 0xf9),
            bg_panel: Color::rgb(0xe2, 0xe8, 0xf0),
            border: Color::rgb(0xe2, 0xe8, 0xf0),
            text_primary: Color::rgb(0x0f, 0x17, 0x2a),
            text_secondary: Color::rgb(0x33, 0x41, 0x55),
            text_muted: Color::rgb(0x64, 0x74, 0x8b),
            accent: Color::rgb(0x4f, 0x46, 0xe5),
            accent_secondary: Color::rgb(0x93, 0x33, 0xea),
            success: Color::rgb(0x05, 0x96, 0x69),
            warning: Color::rgb(0xd9, 0x77, 0x06),
            danger: Color::rgb(0xe1, 0x1d, 0x48),
            chart: [
                Color::rgb(0x4f, 0x46, 0xe5),
                Color::rgb(0x06, 0xb6, 0xd4),
                Color::rgb(0x05, 0x96, 0x69),
                Color::rgb(0xd9, 0x77, 0x06),
                Color::rgb(0xdb, 0x27, 0x77),
                Color::rgb(0x93, 0x33, 0xea),
            ],
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            bg_primary: Color::rgb(0x00, 0x00, 0x00),
            bg_secondary: Color::rgb(0x0a, 0x0a, 0x0a),
            bg_tertiary: Color::rgb(0x1a, 0x1a, 0x1a),
            bg_panel: Color::rgb(0x22, 0x22, 0x22),
            border: Color::rgb(0xff, 0xff, 0xff),
            text_primary: Color::rgb(0xff, 0xff, 0xff),
            text_secondary: Color::rgb(0xee, 0xee, 0xee),
            text_muted: Color::rgb(0xcc, 0xcc, 0xcc),
            accent: Color::rgb(0x00, 0xff, 0xff),
            accent_secondary: Color::rgb(0xff, 0x00, 0xff),
            success: Color::rgb(0x00, 0xff, 0x00),
            warning: Color::rgb(0xff, 0xff, 0x00),
            danger: Color::rgb(0xff, 0x00, 0x00),
            chart: [
                Color::rgb(0x00, 0xff, 0xff),
                Color::rgb(0xff, 0xff, 0x00),
                Color::rgb(0x00, 0xff, 0x00),
                Color::rgb(0xff, 0x80, 0x00),
                Color::rgb(0xff, 0x00, 0xff),
                Color::rgb(0xff, 0xff, 0xff),
            ],
        }
    }

    pub fn palette(&self) -> Vec<Color> {
        self.chart.to_vec()
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::dark() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::dark()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_case_insensitive_with_dark_fallback() {
        assert_eq!(find("LIGHT").name, "light");
        assert_eq!(find("solarized").name, "dark");
    }
}
