// File: crates/bento-core/src/widget/kpi.rs
// Summary: KPI card: title, big value with optional unit, month-over-month change badge and icon tile.

use crate::color::Color;
use crate::data::{plain_number, KpiColor, KpiStat};
use crate::scene::{Anchor, Item, Paint, Scene, Shape, Stroke};
use crate::theme::Theme;
use crate::types::{Point, Rect, Size};

use super::{approx_text_width, Hover, Tooltip, Widget};

pub const CARD_HEIGHT: f32 = 148.0;
const PAD: f32 = 20.0;
const ICON: f32 = 56.0;
const VALUE_FONT: f32 = 34.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

/// Glyph, text and direction of a change badge: `>= 0` is up.
pub fn change_badge(change: f64) -> (&'static str, String, Trend) {
    if change >= 0.0 {
        ("\u{2197}", format!("+{}% vs last month", plain_number(change.abs())), Trend::Up)
    } else {
        ("\u{2198}", format!("{}% vs last month", plain_number(change.abs())), Trend::Down)
    }
}

/// Gradient end points for the icon tile.
fn tile_colors(color: KpiColor, theme: &Theme) -> (Color, Color) {
    match color {
        KpiColor::Accent => (theme.accent, theme.accent_secondary),
        KpiColor::Success => (theme.success, Color::rgb(0x06, 0xb6, 0xd4)),
        KpiColor::Warning => (theme.warning, Color::rgb(0xf9, 0x73, 0x16)),
        KpiColor::Danger => (theme.danger, Color::rgb(0xef, 0x44, 0x44)),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KpiCard {
    pub stat: KpiStat,
    pub width: Option<f32>,
    pub height: f32,
}

impl KpiCard {
    pub fn new(stat: KpiStat) -> Self {
        Self { stat, width: None, height: CARD_HEIGHT }
    }

    pub fn width(mut self, width: f32) -> Self { self.width = Some(width); self }

    /// Color of the change line, when there is one.
    pub fn change_color(&self, theme: &Theme) -> Option<Color> {
        self.stat.change.map(|c| match change_badge(c).2 {
            Trend::Up => theme.success,
            Trend::Down => theme.danger,
        })
    }

    fn icon_rect(&self, size: Size) -> Rect {
        Rect::from_xywh(size.width - PAD - ICON, PAD, ICON, ICON)
    }
}

impl Widget for KpiCard {
    fn kind(&self) -> &'static str { "kpi" }

    fn default_height(&self) -> f32 { self.height }

    fn layout(&self, measured: Size) -> Size { super::explicit_size(self.width, self.height, measured) }

    fn draw(&self, size: Size, theme: &Theme, scene: &mut Scene) {
        let card = Rect::from_xywh(0.0, 0.0, size.width, size.height);
        scene.push(
            Item::new(Shape::Rect { rect: card, radius: 16.0 })
                .fill(theme.bg_secondary)
                .stroke(Stroke::new(theme.border, 1.0))
                .tag("kpi:card"),
        );

        let title = Shape::Text {
            at: Point::new(PAD, PAD + 12.0),
            content: self.stat.title.to_uppercase(),
            size: 12.0,
            anchor: Anchor::Start,
            bold: true,
        };
        scene.push(Item::new(title).fill(theme.text_secondary).tag("kpi:title"));

        let value_text = self.stat.value.to_string();
        let baseline = PAD + 12.0 + 16.0 + VALUE_FONT;
        let gradient = Paint::LinearGradient {
            from: Point::new(PAD, 0.0),
            to: Point::new(PAD + approx_text_width(&value_text, VALUE_FONT).max(1.0), 0.0),
            stops: vec![(0.0, theme.accent), (1.0, theme.accent_secondary)],
        };
        let value = Shape::Text { at: Point::new(PAD, baseline), content: value_text.clone(), size: VALUE_FONT, anchor: Anchor::Start, bold: true };
        scene.push(Item::new(value).fill(gradient).tag("kpi:value"));

        if let Some(unit) = &self.stat.unit {
            let at = Point::new(PAD + approx_text_width(&value_text, VALUE_FONT) + 8.0, baseline - 6.0);
            let unit = Shape::Text { at, content: unit.to_uppercase(), size: 11.0, anchor: Anchor::Start, bold: false };
            scene.push(Item::new(unit).fill(theme.text_muted).tag("kpi:unit"));
        }

        if let (Some(change), Some(color)) = (self.stat.change, self.change_color(theme)) {
            let (glyph, text, _) = change_badge(change);
            let line = Shape::Text {
                at: Point::new(PAD, baseline + 30.0),
                content: format!("{glyph} {text}"),
                size: 13.0,
                anchor: Anchor::Start,
                bold: true,
            };
            scene.push(Item::new(line).fill(color).tag("kpi:change"));
        }

        if let Some(icon) = &self.stat.icon {
            let tile = self.icon_rect(size);
            let (a, b) = tile_colors(self.stat.color, theme);
            let fill = Paint::LinearGradient {
                from: Point::new(tile.x, tile.y),
                to: Point::new(tile.right(), tile.bottom()),
                stops: vec![(0.0, a), (1.0, b)],
            };
            scene.push(Item::new(Shape::Rect { rect: tile, radius: 12.0 }).fill(fill).opacity(0.9).tag("kpi:icon"));
            let glyph = Shape::Text {
                at: tile.center().offset(0.0, 8.0),
                content: icon.clone(),
                size: 22.0,
                anchor: Anchor::Middle,
                bold: false,
            };
            scene.push(Item::new(glyph).fill(Color::WHITE));
        }
    }

    fn hover(&self, size: Size, pointer: Point) -> Option<Hover> {
        let card = Rect::from_xywh(0.0, 0.0, size.width, size.height);
        if !card.contains(pointer) {
            return None;
        }
        let mut tooltip = Tooltip::new(pointer, self.stat.title.clone()).line(self.stat.value.to_string());
        if let Some(change) = self.stat.change {
            tooltip = tooltip.line(change_badge(change).1);
        }
        Some(Hover { index: 0, tooltip, marker: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(scene: &Scene, tag: &str) -> Option<String> {
        scene.tagged(tag).find_map(|it| match &it.shape {
            Shape::Text { content, .. } => Some(content.clone()),
            _ => None,
        })
    }

    #[test]
    fn change_sign_picks_glyph_and_color() {
        let theme = Theme::dark();
        let up = KpiCard::new(KpiStat::new("Revenue", 1200.0).change(12.5));
        assert_eq!(up.change_color(&theme), Some(theme.success));
        assert_eq!(change_badge(12.5), ("\u{2197}", "+12.5% vs last month".to_string(), Trend::Up));
        let down = KpiCard::new(KpiStat::new("Churn", "3.1").change(-3.2));
        assert_eq!(down.change_color(&theme), Some(theme.danger));
        assert_eq!(change_badge(-3.2).1, "3.2% vs last month");
        assert_eq!(change_badge(0.0).2, Trend::Up);
    }

    #[test]
    fn optional_parts_are_skipped() {
        let size = Size::new(320.0, CARD_HEIGHT);
        let mut scene = Scene::new(size);
        KpiCard::new(KpiStat::new("Leads", 42.0)).draw(size, &Theme::dark(), &mut scene);
        assert_eq!(text_of(&scene, "kpi:title").as_deref(), Some("LEADS"));
        assert_eq!(text_of(&scene, "kpi:value").as_deref(), Some("42"));
        assert!(scene.tagged("kpi:change").next().is_none());
        assert!(scene.tagged("kpi:icon").next().is_none());
        assert!(scene.tagged("kpi:unit").next().is_none());
    }

    #[test]
    fn full_card() {
        let size = Size::new(360.0, CARD_HEIGHT);
        let mut scene = Scene::new(size);
        let stat = KpiStat::new("Speed", 61.0).unit("km/h").change(-4.0).icon("S").color(KpiColor::Warning);
        KpiCard::new(stat).draw(size, &Theme::dark(), &mut scene);
        assert_eq!(text_of(&scene, "kpi:change").as_deref(), Some("\u{2198} 4% vs last month"));
        assert_eq!(text_of(&scene, "kpi:unit").as_deref(), Some("KM/H"));
        let tile = scene.tagged("kpi:icon").next().unwrap();
        assert!(matches!(&tile.fill, Some(Paint::LinearGradient { stops, .. }) if stops[0].1 == Theme::dark().warning));
    }
}
