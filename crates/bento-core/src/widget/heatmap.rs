// File: crates/bento-core/src/widget/heatmap.rs
// Summary: Row x column heatmap with band scales and a value -> color ramp.

use crate::axis::Axis;
use crate::color::{Color, ColorRamp};
use crate::data::{plain_number, HeatCell};
use crate::scale::{BandScale, ColorScale};
use crate::scene::{Animation, Item, Scene, Shape};
use crate::theme::Theme;
use crate::types::{Margin, Point, Rect, Size, DEFAULT_HEIGHT};

use super::histogram::FADE_MS;
use super::line::finite_or_zero;
use super::{bottom_axis, explicit_size, finite_max, Hover, Tooltip, Widget};

pub const CELL_PADDING: f64 = 0.1;

#[derive(Clone, Debug, PartialEq)]
pub struct Heatmap {
    pub data: Vec<HeatCell>,
    pub title: Option<String>,
    pub width: Option<f32>,
    pub height: f32,
    /// Color ramp; `bg_tertiary -> accent` from the theme when `None`.
    pub ramp: Option<ColorRamp>,
    pub margin: Margin,
}

struct Plot {
    x: BandScale,
    y: BandScale,
    inner: Size,
}

impl Heatmap {
    pub fn new(data: Vec<HeatCell>) -> Self {
        Self {
            data,
            title: None,
            width: None,
            height: DEFAULT_HEIGHT,
            ramp: None,
            margin: Margin::new(20.0, 20.0, 40.0, 100.0),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self { self.title = Some(title.into()); self }
    pub fn width(mut self, width: f32) -> Self { self.width = Some(width); self }
    pub fn height(mut self, height: f32) -> Self { self.height = height; self }
    pub fn ramp(mut self, ramp: ColorRamp) -> Self { self.ramp = Some(ramp); self }

    /// `[0, max]`, with a zero max replaced by 1.
    pub fn color_domain(&self) -> (f64, f64) {
        let max = finite_max(self.data.iter().map(|c| c.value));
        (0.0, if max == 0.0 { 1.0 } else { max })
    }

    fn color_scale(&self, theme: &Theme) -> ColorScale {
        let ramp = self.ramp.clone().unwrap_or(ColorRamp::TwoStop(theme.bg_tertiary, theme.accent));
        ColorScale::new(self.color_domain(), ramp)
    }

    fn plot(&self, size: Size) -> Option<Plot> {
        if self.data.is_empty() {
            return None;
        }
        let inner = self.margin.inner(size);
        let x = BandScale::new(self.data.iter().map(|c| c.column.as_str()), (0.0, inner.width as f64)).padding(CELL_PADDING);
        let y = BandScale::new(self.data.iter().map(|c| c.row.as_str()), (0.0, inner.height as f64)).padding(CELL_PADDING);
        Some(Plot { x, y, inner })
    }

    fn cell_rect(plot: &Plot, cell: &HeatCell) -> Rect {
        Rect::from_xywh(
            plot.x.position(&cell.column).unwrap_or(0.0) as f32,
            plot.y.position(&cell.row).unwrap_or(0.0) as f32,
            plot.x.bandwidth() as f32,
            plot.y.bandwidth() as f32,
        )
    }

    /// Fill color for each cell, in input order.
    pub fn cell_colors(&self, theme: &Theme) -> Vec<Color> {
        let scale = self.color_scale(theme);
        self.data.iter().map(|c| scale.color(finite_or_zero(c.value))).collect()
    }
}

fn tooltip_title(cell: &HeatCell) -> String {
    format!("{} - {}: {}", cell.row, cell.column, plain_number(cell.value))
}

impl Widget for Heatmap {
    fn kind(&self) -> &'static str { "heatmap" }

    fn title(&self) -> Option<&str> { self.title.as_deref() }

    fn default_height(&self) -> f32 { self.height }

    fn layout(&self, measured: Size) -> Size { explicit_size(self.width, self.height, measured) }

    fn draw(&self, size: Size, theme: &Theme, scene: &mut Scene) {
        let Some(plot) = self.plot(size) else { return; };
        let color = self.color_scale(theme);
        let m = self.margin;
        scene.translated(m.left, m.top, |s| {
            // input order: a duplicated (row, column) pair paints over the earlier one
            for cell in &self.data {
                s.push(
                    Item::new(Shape::Rect { rect: Self::cell_rect(&plot, cell), radius: 0.0 })
                        .fill(color.color(finite_or_zero(cell.value)))
                        .opacity(0.8)
                        .animate(Animation::FadeIn { delay_ms: 0.0, duration_ms: FADE_MS })
                        .tag(format!("cell:{}:{}", cell.row, cell.column)),
                );
            }
            bottom_axis(s, Axis::bottom(plot.x.clone()).font_size(11.0), plot.inner, theme);
            Axis::left(plot.y.clone()).font_size(11.0).color(theme.text_muted).draw(s);
        });
    }

    fn hover(&self, size: Size, pointer: Point) -> Option<Hover> {
        let plot = self.plot(size)?;
        let local = pointer.offset(-self.margin.left, -self.margin.top);
        let index = (0..self.data.len()).rev().find(|&i| Self::cell_rect(&plot, &self.data[i]).contains(local))?;
        let cell = &self.data[index];
        let r = Self::cell_rect(&plot, cell).translate(self.margin.left, self.margin.top);
        Some(Hover { index, tooltip: Tooltip::new(r.center(), tooltip_title(cell)), marker: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_values_map_to_minimum_color() {
        let theme = Theme::dark();
        let map = Heatmap::new(vec![HeatCell::new("r1", "c1", 0.0), HeatCell::new("r2", "c2", 0.0)]);
        assert_eq!(map.color_domain(), (0.0, 1.0));
        assert!(map.cell_colors(&theme).iter().all(|c| *c == theme.bg_tertiary));
    }

    #[test]
    fn max_value_maps_to_accent() {
        let theme = Theme::dark();
        let map = Heatmap::new(vec![HeatCell::new("r", "a", 2.0), HeatCell::new("r", "b", 8.0)]);
        assert_eq!(map.cell_colors(&theme)[1], theme.accent);
        let viridis = map.clone().ramp(ColorRamp::Viridis);
        assert_eq!(viridis.cell_colors(&theme)[1], ColorRamp::Viridis.at(1.0));
    }

    #[test]
    fn domains_use_first_seen_order_and_last_duplicate_wins_hover() {
        let map = Heatmap::new(vec![
            HeatCell::new("Mon", "9h", 1.0),
            HeatCell::new("Tue", "9h", 2.0),
            HeatCell::new("Mon", "9h", 5.0),
        ]);
        let size = Size::new(600.0, 300.0);
        let mut scene = Scene::new(size);
        map.draw(size, &Theme::dark(), &mut scene);
        assert_eq!(scene.tagged("cell:").count(), 3);
        // Mon is the first row band
        let h = map.hover(size, Point::new(100.0 + 240.0, 20.0 + 60.0)).unwrap();
        assert_eq!(h.index, 2);
        assert_eq!(h.tooltip.title, "Mon - 9h: 5");
    }
}
