// File: crates/bento-core/src/widget/bar.rs
// Summary: Category bar chart with staggered grow-in animation and per-bar tooltips.

use crate::axis::Axis;
use crate::color::Color;
use crate::data::CategoryValue;
use crate::format::format_grouped;
use crate::scale::{BandScale, LinearScale};
use crate::scene::{Animation, Easing, Item, Scene, Shape};
use crate::theme::Theme;
use crate::types::{Margin, Point, Rect, Size, DEFAULT_HEIGHT};

use super::line::finite_or_zero;
use super::{bottom_axis, explicit_size, finite_max, value_grid_and_axis, Hover, Tooltip, Widget};

pub const BAND_PADDING: f64 = 0.3;
pub const GROW_MS: f32 = 500.0;
pub const STAGGER_MS: f32 = 50.0;

#[derive(Clone, Debug, PartialEq)]
pub struct BarChart {
    pub data: Vec<CategoryValue>,
    pub title: Option<String>,
    pub width: Option<f32>,
    pub height: f32,
    /// Bar fill; the theme accent when `None`.
    pub color: Option<Color>,
    pub animated: bool,
    pub margin: Margin,
}

struct Plot {
    x: BandScale,
    y: LinearScale,
    inner: Size,
}

impl BarChart {
    pub fn new(data: Vec<CategoryValue>) -> Self {
        Self {
            data,
            title: None,
            width: None,
            height: DEFAULT_HEIGHT,
            color: None,
            animated: true,
            margin: Margin::new(20.0, 20.0, 40.0, 50.0),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self { self.title = Some(title.into()); self }
    pub fn width(mut self, width: f32) -> Self { self.width = Some(width); self }
    pub fn height(mut self, height: f32) -> Self { self.height = height; self }
    pub fn color(mut self, color: Color) -> Self { self.color = Some(color); self }
    pub fn animated(mut self, animated: bool) -> Self { self.animated = animated; self }

    /// `[0, max]` with no headroom.
    pub fn y_domain(&self) -> (f64, f64) {
        (0.0, finite_max(self.data.iter().map(|d| d.value)))
    }

    fn plot(&self, size: Size) -> Option<Plot> {
        if self.data.is_empty() {
            return None;
        }
        let inner = self.margin.inner(size);
        let x = BandScale::new(self.data.iter().map(|d| d.label.as_str()), (0.0, inner.width as f64)).padding(BAND_PADDING);
        let y = LinearScale::new(self.y_domain(), (inner.height as f64, 0.0));
        Some(Plot { x, y, inner })
    }

    /// Settled bar rectangle for datum `i`, in plot coordinates.
    fn bar_rect(&self, plot: &Plot, i: usize) -> Rect {
        let d = &self.data[i];
        let x = plot.x.position(&d.label).unwrap_or(0.0) as f32;
        let top = (plot.y.scale(finite_or_zero(d.value)) as f32).min(plot.inner.height);
        Rect::from_xywh(x, top, plot.x.bandwidth() as f32, plot.inner.height - top)
    }

    /// Settled bar rectangles in widget coordinates, in input order.
    pub fn bar_rects(&self, size: Size) -> Vec<Rect> {
        let Some(plot) = self.plot(size) else { return Vec::new(); };
        (0..self.data.len()).map(|i| self.bar_rect(&plot, i).translate(self.margin.left, self.margin.top)).collect()
    }
}

impl Widget for BarChart {
    fn kind(&self) -> &'static str { "bar" }

    fn title(&self) -> Option<&str> { self.title.as_deref() }

    fn default_height(&self) -> f32 { self.height }

    fn layout(&self, measured: Size) -> Size { explicit_size(self.width, self.height, measured) }

    fn draw(&self, size: Size, theme: &Theme, scene: &mut Scene) {
        let Some(plot) = self.plot(size) else { return; };
        let color = self.color.unwrap_or(theme.accent);
        let m = self.margin;
        scene.translated(m.left, m.top, |s| {
            value_grid_and_axis(s, &plot.y, plot.inner, theme);
            for (i, d) in self.data.iter().enumerate() {
                let mut bar = Item::new(Shape::Rect { rect: self.bar_rect(&plot, i), radius: 0.0 })
                    .fill(color)
                    .tag(format!("bar:{}", d.label));
                if self.animated {
                    bar = bar.animate(Animation::Grow {
                        baseline: plot.inner.height,
                        delay_ms: STAGGER_MS * i as f32,
                        duration_ms: GROW_MS,
                        easing: Easing::CubicInOut,
                    });
                }
                s.push(bar);
            }
            bottom_axis(s, Axis::bottom(plot.x.clone()).font_size(12.0), plot.inner, theme);
        });
    }

    fn hover(&self, size: Size, pointer: Point) -> Option<Hover> {
        let rects = self.bar_rects(size);
        // later bars paint over earlier ones with the same label
        let index = (0..rects.len()).rev().find(|&i| rects[i].contains(pointer))?;
        let d = &self.data[index];
        let r = rects[index];
        let anchor = Point::new(r.center().x, r.y);
        Some(Hover { index, tooltip: Tooltip::new(anchor, d.label.clone()).line(format_grouped(d.value)), marker: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bar_is_flat_and_max_bar_is_full() {
        let chart = BarChart::new(vec![CategoryValue::new("A", 0.0), CategoryValue::new("B", 10.0)]);
        let size = Size::new(600.0, 300.0);
        let rects = chart.bar_rects(size);
        assert_eq!(rects[0].height, 0.0);
        assert_eq!(rects[1].height, 240.0);
        assert_eq!(rects[1].y, 20.0);
    }

    #[test]
    fn all_zero_values_do_not_divide_by_zero() {
        let chart = BarChart::new(vec![CategoryValue::new("A", 0.0), CategoryValue::new("B", 0.0)]);
        let rects = chart.bar_rects(Size::new(600.0, 300.0));
        assert!(rects.iter().all(|r| r.height == 0.0 && r.y.is_finite()));
    }

    #[test]
    fn bars_stagger_and_grow_from_baseline() {
        let chart = BarChart::new(vec![CategoryValue::new("A", 5.0), CategoryValue::new("B", 10.0), CategoryValue::new("C", 7.0)]);
        let size = Size::new(600.0, 300.0);
        let mut scene = Scene::new(size);
        chart.draw(size, &Theme::dark(), &mut scene);
        let delays: Vec<f32> = scene
            .tagged("bar:")
            .map(|it| match it.animation {
                Some(Animation::Grow { delay_ms, .. }) => delay_ms,
                _ => -1.0,
            })
            .collect();
        assert_eq!(delays, vec![0.0, 50.0, 100.0]);
        let first = scene.sample(0.0);
        let bar = first.tagged("bar:B").next().unwrap();
        assert_eq!(bar.opacity, 0.0);
        assert!(matches!(bar.shape, Shape::Rect { rect, .. } if rect.height == 0.0 && rect.y == 260.0));
        assert_eq!(scene.settle_ms(), 600.0);
    }

    #[test]
    fn hover_prefers_last_duplicate() {
        let chart = BarChart::new(vec![CategoryValue::new("A", 5.0), CategoryValue::new("A", 9.0)]);
        let size = Size::new(600.0, 300.0);
        let r = chart.bar_rects(size)[1];
        let h = chart.hover(size, Point::new(r.center().x, r.bottom() - 1.0)).unwrap();
        assert_eq!(h.index, 1);
        assert_eq!(h.tooltip.text(), "A\n9");
        assert!(chart.hover(size, Point::new(1.0, 1.0)).is_none());
    }
}
