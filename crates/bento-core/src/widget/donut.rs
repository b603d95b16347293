// File: crates/bento-core/src/widget/donut.rs
// Summary: Donut chart: pie layout of rounded annular sectors, centre total and a side legend.

use crate::color::Color;
use crate::data::{plain_number, PieSlice};
use crate::format::format_grouped;
use crate::scale::OrdinalScale;
use crate::scene::{Anchor, Animation, Item, Scene, Shape};
use crate::shape::{angle_of, arc_path, pie, PieArc};
use crate::theme::Theme;
use crate::types::{Point, Rect, Size, DEFAULT_HEIGHT};

use super::histogram::FADE_MS;
use super::{Hover, Tooltip, Widget};

/// Widest the chart area grows when the width comes from the container.
pub const MAX_AUTO_WIDTH: f32 = 420.0;
pub const LEGEND_WIDTH: f32 = 140.0;
pub const HOVER_SCALE: f32 = 1.03;

#[derive(Clone, Debug, PartialEq)]
pub struct DonutChart {
    pub data: Vec<PieSlice>,
    pub title: Option<String>,
    pub width: Option<f32>,
    /// 0 means "same as the width".
    pub height: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub corner_radius: f32,
    /// Slice palette; the theme's six chart colors when `None`.
    pub colors: Option<Vec<Color>>,
    /// Slice drawn enlarged; a `Mount` sets it from the pointer.
    pub highlighted: Option<usize>,
    pub legend: bool,
}

impl DonutChart {
    pub fn new(data: Vec<PieSlice>) -> Self {
        Self {
            data,
            title: None,
            width: None,
            height: DEFAULT_HEIGHT,
            inner_radius: 60.0,
            outer_radius: 100.0,
            corner_radius: 6.0,
            colors: None,
            highlighted: None,
            legend: true,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self { self.title = Some(title.into()); self }
    pub fn width(mut self, width: f32) -> Self { self.width = Some(width); self }
    pub fn height(mut self, height: f32) -> Self { self.height = height; self }
    pub fn radii(mut self, inner: f32, outer: f32) -> Self { self.inner_radius = inner; self.outer_radius = outer; self }
    pub fn colors(mut self, colors: Vec<Color>) -> Self { self.colors = Some(colors); self }
    pub fn highlight(mut self, index: Option<usize>) -> Self { self.highlighted = index; self }
    pub fn legend(mut self, legend: bool) -> Self { self.legend = legend; self }

    pub fn total(&self) -> f64 {
        self.data.iter().map(|d| d.value).filter(|v| v.is_finite()).sum()
    }

    /// Pie arcs in input order.
    pub fn arcs(&self) -> Vec<PieArc> {
        pie(&self.data.iter().map(|d| d.value).collect::<Vec<_>>())
    }

    /// Width of the pie area (the legend sits to its right).
    fn chart_width(&self, measured: Size) -> f32 {
        self.width.unwrap_or(measured.width.min(MAX_AUTO_WIDTH))
    }

    fn center(&self, size: Size) -> Point {
        let chart_w = if self.legend { size.width - LEGEND_WIDTH } else { size.width };
        Point::new(chart_w / 2.0, size.height / 2.0)
    }

    fn colors_for(&self, theme: &Theme) -> OrdinalScale {
        let palette = match &self.colors {
            Some(c) => c.clone(),
            None => theme.palette(),
        };
        OrdinalScale::new(self.data.iter().map(|d| d.label.as_str()), palette)
    }
}

impl Widget for DonutChart {
    fn kind(&self) -> &'static str { "donut" }

    fn title(&self) -> Option<&str> { self.title.as_deref() }

    fn default_height(&self) -> f32 { self.height }

    fn aspect(&self) -> Option<f32> { Some(1.0) }

    fn layout(&self, measured: Size) -> Size {
        let w = self.chart_width(measured);
        let h = if self.height > 0.0 { self.height } else { w };
        Size::new(if self.legend { w + LEGEND_WIDTH } else { w }, h)
    }

    fn draw(&self, size: Size, theme: &Theme, scene: &mut Scene) {
        if self.data.is_empty() {
            return;
        }
        let c = self.center(size);
        let colors = self.colors_for(theme);
        for (arc, slice) in self.arcs().iter().zip(&self.data) {
            let k = if self.highlighted == Some(arc.index) { HOVER_SCALE } else { 1.0 };
            let path = arc_path(c, self.inner_radius * k, self.outer_radius * k, arc.start_angle, arc.end_angle, self.corner_radius);
            if path.is_empty() {
                continue;
            }
            let fill = colors.get(&slice.label).unwrap_or(theme.accent);
            scene.push(
                Item::new(Shape::Path(path))
                    .fill(fill)
                    .opacity(0.95)
                    .animate(Animation::FadeIn { delay_ms: 0.0, duration_ms: FADE_MS })
                    .tag(format!("slice:{}", slice.label)),
            );
        }

        let total = Shape::Text {
            at: c.offset(0.0, -0.2 * 18.0),
            content: format_grouped(self.total()),
            size: 18.0,
            anchor: Anchor::Middle,
            bold: true,
        };
        scene.push(Item::new(total).fill(theme.text_primary).tag("center:total"));
        let caption = Shape::Text { at: c.offset(0.0, 1.1 * 12.0), content: "total".into(), size: 12.0, anchor: Anchor::Middle, bold: false };
        scene.push(Item::new(caption).fill(theme.text_muted).tag("center:caption"));

        if self.legend {
            let x = size.width - LEGEND_WIDTH + 12.0;
            let rows = self.data.len() as f32;
            let mut y = (size.height - rows * 20.0) / 2.0;
            for (i, slice) in self.data.iter().enumerate() {
                let swatch = Rect::from_xywh(x, y + 5.0, 10.0, 10.0);
                let fill = colors.get(&slice.label).unwrap_or(theme.accent);
                scene.push(Item::new(Shape::Rect { rect: swatch, radius: 2.0 }).fill(fill).tag(format!("legend:{i}")));
                let label = Shape::Text { at: Point::new(x + 16.0, y + 14.0), content: slice.label.clone(), size: 12.0, anchor: Anchor::Start, bold: false };
                scene.push(Item::new(label).fill(theme.text_secondary));
                y += 20.0;
            }
        }
    }

    /// Tooltip is anchored at the donut centre.
    fn hover(&self, size: Size, pointer: Point) -> Option<Hover> {
        if self.data.is_empty() {
            return None;
        }
        let c = self.center(size);
        let d = c.distance(pointer);
        if d < self.inner_radius || d > self.outer_radius * HOVER_SCALE {
            return None;
        }
        let a = angle_of(c, pointer);
        let arc = self.arcs().into_iter().find(|arc| arc.contains_angle(a))?;
        let slice = &self.data[arc.index];
        let tooltip = Tooltip::new(c, slice.label.clone()).line(plain_number(slice.value));
        Some(Hover { index: arc.index, tooltip, marker: None })
    }

    fn set_hovered(&mut self, index: Option<usize>) -> bool {
        if self.highlighted == index {
            return false;
        }
        self.highlighted = index;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CategoryValue;
    use std::f32::consts::PI;

    fn halves() -> DonutChart {
        DonutChart::new(vec![CategoryValue::new("x", 50.0), CategoryValue::new("y", 50.0)])
    }

    #[test]
    fn equal_slices_split_the_circle_and_total_is_centered() {
        let chart = halves();
        for arc in chart.arcs() {
            assert!((arc.sweep() - PI).abs() < 1e-5);
        }
        let size = chart.layout(Size::new(800.0, 300.0));
        assert_eq!(size, Size::new(420.0 + LEGEND_WIDTH, 300.0));
        let mut scene = Scene::new(size);
        chart.draw(size, &Theme::dark(), &mut scene);
        match &scene.tagged("center:total").next().unwrap().shape {
            Shape::Text { content, .. } => assert_eq!(content, "100"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(scene.tagged("slice:").count(), 2);
        assert_eq!(scene.tagged("legend:").count(), 2);
    }

    #[test]
    fn hover_resolves_slice_by_angle() {
        let chart = halves().legend(false).width(300.0);
        let size = chart.layout(Size::new(1000.0, 0.0));
        let c = Point::new(150.0, 150.0);
        // right half is the first slice (starts at 12 o'clock, clockwise)
        let h = chart.hover(size, c.offset(80.0, 0.0)).unwrap();
        assert_eq!(h.index, 0);
        assert_eq!(h.tooltip.anchor, c);
        assert_eq!(chart.hover(size, c.offset(-80.0, 0.0)).unwrap().index, 1);
        assert!(chart.hover(size, c.offset(10.0, 0.0)).is_none());
    }

    #[test]
    fn grouped_total_and_zero_slices() {
        let chart = DonutChart::new(vec![CategoryValue::new("a", 1200.0), CategoryValue::new("b", 0.0)]);
        let size = Size::new(560.0, 300.0);
        let mut scene = Scene::new(size);
        chart.draw(size, &Theme::dark(), &mut scene);
        assert_eq!(scene.tagged("slice:").count(), 1);
        assert!(scene.tagged("center:total").any(|it| matches!(&it.shape, Shape::Text { content, .. } if content == "1,200")));
    }

    #[test]
    fn highlight_scales_the_slice() {
        let size = Size::new(560.0, 300.0);
        let mut plain = Scene::new(size);
        let mut lifted = Scene::new(size);
        halves().draw(size, &Theme::dark(), &mut plain);
        halves().highlight(Some(0)).draw(size, &Theme::dark(), &mut lifted);
        assert_ne!(plain.tagged("slice:x").next(), lifted.tagged("slice:x").next());
        assert_eq!(plain.tagged("slice:y").next(), lifted.tagged("slice:y").next());
    }
}
