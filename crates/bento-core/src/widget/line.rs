// File: crates/bento-core/src/widget/line.rs
// Summary: Single-series line chart with area fill, dash-reveal animation and snap-to-index hover.

use crate::axis::{plain_ticks, Axis};
use crate::color::Color;
use crate::data::Point2D;
use crate::format::format_grouped;
use crate::scale::LinearScale;
use crate::scene::{Animation, Easing, Item, Paint, Scene, Shape, Stroke};
use crate::shape::{area_path, line_path, polyline_length};
use crate::theme::Theme;
use crate::types::{Margin, Point, Rect, Size, DEFAULT_HEIGHT};

use super::{bottom_axis, explicit_size, finite_max, value_grid_and_axis, Hover, Tooltip, Widget};

/// Headroom applied to the largest value for the y-domain.
pub const Y_HEADROOM: f64 = 1.1;
pub const REVEAL_MS: f32 = 1000.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LineChart {
    pub data: Vec<Point2D>,
    pub title: Option<String>,
    pub width: Option<f32>,
    pub height: f32,
    /// Stroke color; the theme accent when `None`.
    pub color: Option<Color>,
    pub animated: bool,
    pub margin: Margin,
}

/// Scales and pixel positions shared by drawing and hover.
struct Plot {
    x: LinearScale,
    y: LinearScale,
    inner: Size,
    points: Vec<Point>,
}

impl LineChart {
    pub fn new(data: Vec<Point2D>) -> Self {
        Self {
            data,
            title: None,
            width: None,
            height: DEFAULT_HEIGHT,
            color: None,
            animated: true,
            margin: Margin::default(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self { self.title = Some(title.into()); self }
    pub fn width(mut self, width: f32) -> Self { self.width = Some(width); self }
    pub fn height(mut self, height: f32) -> Self { self.height = height; self }
    pub fn color(mut self, color: Color) -> Self { self.color = Some(color); self }
    pub fn animated(mut self, animated: bool) -> Self { self.animated = animated; self }

    /// `[0, max(y) * 1.1]`.
    pub fn y_domain(&self) -> (f64, f64) {
        (0.0, finite_max(self.data.iter().map(|p| p.y)) * Y_HEADROOM)
    }

    fn plot(&self, size: Size) -> Option<Plot> {
        if self.data.is_empty() {
            return None;
        }
        let inner = self.margin.inner(size);
        let x = LinearScale::new((0.0, (self.data.len() - 1) as f64), (0.0, inner.width as f64));
        let y = LinearScale::new(self.y_domain(), (inner.height as f64, 0.0));
        let points = self
            .data
            .iter()
            .enumerate()
            .map(|(i, p)| Point::new(x.scale(i as f64) as f32, y.scale(finite_or_zero(p.y)) as f32))
            .collect();
        Some(Plot { x, y, inner, points })
    }
}

pub(crate) fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Nearest data index under plot x `px`, clamped to `[0, n-1]`.
pub(crate) fn snap_index(x: &LinearScale, px: f32, n: usize) -> usize {
    let i = x.invert(px as f64).round();
    if i.is_nan() || i < 0.0 { 0 } else { (i as usize).min(n.saturating_sub(1)) }
}

impl Widget for LineChart {
    fn kind(&self) -> &'static str { "line" }

    fn title(&self) -> Option<&str> { self.title.as_deref() }

    fn default_height(&self) -> f32 { self.height }

    fn layout(&self, measured: Size) -> Size { explicit_size(self.width, self.height, measured) }

    fn draw(&self, size: Size, theme: &Theme, scene: &mut Scene) {
        let Some(plot) = self.plot(size) else { return; };
        let color = self.color.unwrap_or(theme.accent);
        let m = self.margin;
        scene.translated(m.left, m.top, |s| {
            value_grid_and_axis(s, &plot.y, plot.inner, theme);
            bottom_axis(s, Axis::bottom(plot.x).tick_format(plain_ticks), plot.inner, theme);

            let mut line = Item::new(Shape::Path(line_path(&plot.points))).stroke(Stroke::new(color, 2.5)).tag("series:line");
            if self.animated {
                line = line.animate(Animation::StrokeReveal {
                    length: polyline_length(&plot.points),
                    delay_ms: 0.0,
                    duration_ms: REVEAL_MS,
                    easing: Easing::Linear,
                });
            }
            s.push(line);

            let gradient = Paint::LinearGradient {
                from: Point::new(0.0, 0.0),
                to: Point::new(0.0, plot.inner.height),
                stops: vec![(0.0, color), (1.0, color.with_alpha(0))],
            };
            s.push(Item::new(Shape::Path(area_path(&plot.points, plot.inner.height))).fill(gradient).opacity(0.1).tag("area"));
        });
    }

    fn hover(&self, size: Size, pointer: Point) -> Option<Hover> {
        let plot = self.plot(size)?;
        let m = self.margin;
        let overlay = Rect::from_xywh(m.left, m.top, plot.inner.width, plot.inner.height);
        if !overlay.contains(pointer) {
            return None;
        }
        let index = snap_index(&plot.x, pointer.x - m.left, self.data.len());
        let datum = &self.data[index];
        let marker = plot.points[index].offset(m.left, m.top);
        let tooltip = Tooltip::new(marker, datum.x.to_string()).line(format_grouped(finite_or_zero(datum.y)));
        Some(Hover { index, tooltip, marker: Some(marker) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LineChart {
        LineChart::new(vec![Point2D::new("Mon", 10.0), Point2D::new("Tue", 30.0), Point2D::new("Wed", 20.0)])
    }

    #[test]
    fn y_domain_has_headroom() {
        let (lo, hi) = sample().y_domain();
        assert_eq!(lo, 0.0);
        assert!((hi - 33.0).abs() < 1e-9);
    }

    #[test]
    fn empty_data_draws_nothing() {
        let mut scene = Scene::new(Size::new(600.0, 300.0));
        LineChart::new(Vec::new()).draw(Size::new(600.0, 300.0), &Theme::dark(), &mut scene);
        assert!(scene.is_empty());
        assert!(LineChart::new(Vec::new()).hover(Size::new(600.0, 300.0), Point::new(100.0, 100.0)).is_none());
    }

    #[test]
    fn x_positions_follow_index_not_label() {
        let size = Size::new(600.0, 300.0);
        let mut scene = Scene::new(size);
        sample().draw(size, &Theme::dark(), &mut scene);
        let line = scene.tagged("series:line").next().unwrap();
        match &line.shape {
            Shape::Path(cmds) => {
                assert_eq!(cmds.len(), 3);
                let crate::scene::PathCmd::MoveTo(p) = cmds[0] else { panic!("path must start with MoveTo") };
                assert_eq!(p.x, 50.0);
                assert!((p.y - (20.0 + 250.0 - 250.0 * 10.0 / 33.0)).abs() < 1e-3);
            }
            other => panic!("unexpected shape {other:?}"),
        }
        assert!(matches!(line.animation, Some(Animation::StrokeReveal { duration_ms, .. }) if duration_ms == REVEAL_MS));
    }

    #[test]
    fn hover_snaps_between_points() {
        let size = Size::new(600.0, 300.0);
        // inner width 530, points at x = 0, 265, 530 (+50 margin)
        let h = sample().hover(size, Point::new(50.0 + 200.0, 100.0)).unwrap();
        assert_eq!(h.index, 1);
        assert_eq!(h.tooltip.title, "Tue");
        assert_eq!(h.tooltip.lines, vec!["30".to_string()]);
        assert_eq!(h.marker.unwrap().x, 50.0 + 265.0);
        assert_eq!(sample().hover(size, Point::new(50.0 + 120.0, 100.0)).unwrap().index, 0);
        assert!(sample().hover(size, Point::new(10.0, 100.0)).is_none());
    }

    #[test]
    fn single_point_does_not_panic() {
        let size = Size::new(400.0, 200.0);
        let chart = LineChart::new(vec![Point2D::new(0.0, 0.0)]);
        let mut scene = Scene::new(size);
        chart.draw(size, &Theme::dark(), &mut scene);
        assert_eq!(chart.hover(size, Point::new(200.0, 100.0)).unwrap().index, 0);
    }
}
