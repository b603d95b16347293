// File: crates/bento-core/src/widget/histogram.rs
// Summary: Histogram over raw samples; binning happens here on every redraw.

use crate::axis::Axis;
use crate::bin::{bin, extent, max_count, Bin, BinStrategy};
use crate::color::Color;
use crate::data::HistogramSample;
use crate::format::format_grouped;
use crate::scale::LinearScale;
use crate::scene::{Animation, Item, Scene, Shape};
use crate::theme::Theme;
use crate::types::{Margin, Point, Rect, Size, DEFAULT_HEIGHT};

use super::{bottom_axis, explicit_size, value_grid_and_axis, Hover, Tooltip, Widget};

pub const DEFAULT_BINS: usize = 20;
pub const FADE_MS: f32 = 300.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    pub data: Vec<HistogramSample>,
    pub bins: usize,
    pub strategy: BinStrategy,
    pub title: Option<String>,
    pub width: Option<f32>,
    pub height: f32,
    pub color: Option<Color>,
    pub margin: Margin,
}

struct Plot {
    bins: Vec<Bin>,
    rects: Vec<Rect>,
    x: LinearScale,
    y: LinearScale,
    inner: Size,
}

impl Histogram {
    pub fn new(data: Vec<HistogramSample>) -> Self {
        Self {
            data,
            bins: DEFAULT_BINS,
            strategy: BinStrategy::EqualWidth,
            title: None,
            width: None,
            height: DEFAULT_HEIGHT,
            color: None,
            margin: Margin::new(20.0, 20.0, 40.0, 50.0),
        }
    }

    pub fn from_values(values: &[f64]) -> Self {
        Self::new(values.iter().copied().map(HistogramSample::from).collect())
    }

    pub fn bins(mut self, bins: usize) -> Self { self.bins = bins; self }
    pub fn strategy(mut self, strategy: BinStrategy) -> Self { self.strategy = strategy; self }
    pub fn title(mut self, title: impl Into<String>) -> Self { self.title = Some(title.into()); self }
    pub fn width(mut self, width: f32) -> Self { self.width = Some(width); self }
    pub fn height(mut self, height: f32) -> Self { self.height = height; self }
    pub fn color(mut self, color: Color) -> Self { self.color = Some(color); self }

    fn values(&self) -> Vec<f64> {
        self.data.iter().map(|s| s.value).collect()
    }

    /// Buckets for the current samples.
    pub fn binned(&self) -> Vec<Bin> {
        bin(&self.values(), self.bins, self.strategy)
    }

    fn plot(&self, size: Size) -> Option<Plot> {
        let values = self.values();
        let (min, max) = extent(&values)?;
        let bins = bin(&values, self.bins, self.strategy);
        let inner = self.margin.inner(size);
        let x = LinearScale::new((min, max), (0.0, inner.width as f64));
        let y = LinearScale::new((0.0, max_count(&bins) as f64), (inner.height as f64, 0.0));
        let rects = bins
            .iter()
            .map(|b| {
                let (left, right) = if x.is_degenerate() {
                    // one [v, v] bucket: give it the whole plot width
                    (0.0, inner.width)
                } else {
                    (x.scale(b.x0) as f32, x.scale(b.x1) as f32)
                };
                let top = y.scale(b.count as f64) as f32;
                Rect::from_xywh(left, top, ((right - left).max(0.0) - 1.0).max(0.0), inner.height - top)
            })
            .collect();
        Some(Plot { bins, rects, x, y, inner })
    }
}

impl Widget for Histogram {
    fn kind(&self) -> &'static str { "histogram" }

    fn title(&self) -> Option<&str> { self.title.as_deref() }

    fn default_height(&self) -> f32 { self.height }

    fn layout(&self, measured: Size) -> Size { explicit_size(self.width, self.height, measured) }

    fn draw(&self, size: Size, theme: &Theme, scene: &mut Scene) {
        let Some(plot) = self.plot(size) else { return; };
        let color = self.color.unwrap_or(theme.accent);
        let m = self.margin;
        scene.translated(m.left, m.top, |s| {
            value_grid_and_axis(s, &plot.y, plot.inner, theme);
            for (i, r) in plot.rects.iter().enumerate() {
                s.push(
                    Item::new(Shape::Rect { rect: *r, radius: 0.0 })
                        .fill(color)
                        .opacity(0.8)
                        .animate(Animation::FadeIn { delay_ms: 0.0, duration_ms: FADE_MS })
                        .tag(format!("bin:{i}")),
                );
            }
            bottom_axis(s, Axis::bottom(plot.x), plot.inner, theme);
        });
    }

    fn hover(&self, size: Size, pointer: Point) -> Option<Hover> {
        let plot = self.plot(size)?;
        let m = self.margin;
        let local = pointer.offset(-m.left, -m.top);
        if local.y < 0.0 || local.y > plot.inner.height {
            return None;
        }
        // the whole column is hoverable, not just the filled part
        let index = plot.rects.iter().position(|r| local.x >= r.x && local.x <= r.x + r.width)?;
        let b = plot.bins[index];
        let r = plot.rects[index];
        let anchor = Point::new(r.center().x + m.left, r.y + m.top);
        let title = format!("{} - {}", format_grouped(b.x0), format_grouped(b.x1));
        Some(Hover { index, tooltip: Tooltip::new(anchor, title).line(format!("Count: {}", b.count)), marker: None })
    }
}
