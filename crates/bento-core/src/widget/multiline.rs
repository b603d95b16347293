// File: crates/bento-core/src/widget/multiline.rs
// Summary: Multi-series line chart over wide rows with a clickable legend that toggles series.

use std::collections::BTreeSet;

use crate::axis::{plain_ticks, Axis};
use crate::color::Color;
use crate::data::MultiSeriesRow;
use crate::format::format_grouped;
use crate::scale::LinearScale;
use crate::scene::{Anchor, Animation, Easing, Item, Scene, Shape, Stroke};
use crate::shape::{line_path, polyline_length};
use crate::theme::Theme;
use crate::types::{Margin, Point, Rect, Size, DEFAULT_HEIGHT};

use super::line::{snap_index, REVEAL_MS, Y_HEADROOM};
use super::{approx_text_width, bottom_axis, explicit_size, finite_max, value_grid_and_axis, Hover, Tooltip, Widget};

const LEGEND_FONT: f32 = 11.0;
const SWATCH: f32 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub struct MultiLineChart {
    pub data: Vec<MultiSeriesRow>,
    /// Declared series keys, in legend and color order.
    pub keys: Vec<String>,
    active: BTreeSet<String>,
    pub title: Option<String>,
    pub width: Option<f32>,
    pub height: f32,
    /// Series colors by key index (cycled); the theme's first four chart colors when `None`.
    pub colors: Option<Vec<Color>>,
    pub animated: bool,
    pub margin: Margin,
}

struct Plot {
    x: LinearScale,
    y: LinearScale,
    inner: Size,
}

impl MultiLineChart {
    /// Every key starts active.
    pub fn new<S: Into<String>>(data: Vec<MultiSeriesRow>, keys: impl IntoIterator<Item = S>) -> Self {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        Self {
            data,
            active: keys.iter().cloned().collect(),
            keys,
            title: None,
            width: None,
            height: DEFAULT_HEIGHT,
            colors: None,
            animated: true,
            margin: Margin::default(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self { self.title = Some(title.into()); self }
    pub fn width(mut self, width: f32) -> Self { self.width = Some(width); self }
    pub fn height(mut self, height: f32) -> Self { self.height = height; self }
    pub fn colors(mut self, colors: Vec<Color>) -> Self { self.colors = Some(colors); self }
    pub fn animated(mut self, animated: bool) -> Self { self.animated = animated; self }

    pub fn is_active(&self, key: &str) -> bool { self.active.contains(key) }

    /// Active keys in declaration order.
    pub fn active_keys(&self) -> Vec<&str> {
        self.keys.iter().filter(|k| self.active.contains(k.as_str())).map(String::as_str).collect()
    }

    /// Flip one key in the active set; unknown keys are ignored.
    pub fn toggle(&mut self, key: &str) -> bool {
        if !self.keys.iter().any(|k| k == key) {
            return false;
        }
        if !self.active.remove(key) {
            self.active.insert(key.to_string());
        }
        true
    }

    /// `[0, max * 1.1]` over every declared key, hidden or not.
    pub fn y_domain(&self) -> (f64, f64) {
        let max = finite_max(self.keys.iter().flat_map(|k| self.data.iter().map(move |row| row.value(k))));
        (0.0, max * Y_HEADROOM)
    }

    fn palette(&self, theme: &Theme) -> Vec<Color> {
        match &self.colors {
            Some(c) if !c.is_empty() => c.clone(),
            _ => theme.chart[..4].to_vec(),
        }
    }

    /// Legend swatch hit boxes in widget coordinates, one per key.
    pub fn legend_boxes(&self) -> Vec<(String, Rect)> {
        let mut x = self.margin.left;
        let top = ((self.margin.top - SWATCH) / 2.0).max(0.0);
        self.keys
            .iter()
            .map(|k| {
                let w = SWATCH + 6.0 + approx_text_width(k, LEGEND_FONT);
                let r = Rect::from_xywh(x, top, w, SWATCH);
                x += w + 16.0;
                (k.clone(), r)
            })
            .collect()
    }

    fn plot(&self, size: Size) -> Option<Plot> {
        if self.data.is_empty() {
            return None;
        }
        let inner = self.margin.inner(size);
        let x = LinearScale::new((0.0, (self.data.len() - 1) as f64), (0.0, inner.width as f64));
        let y = LinearScale::new(self.y_domain(), (inner.height as f64, 0.0));
        Some(Plot { x, y, inner })
    }

    fn series_points(&self, plot: &Plot, key: &str) -> Vec<Point> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, row)| Point::new(plot.x.scale(i as f64) as f32, plot.y.scale(row.value(key)) as f32))
            .collect()
    }

    fn draw_legend(&self, scene: &mut Scene, palette: &[Color], theme: &Theme) {
        for (idx, (key, r)) in self.legend_boxes().into_iter().enumerate() {
            let opacity = if self.is_active(&key) { 1.0 } else { 0.35 };
            let swatch = Rect::from_xywh(r.x, r.y, SWATCH, SWATCH);
            scene.push(
                Item::new(Shape::Rect { rect: swatch, radius: 2.0 })
                    .fill(palette[idx % palette.len()])
                    .opacity(opacity)
                    .tag(format!("legend:{key}")),
            );
            let at = Point::new(r.x + SWATCH + 6.0, r.y + SWATCH - 1.0);
            scene.push(
                Item::new(Shape::Text { at, content: key, size: LEGEND_FONT, anchor: Anchor::Start, bold: false })
                    .fill(theme.text_secondary)
                    .opacity(opacity),
            );
        }
    }
}

impl Widget for MultiLineChart {
    fn kind(&self) -> &'static str { "multiline" }

    fn title(&self) -> Option<&str> { self.title.as_deref() }

    fn default_height(&self) -> f32 { self.height }

    fn layout(&self, measured: Size) -> Size { explicit_size(self.width, self.height, measured) }

    fn draw(&self, size: Size, theme: &Theme, scene: &mut Scene) {
        let Some(plot) = self.plot(size) else { return; };
        let palette = self.palette(theme);
        self.draw_legend(scene, &palette, theme);
        let m = self.margin;
        scene.translated(m.left, m.top, |s| {
            value_grid_and_axis(s, &plot.y, plot.inner, theme);
            for (idx, key) in self.keys.iter().enumerate() {
                if !self.is_active(key) {
                    continue;
                }
                let points = self.series_points(&plot, key);
                let mut item = Item::new(Shape::Path(line_path(&points)))
                    .stroke(Stroke::new(palette[idx % palette.len()], 2.0))
                    .tag(format!("series:{key}"));
                if self.animated {
                    item = item.animate(Animation::StrokeReveal {
                        length: polyline_length(&points),
                        delay_ms: 0.0,
                        duration_ms: REVEAL_MS,
                        easing: Easing::Linear,
                    });
                }
                s.push(item);
            }
            bottom_axis(s, Axis::bottom(plot.x).tick_format(plain_ticks), plot.inner, theme);
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
        let row = &self.data[index];
        let active = self.active_keys();
        let top = finite_max(active.iter().map(|k| row.value(k)));
        let marker = Point::new(plot.x.scale(index as f64) as f32 + m.left, plot.y.scale(top) as f32 + m.top);
        let mut tooltip = Tooltip::new(marker, row.date.to_string());
        for k in active {
            tooltip = tooltip.line(format!("{k}: {}", format_grouped(row.value(k))));
        }
        Some(Hover { index, tooltip, marker: Some(marker) })
    }

    /// Clicking a legend entry toggles that series.
    fn click(&mut self, _size: Size, pointer: Point) -> bool {
        let hit = self.legend_boxes().into_iter().find(|(_, r)| r.contains(pointer)).map(|(k, _)| k);
        match hit {
            Some(key) => self.toggle(&key),
            None => false,
        }
    }
}
