// File: crates/bento-core/src/widget/mod.rs
// Summary: Widget trait, hover/tooltip model and the Mount that owns one widget's
// surface, size oracle and redraw policy.

use tracing::{debug, trace};

use crate::axis::Axis;
use crate::scale::LinearScale;
use crate::scene::Scene;
use crate::size::SizeOracle;
use crate::theme::Theme;
use crate::types::{Point, Size, DEFAULT_HEIGHT};

pub mod bar;
pub mod donut;
pub mod funnel;
pub mod gauge;
pub mod heatmap;
pub mod histogram;
pub mod kpi;
pub mod line;
pub mod multiline;

pub use bar::BarChart;
pub use donut::DonutChart;
pub use funnel::FunnelChart;
pub use gauge::RadialGauge;
pub use heatmap::Heatmap;
pub use histogram::Histogram;
pub use kpi::KpiCard;
pub use line::LineChart;
pub use multiline::MultiLineChart;

/// Floating label anchored at a point in widget coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub anchor: Point,
    pub title: String,
    pub lines: Vec<String>,
}

impl Tooltip {
    pub fn new(anchor: Point, title: impl Into<String>) -> Self {
        Self { anchor, title: title.into(), lines: Vec::new() }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Title and lines joined for plain-text display.
    pub fn text(&self) -> String {
        std::iter::once(self.title.as_str()).chain(self.lines.iter().map(String::as_str)).collect::<Vec<_>>().join("\n")
    }
}

/// Result of a hover hit test.
#[derive(Clone, Debug, PartialEq)]
pub struct Hover {
    /// Index of the hovered datum (bar, bin, cell, slice or row).
    pub index: usize,
    pub tooltip: Tooltip,
    /// Floating marker position for line charts.
    pub marker: Option<Point>,
}

/// A chart widget: props in, drawn scene out.
///
/// `draw` must be a pure function of `self`, `size` and `theme`; the
/// [`Mount`] relies on that to skip redundant redraws.
pub trait Widget {
    fn kind(&self) -> &'static str;

    /// Optional card title shown above the widget by the hosting page.
    fn title(&self) -> Option<&str> { None }

    /// Default height handed to the size oracle.
    fn default_height(&self) -> f32 { DEFAULT_HEIGHT }

    /// Aspect ratio for the size oracle (height follows width when set).
    fn aspect(&self) -> Option<f32> { None }

    /// Final drawing size for a measured container size. Widgets with an
    /// explicit width or height override the measured values here.
    fn layout(&self, measured: Size) -> Size { measured }

    /// Clear-and-draw into `scene`. Empty data draws nothing.
    fn draw(&self, size: Size, theme: &Theme, scene: &mut Scene);

    /// Hit test at `pointer` (widget coordinates).
    fn hover(&self, _size: Size, _pointer: Point) -> Option<Hover> { None }

    /// Pointer click; returns true when widget state changed.
    fn click(&mut self, _size: Size, _pointer: Point) -> bool { false }

    /// Hovered datum changed (`None` on leave); returns true when the drawn
    /// output depends on it and a redraw is needed.
    fn set_hovered(&mut self, _index: Option<usize>) -> bool { false }
}

/// Shared `{width?, height}` option pair.
pub(crate) fn explicit_size(width: Option<f32>, height: f32, measured: Size) -> Size {
    Size::new(width.unwrap_or(measured.width), height)
}

/// Rough text advance for layout without a font (about 0.6em per char).
pub(crate) fn approx_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.6
}

/// Horizontal grid on the y ticks plus the left value axis. Draws at the
/// current origin, which must be the plot's top-left corner.
pub(crate) fn value_grid_and_axis(scene: &mut Scene, y: &LinearScale, inner: Size, theme: &Theme) {
    Axis::left(*y).color(theme.text_muted).grid(inner.width, 0.1).draw(scene);
    Axis::left(*y).ticks(5).color(theme.text_muted).draw(scene);
}

/// Bottom axis along the plot's lower edge.
pub(crate) fn bottom_axis(scene: &mut Scene, axis: Axis, inner: Size, theme: &Theme) {
    let axis = axis.color(theme.text_muted);
    scene.translated(0.0, inner.height, |s| axis.draw(s));
}

/// Max of `values`, 0 when there are none or none is finite.
pub(crate) fn finite_max(values: impl IntoIterator<Item = f64>) -> f64 {
    let m = values.into_iter().filter(|v| v.is_finite()).fold(f64::NEG_INFINITY, f64::max);
    if m.is_finite() { m } else { 0.0 }
}

/// One mounted widget: owns its scene and size oracle, redraws the whole
/// scene when props, theme or size change.
#[derive(Clone, Debug)]
pub struct Mount<W: Widget + Clone + PartialEq> {
    widget: W,
    theme: Theme,
    oracle: SizeOracle,
    scene: Scene,
    drawn: Option<(W, Theme, Size)>,
    hovered: Option<Hover>,
    redraws: u64,
}

impl<W: Widget + Clone + PartialEq> Mount<W> {
    /// Mount with no container measured yet; draws at the oracle's initial size.
    pub fn new(widget: W, theme: Theme) -> Self {
        let oracle = SizeOracle::new(widget.default_height(), widget.aspect());
        let mut m = Self {
            widget,
            theme,
            oracle,
            scene: Scene::default(),
            drawn: None,
            hovered: None,
            redraws: 0,
        };
        m.refresh();
        m
    }

    /// Measure the container once; `None` (no container) does nothing.
    pub fn attach(&mut self, container_width: Option<f32>) {
        if self.oracle.observe(container_width).is_some() {
            self.refresh();
        }
    }

    /// One batch of resize observations.
    pub fn resize(&mut self, entries: &[Option<f32>]) {
        if self.oracle.observe_batch(entries).is_some() {
            self.refresh();
        }
    }

    pub fn set_props(&mut self, widget: W) {
        if widget.aspect() != self.widget.aspect() || widget.default_height() != self.widget.default_height() {
            let measured = self.oracle.size().width;
            self.oracle = SizeOracle::new(widget.default_height(), widget.aspect());
            self.oracle.observe(Some(measured));
        }
        self.widget = widget;
        self.refresh();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.refresh();
    }

    pub fn pointer_move(&mut self, pointer: Point) -> Option<&Hover> {
        self.hovered = self.widget.hover(self.size(), pointer);
        trace!(kind = self.widget.kind(), x = pointer.x, y = pointer.y, hit = self.hovered.is_some(), "hover");
        if self.widget.set_hovered(self.hovered.as_ref().map(|h| h.index)) {
            self.refresh();
        }
        self.hovered.as_ref()
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = None;
        if self.widget.set_hovered(None) {
            self.refresh();
        }
    }

    pub fn click(&mut self, pointer: Point) {
        let size = self.size();
        if self.widget.click(size, pointer) {
            self.hovered = None;
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        let size = self.size();
        if let Some((w, t, s)) = &self.drawn {
            if *w == self.widget && *t == self.theme && *s == size {
                return;
            }
        }
        self.scene.clear();
        self.scene.size = size;
        self.widget.draw(size, &self.theme, &mut self.scene);
        self.redraws += 1;
        debug!(kind = self.widget.kind(), width = size.width, height = size.height, redraws = self.redraws, "redraw");
        self.drawn = Some((self.widget.clone(), self.theme, size));
    }

    /// Current drawing size (measured size passed through the widget's layout).
    pub fn size(&self) -> Size { self.widget.layout(self.oracle.size()) }

    pub fn scene(&self) -> &Scene { &self.scene }
    pub fn widget(&self) -> &W { &self.widget }
    pub fn hovered(&self) -> Option<&Hover> { self.hovered.as_ref() }
    pub fn redraws(&self) -> u64 { self.redraws }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CategoryValue;

    fn bars(v: f64) -> BarChart {
        BarChart::new(vec![CategoryValue::new("A", 1.0), CategoryValue::new("B", v)])
    }

    #[test]
    fn unchanged_inputs_do_not_redraw() {
        let mut m = Mount::new(bars(2.0), Theme::dark());
        assert_eq!(m.redraws(), 1);
        m.set_props(bars(2.0));
        m.attach(None);
        m.resize(&[]);
        assert_eq!(m.redraws(), 1);
    }

    #[test]
    fn data_size_and_theme_changes_redraw() {
        let mut m = Mount::new(bars(2.0), Theme::dark());
        m.set_props(bars(3.0));
        assert_eq!(m.redraws(), 2);
        m.attach(Some(900.0));
        assert_eq!(m.size().width, 900.0);
        assert_eq!(m.redraws(), 3);
        m.resize(&[Some(700.0), Some(900.0)]);
        assert_eq!(m.redraws(), 3);
        m.set_theme(Theme::light());
        assert_eq!(m.redraws(), 4);
    }

    #[test]
    fn explicit_width_ignores_container() {
        let mut m = Mount::new(bars(2.0).width(480.0), Theme::dark());
        m.attach(Some(1200.0));
        assert_eq!(m.size(), Size::new(480.0, 300.0));
        assert_eq!(m.redraws(), 1);
    }

    #[test]
    fn hovering_a_donut_lifts_the_slice_until_leave() {
        let chart = DonutChart::new(vec![CategoryValue::new("x", 50.0), CategoryValue::new("y", 50.0)]).legend(false).width(300.0);
        let mut m = Mount::new(chart, Theme::dark());
        m.attach(Some(800.0));
        let before = m.redraws();
        let resting = m.scene().tagged("slice:x").next().cloned();

        assert_eq!(m.pointer_move(Point::new(230.0, 150.0)).map(|h| h.index), Some(0));
        assert_eq!(m.widget().highlighted, Some(0));
        assert_eq!(m.redraws(), before + 1);
        assert_ne!(m.scene().tagged("slice:x").next().cloned(), resting);

        // same slice again: nothing to redraw
        m.pointer_move(Point::new(231.0, 150.0));
        assert_eq!(m.redraws(), before + 1);

        m.pointer_leave();
        assert_eq!(m.widget().highlighted, None);
        assert_eq!(m.scene().tagged("slice:x").next().cloned(), resting);
    }

    #[test]
    fn hover_without_visual_state_does_not_redraw() {
        let mut m = Mount::new(bars(2.0), Theme::dark());
        let before = m.redraws();
        m.pointer_move(Point::new(100.0, 200.0));
        m.pointer_leave();
        assert_eq!(m.redraws(), before);
    }

    #[test]
    fn tooltip_text_joins_lines() {
        let t = Tooltip::new(Point::new(0.0, 0.0), "Jan").line("Value: 3");
        assert_eq!(t.text(), "Jan\nValue: 3");
    }
}
