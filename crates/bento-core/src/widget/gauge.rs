// File: crates/bento-core/src/widget/gauge.rs
// Summary: Radial percentage gauge: a ring whose filled arc follows a 0..100 value.

use std::f32::consts::{PI, TAU};

use crate::scene::{Anchor, Animation, Easing, Item, Paint, PathCmd, Scene, Shape, Stroke};
use crate::shape::polar;
use crate::theme::Theme;
use crate::types::{Point, Size};

use super::{Hover, Tooltip, Widget};

pub const DEFAULT_SIZE: f32 = 160.0;
pub const STROKE: f32 = 14.0;
pub const TRANSITION_MS: f32 = 800.0;
/// Room under the ring for the percentage and caption.
const LABEL_BAND: f32 = 56.0;

#[derive(Clone, Debug, PartialEq)]
pub struct RadialGauge {
    pub value: f64,
    /// Value shown before the last change; the arc transitions from it.
    pub previous: Option<f64>,
    pub size: f32,
    pub caption: String,
    pub title: Option<String>,
}

impl RadialGauge {
    pub fn new(value: f64) -> Self {
        Self { value, previous: None, size: DEFAULT_SIZE, caption: "Conversion rate".into(), title: None }
    }

    pub fn size(mut self, size: f32) -> Self { self.size = size; self }
    pub fn caption(mut self, caption: impl Into<String>) -> Self { self.caption = caption.into(); self }
    pub fn title(mut self, title: impl Into<String>) -> Self { self.title = Some(title.into()); self }

    /// Move to a new value, keeping the current one as the transition start.
    pub fn set_value(&mut self, value: f64) {
        self.previous = Some(self.value);
        self.value = value;
    }

    fn normalize(v: f64) -> f64 {
        if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0) }
    }

    /// Clamped percentage in `[0, 100]`.
    pub fn percent(&self) -> f64 { Self::normalize(self.value) }

    /// Filled share of the ring in `[0, 1]`.
    pub fn fill_fraction(&self) -> f64 { self.percent() / 100.0 }

    pub fn radius(&self) -> f32 { self.size / 2.0 - STROKE / 2.0 }

    pub fn circumference(&self) -> f32 { TAU * self.radius() }

    pub fn label(&self) -> String { format!("{}%", self.percent().round()) }
}

/// Full circle starting at 12 o'clock, running clockwise.
fn circle_from_top(center: Point, r: f32) -> Vec<PathCmd> {
    vec![
        PathCmd::MoveTo(polar(center, r, 0.0)),
        PathCmd::ArcTo { radius: r, large_arc: false, sweep: true, to: polar(center, r, PI) },
        PathCmd::ArcTo { radius: r, large_arc: false, sweep: true, to: polar(center, r, 0.0) },
    ]
}

impl Widget for RadialGauge {
    fn kind(&self) -> &'static str { "gauge" }

    fn title(&self) -> Option<&str> { self.title.as_deref() }

    fn default_height(&self) -> f32 { self.size + LABEL_BAND }

    /// Fixed size regardless of the container.
    fn layout(&self, _measured: Size) -> Size { Size::new(self.size, self.size + LABEL_BAND) }

    fn draw(&self, _size: Size, theme: &Theme, scene: &mut Scene) {
        let c = Point::new(self.size / 2.0, self.size / 2.0);
        let r = self.radius();
        let circ = self.circumference();

        scene.push(
            Item::new(Shape::Circle { center: c, radius: r })
                .stroke(Stroke::new(theme.bg_panel, STROKE))
                .tag("gauge:track"),
        );

        let dash = self.fill_fraction() as f32 * circ;
        let from = self.previous.map(|p| Self::normalize(p) as f32 / 100.0 * circ);
        if dash > 0.0 || from.is_some_and(|f| f > 0.0) {
            let gradient = Paint::LinearGradient {
                from: Point::new(c.x - r, c.y),
                to: Point::new(c.x + r, c.y),
                stops: vec![(0.0, theme.accent), (1.0, theme.accent_secondary)],
            };
            let mut stroke = Stroke::new(gradient, STROKE);
            stroke.round_cap = true;
            stroke.dash = Some((dash, circ - dash));
            let mut fill = Item::new(Shape::Path(circle_from_top(c, r))).stroke(stroke).tag("gauge:fill");
            if let Some(from) = from.filter(|f| (f - dash).abs() > f32::EPSILON) {
                fill = fill.animate(Animation::DashTransition {
                    from,
                    to: dash,
                    circumference: circ,
                    duration_ms: TRANSITION_MS,
                    easing: Easing::CubicInOut,
                });
            }
            scene.push(fill);
        }

        let pct = Shape::Text {
            at: Point::new(c.x, self.size + 26.0),
            content: self.label(),
            size: 24.0,
            anchor: Anchor::Middle,
            bold: true,
        };
        scene.push(Item::new(pct).fill(theme.text_primary).tag("gauge:label"));
        let caption = Shape::Text {
            at: Point::new(c.x, self.size + 46.0),
            content: self.caption.clone(),
            size: 12.0,
            anchor: Anchor::Middle,
            bold: false,
        };
        scene.push(Item::new(caption).fill(theme.text_muted).tag("gauge:caption"));
    }

    fn hover(&self, _size: Size, pointer: Point) -> Option<Hover> {
        let bounds = crate::types::Rect::from_xywh(0.0, 0.0, self.size, self.size + LABEL_BAND);
        bounds.contains(pointer).then(|| Hover { index: 0, tooltip: Tooltip::new(pointer, self.label()), marker: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_dash(g: &RadialGauge) -> Option<(f32, f32)> {
        let mut scene = Scene::new(g.layout(Size::default()));
        g.draw(scene.size, &Theme::dark(), &mut scene);
        scene.settled().tagged("gauge:fill").next().and_then(|it| it.stroke.as_ref().and_then(|s| s.dash))
    }

    #[test]
    fn value_is_clamped() {
        let over = RadialGauge::new(150.0);
        assert_eq!(over.fill_fraction(), 1.0);
        assert_eq!(over.label(), "100%");
        let (on, off) = fill_dash(&over).unwrap();
        assert!((on - over.circumference()).abs() < 1e-3 && off.abs() < 1e-3);

        let under = RadialGauge::new(-5.0);
        assert_eq!(under.fill_fraction(), 0.0);
        assert_eq!(under.label(), "0%");
        assert!(fill_dash(&under).is_none());
    }

    #[test]
    fn ring_geometry() {
        let g = RadialGauge::new(42.4);
        assert_eq!(g.radius(), 73.0);
        assert_eq!(g.label(), "42%");
        assert_eq!(g.layout(Size::new(900.0, 300.0)), Size::new(160.0, 216.0));
    }

    #[test]
    fn value_change_transitions_dash() {
        let mut g = RadialGauge::new(20.0);
        g.set_value(60.0);
        let mut scene = Scene::new(g.layout(Size::default()));
        g.draw(scene.size, &Theme::dark(), &mut scene);
        let circ = g.circumference();
        let start = scene.sample(0.0);
        let dash = start.tagged("gauge:fill").next().unwrap().stroke.as_ref().unwrap().dash.unwrap();
        assert!((dash.0 - 0.2 * circ).abs() < 1e-3);
        let end = scene.sample(TRANSITION_MS);
        let dash = end.tagged("gauge:fill").next().unwrap().stroke.as_ref().unwrap().dash.unwrap();
        assert!((dash.0 - 0.6 * circ).abs() < 1e-3);
    }
}
