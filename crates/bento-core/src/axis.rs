// File: crates/bento-core/src/axis.rs
// Summary: Axis renderer: tick marks and labels for a linear or band scale along one of four sides.

use crate::color::Color;
use crate::data::plain_number;
use crate::scale::{BandScale, LinearScale};
use crate::scene::{Anchor, Item, Scene, Shape, Stroke};
use crate::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Top,
    Bottom,
    Left,
    Right,
}

impl Orientation {
    fn name(self) -> &'static str {
        match self {
            Orientation::Top => "top",
            Orientation::Bottom => "bottom",
            Orientation::Left => "left",
            Orientation::Right => "right",
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Top | Orientation::Bottom)
    }

    /// +1 when ticks point down/right, -1 when they point up/left.
    fn direction(self) -> f32 {
        match self {
            Orientation::Top | Orientation::Left => -1.0,
            Orientation::Bottom | Orientation::Right => 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AxisScale {
    Linear(LinearScale),
    Band(BandScale),
}

impl From<LinearScale> for AxisScale {
    fn from(s: LinearScale) -> Self { AxisScale::Linear(s) }
}

impl From<BandScale> for AxisScale {
    fn from(s: BandScale) -> Self { AxisScale::Band(s) }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TickValue {
    Number(f64),
    Label(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: TickValue,
    /// Pixel position along the axis.
    pub offset: f32,
    pub label: String,
}

type TickFormat = Box<dyn Fn(&TickValue) -> String>;

pub struct Axis {
    pub scale: AxisScale,
    pub orientation: Orientation,
    pub tick_size: f32,
    pub tick_padding: f32,
    /// Suggested tick count for linear scales.
    pub tick_count: usize,
    pub color: Color,
    pub font_size: f32,
    tick_format: Option<TickFormat>,
    /// Grid mode: ticks extend this far across the plot, no labels or domain line.
    grid: Option<(f32, f32)>,
}

impl Axis {
    pub fn new(scale: impl Into<AxisScale>, orientation: Orientation) -> Self {
        Self {
            scale: scale.into(),
            orientation,
            tick_size: 6.0,
            tick_padding: 3.0,
            tick_count: 10,
            color: Color::rgb(0x8b, 0x92, 0xa3),
            font_size: 10.0,
            tick_format: None,
            grid: None,
        }
    }

    pub fn bottom(scale: impl Into<AxisScale>) -> Self { Self::new(scale, Orientation::Bottom) }
    pub fn left(scale: impl Into<AxisScale>) -> Self { Self::new(scale, Orientation::Left) }

    pub fn ticks(mut self, count: usize) -> Self { self.tick_count = count; self }
    pub fn tick_size(mut self, size: f32) -> Self { self.tick_size = size; self }
    pub fn color(mut self, color: Color) -> Self { self.color = color; self }
    pub fn font_size(mut self, size: f32) -> Self { self.font_size = size; self }

    /// Override the automatic value -> label formatter.
    pub fn tick_format(mut self, f: impl Fn(&TickValue) -> String + 'static) -> Self {
        self.tick_format = Some(Box::new(f));
        self
    }

    /// Turn the axis into grid lines spanning `length` px across the plot at `opacity`.
    pub fn grid(mut self, length: f32, opacity: f32) -> Self {
        self.grid = Some((length, opacity));
        self
    }

    /// Tick values, positions and labels, all recomputed from the scale.
    pub fn tick_list(&self) -> Vec<Tick> {
        let label = |v: &TickValue, default: String| match &self.tick_format {
            Some(f) => f(v),
            None => default,
        };
        match &self.scale {
            AxisScale::Linear(s) => {
                let fmt = s.tick_format(self.tick_count);
                s.ticks(self.tick_count)
                    .into_iter()
                    .map(|t| {
                        let value = TickValue::Number(t);
                        let l = label(&value, fmt(t));
                        Tick { value, offset: s.scale(t) as f32, label: l }
                    })
                    .collect()
            }
            AxisScale::Band(b) => {
                let half = b.bandwidth() / 2.0;
                b.domain()
                    .iter()
                    .enumerate()
                    .map(|(i, d)| {
                        let value = TickValue::Label(d.clone());
                        let l = label(&value, d.clone());
                        Tick { value, offset: (b.position_at(i) + half) as f32, label: l }
                    })
                    .collect()
            }
        }
    }

    fn range(&self) -> (f32, f32) {
        let (r0, r1) = match &self.scale {
            AxisScale::Linear(s) => s.range(),
            AxisScale::Band(b) => b.range(),
        };
        (r0 as f32, r1 as f32)
    }

    /// Draw at the scene's current origin (the caller translates to the axis line).
    pub fn draw(&self, scene: &mut Scene) {
        let o = self.orientation;
        let k = o.direction();
        let horizontal = o.is_horizontal();
        let at = |along: f32, across: f32| if horizontal { Point::new(along, across) } else { Point::new(across, along) };
        let tag = format!("axis:{}", o.name());

        if let Some((length, opacity)) = self.grid {
            for t in self.tick_list() {
                // grid lines point into the plot, against the tick direction
                let line = Shape::Line { from: at(t.offset, 0.0), to: at(t.offset, -k * length) };
                scene.push(Item::new(line).stroke(Stroke::new(self.color, 1.0)).opacity(opacity).tag("grid"));
            }
            return;
        }

        let (r0, r1) = self.range();
        let outer = k * self.tick_size;
        let domain = crate::shape::line_path(&[at(r0, outer), at(r0, 0.0), at(r1, 0.0), at(r1, outer)]);
        scene.push(Item::new(Shape::Path(domain)).stroke(Stroke::new(self.color, 1.0)).tag(tag.clone()));

        let spacing = self.tick_size.max(0.0) + self.tick_padding;
        for t in self.tick_list() {
            let mark = Shape::Line { from: at(t.offset, 0.0), to: at(t.offset, k * self.tick_size) };
            scene.push(Item::new(mark).stroke(Stroke::new(self.color, 1.0)).tag(tag.clone()));
            let (pos, anchor) = match o {
                Orientation::Bottom => (at(t.offset, spacing + 0.71 * self.font_size), Anchor::Middle),
                Orientation::Top => (at(t.offset, -spacing), Anchor::Middle),
                Orientation::Left => (at(t.offset, -spacing).offset(0.0, 0.32 * self.font_size), Anchor::End),
                Orientation::Right => (at(t.offset, spacing).offset(0.0, 0.32 * self.font_size), Anchor::Start),
            };
            let text = Shape::Text { at: pos, content: t.label, size: self.font_size, anchor, bold: false };
            scene.push(Item::new(text).fill(self.color).tag(tag.clone()));
        }
    }
}

/// Label formatter that prints numeric ticks without trailing zeros.
pub fn plain_ticks(v: &TickValue) -> String {
    match v {
        TickValue::Number(n) => plain_number(*n),
        TickValue::Label(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Size;

    #[test]
    fn linear_ticks_are_nice_and_positioned() {
        let s = LinearScale::new((0.0, 33.0), (250.0, 0.0));
        let ticks = Axis::left(s).ticks(5).tick_list();
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["0", "5", "10", "15", "20", "25", "30"]);
        assert_eq!(ticks[0].offset, 250.0);
    }

    #[test]
    fn band_ticks_sit_at_band_centres() {
        let b = BandScale::new(["a", "b"], (0.0, 100.0));
        let ticks = Axis::bottom(b).tick_list();
        assert_eq!(ticks.iter().map(|t| t.offset).collect::<Vec<_>>(), vec![25.0, 75.0]);
        assert_eq!(ticks[1].label, "b");
    }

    #[test]
    fn tick_format_override() {
        let s = LinearScale::new((0.0, 4.0), (0.0, 100.0));
        let ticks = Axis::bottom(s).tick_format(|v| format!("#{}", plain_ticks(v))).tick_list();
        assert_eq!(ticks.first().map(|t| t.label.as_str()), Some("#0"));
    }

    #[test]
    fn redraw_replaces_ticks() {
        let mut scene = Scene::new(Size::new(200.0, 100.0));
        Axis::bottom(LinearScale::new((0.0, 10.0), (0.0, 100.0))).draw(&mut scene);
        let first = scene.items.len();
        scene.clear();
        Axis::bottom(LinearScale::new((0.0, 2.0), (0.0, 100.0))).ticks(2).draw(&mut scene);
        assert!(scene.items.len() < first);
        assert!(scene.tagged("axis:bottom").count() > 0);
    }

    #[test]
    fn grid_mode_draws_only_lines() {
        let mut scene = Scene::new(Size::new(200.0, 100.0));
        Axis::left(LinearScale::new((0.0, 10.0), (100.0, 0.0))).ticks(5).grid(150.0, 0.1).draw(&mut scene);
        assert!(scene.items.iter().all(|it| matches!(it.shape, Shape::Line { .. }) && it.opacity == 0.1));
        match scene.items[0].shape {
            Shape::Line { from, to } => assert_eq!((from.x, to.x), (0.0, 150.0)),
            _ => unreachable!(),
        }
    }
}
