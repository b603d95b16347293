// File: crates/bento-core/src/scene.rs
// Summary: Renderer-agnostic drawing surface: a flat display list of styled shapes
// with optional entrance/transition animations that can be sampled at a time.

use crate::color::Color;
use crate::types::{Point, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    /// SVG-style elliptical arc with equal radii.
    ArcTo { radius: f32, large_arc: bool, sweep: bool, to: Point },
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect { rect: Rect, radius: f32 },
    Path(Vec<PathCmd>),
    Line { from: Point, to: Point },
    Circle { center: Point, radius: f32 },
    Text { at: Point, content: String, size: f32, anchor: Anchor, bold: bool },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient between two points; stops are (offset 0..=1, color).
    LinearGradient { from: Point, to: Point, stops: Vec<(f32, Color)> },
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self { Paint::Solid(c) }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f32,
    /// On/off dash lengths.
    pub dash: Option<(f32, f32)>,
    pub dash_offset: f32,
    pub round_cap: bool,
}

impl Stroke {
    pub fn new(paint: impl Into<Paint>, width: f32) -> Self {
        Self { paint: paint.into(), width, dash: None, dash_offset: 0.0, round_cap: false }
    }
}

/// CSS-like easing curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    CubicInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 { t2 * t2 * t2 / 2.0 } else { ((t2 - 2.0).powi(3) + 2.0) / 2.0 }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Animation {
    /// Stroke drawn progressively along its length.
    StrokeReveal { length: f32, delay_ms: f32, duration_ms: f32, easing: Easing },
    /// Rect grows upward from `baseline` while fading in.
    Grow { baseline: f32, delay_ms: f32, duration_ms: f32, easing: Easing },
    FadeIn { delay_ms: f32, duration_ms: f32 },
    /// Dashed stroke whose "on" length moves between two values along a
    /// closed path of length `circumference`.
    DashTransition { from: f32, to: f32, circumference: f32, duration_ms: f32, easing: Easing },
}

impl Animation {
    fn progress(delay_ms: f32, duration_ms: f32, easing: Easing, t_ms: f32) -> f32 {
        if duration_ms <= 0.0 { return 1.0; }
        easing.apply((t_ms - delay_ms) / duration_ms)
    }

    /// Time after which the animation has settled.
    pub fn end_ms(&self) -> f32 {
        match *self {
            Animation::StrokeReveal { delay_ms, duration_ms, .. }
            | Animation::Grow { delay_ms, duration_ms, .. }
            | Animation::FadeIn { delay_ms, duration_ms } => delay_ms + duration_ms,
            Animation::DashTransition { duration_ms, .. } => duration_ms,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub shape: Shape,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
    pub opacity: f32,
    pub animation: Option<Animation>,
    /// Semantic tag (e.g. `bar:Jan`, `series:revenue`) for hit tests and tests.
    pub tag: Option<String>,
}

impl Item {
    pub fn new(shape: Shape) -> Self {
        Self { shape, fill: None, stroke: None, opacity: 1.0, animation: None, tag: None }
    }
    pub fn fill(mut self, paint: impl Into<Paint>) -> Self { self.fill = Some(paint.into()); self }
    pub fn stroke(mut self, stroke: Stroke) -> Self { self.stroke = Some(stroke); self }
    pub fn opacity(mut self, opacity: f32) -> Self { self.opacity = opacity; self }
    pub fn animate(mut self, animation: Animation) -> Self { self.animation = Some(animation); self }
    pub fn tag(mut self, tag: impl Into<String>) -> Self { self.tag = Some(tag.into()); self }

    fn translate(&mut self, dx: f32, dy: f32) {
        let mv = |p: &mut Point| { p.x += dx; p.y += dy; };
        match &mut self.shape {
            Shape::Rect { rect, .. } => { *rect = rect.translate(dx, dy); }
            Shape::Path(cmds) => {
                for c in cmds.iter_mut() {
                    match c {
                        PathCmd::MoveTo(p) | PathCmd::LineTo(p) => mv(p),
                        PathCmd::QuadTo(c1, p) => { mv(c1); mv(p); }
                        PathCmd::ArcTo { to, .. } => mv(to),
                        PathCmd::Close => {}
                    }
                }
            }
            Shape::Line { from, to } => { mv(from); mv(to); }
            Shape::Circle { center, .. } => mv(center),
            Shape::Text { at, .. } => mv(at),
        }
        let shift = |paint: &mut Paint| {
            if let Paint::LinearGradient { from, to, .. } = paint { mv(from); mv(to); }
        };
        if let Some(f) = &mut self.fill { shift(f); }
        if let Some(s) = &mut self.stroke { shift(&mut s.paint); }
        if let Some(Animation::Grow { baseline, .. }) = &mut self.animation { *baseline += dy; }
    }

    /// Resolve the animation at `t_ms`, returning a static item.
    pub fn sampled(&self, t_ms: f32) -> Item {
        let mut out = self.clone();
        out.animation = None;
        let Some(anim) = self.animation else { return out; };
        match anim {
            Animation::StrokeReveal { length, delay_ms, duration_ms, easing } => {
                let p = Animation::progress(delay_ms, duration_ms, easing, t_ms);
                if let Some(s) = &mut out.stroke {
                    if p < 1.0 {
                        s.dash = Some((length, length));
                        s.dash_offset = length * (1.0 - p);
                    }
                }
            }
            Animation::Grow { baseline, delay_ms, duration_ms, easing } => {
                let p = Animation::progress(delay_ms, duration_ms, easing, t_ms);
                if let Shape::Rect { rect, .. } = &mut out.shape {
                    let h = rect.height * p;
                    let bottom = baseline;
                    let top = baseline + (rect.y - baseline) * p;
                    *rect = Rect::from_xywh(rect.x, top.min(bottom), rect.width, h);
                }
                out.opacity *= p;
            }
            Animation::FadeIn { delay_ms, duration_ms } => {
                out.opacity *= Animation::progress(delay_ms, duration_ms, Easing::Linear, t_ms);
            }
            Animation::DashTransition { from, to, circumference, duration_ms, easing } => {
                let p = Animation::progress(0.0, duration_ms, easing, t_ms);
                let on = from + (to - from) * p;
                if let Some(s) = &mut out.stroke {
                    s.dash = Some((on, (circumference - on).max(0.0)));
                }
            }
        }
        out
    }
}

/// One widget's drawing surface. Items are stored in absolute coordinates;
/// `offset` applies to items pushed while it is active.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Scene {
    pub size: Size,
    pub background: Option<Color>,
    pub items: Vec<Item>,
    offset: (f32, f32),
}

impl Scene {
    pub fn new(size: Size) -> Self {
        Self { size, background: None, items: Vec::new(), offset: (0.0, 0.0) }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Drop every item; the size is kept.
    pub fn clear(&mut self) {
        self.items.clear();
        self.offset = (0.0, 0.0);
    }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn push(&mut self, mut item: Item) {
        let (dx, dy) = self.offset;
        if dx != 0.0 || dy != 0.0 { item.translate(dx, dy); }
        self.items.push(item);
    }

    /// Run `f` with an additional translation (like an SVG `<g transform>`).
    pub fn translated<R>(&mut self, dx: f32, dy: f32, f: impl FnOnce(&mut Scene) -> R) -> R {
        let saved = self.offset;
        self.offset = (saved.0 + dx, saved.1 + dy);
        let r = f(self);
        self.offset = saved;
        r
    }

    /// Append another scene's items at `(dx, dy)` relative to the current offset.
    pub fn embed(&mut self, other: &Scene, dx: f32, dy: f32) {
        self.translated(dx, dy, |s| {
            for it in &other.items { s.push(it.clone()); }
        });
    }

    /// Items whose tag starts with `prefix`.
    pub fn tagged<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.items.iter().filter(move |it| it.tag.as_deref().is_some_and(|t| t.starts_with(prefix)))
    }

    /// Time at which every animation has settled.
    pub fn settle_ms(&self) -> f32 {
        self.items.iter().filter_map(|it| it.animation.map(|a| a.end_ms())).fold(0.0, f32::max)
    }

    /// Static frame of the scene at `t_ms` after the redraw.
    pub fn sample(&self, t_ms: f32) -> Scene {
        Scene {
            size: self.size,
            background: self.background,
            items: self.items.iter().map(|it| it.sampled(t_ms)).collect(),
            offset: (0.0, 0.0),
        }
    }

    /// Fully settled frame.
    pub fn settled(&self) -> Scene {
        self.sample(f32::INFINITY)
    }
}
