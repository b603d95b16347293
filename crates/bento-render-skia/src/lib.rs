// File: crates/bento-render-skia/src/lib.rs
// Summary: Headless Skia raster backend: draws a bento-core Scene to RGBA8 pixels or PNG.

use std::path::Path;

use bento_core::color::Color;
use bento_core::scene::{Item, Paint, PathCmd, Scene, Shape, Stroke};
use skia_safe as skia;
use thiserror::Error;
use tracing::debug;

pub mod text;

pub use text::TextShaper;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create {width}x{height} raster surface")]
    Surface { width: i32, height: i32 },

    #[error("encode PNG failed")]
    Encode,

    #[error("pixel readback failed")]
    Readback,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Device pixels per scene unit.
    pub scale: f32,
    /// Animation time to sample; `None` renders the settled frame.
    pub time_ms: Option<f32>,
    /// Used when the scene has no background of its own.
    pub background: Color,
    /// Text can be skipped to keep pixels stable across font setups.
    pub draw_text: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            time_ms: None,
            background: Color::rgb(0x0f, 0x0f, 0x14),
            draw_text: true,
        }
    }
}

fn sk_color(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn make_paint(paint: &Paint, opacity: f32) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    match paint {
        Paint::Solid(c) => {
            p.set_color(sk_color(*c));
            p.set_alpha_f(c.alpha_f() * opacity);
        }
        Paint::LinearGradient { from, to, stops } => {
            let colors: Vec<skia::Color> = stops.iter().map(|(_, c)| sk_color(*c)).collect();
            let pos: Vec<f32> = stops.iter().map(|(o, _)| *o).collect();
            let shader = skia::Shader::linear_gradient(
                ((from.x, from.y), (to.x, to.y)),
                colors.as_slice(),
                Some(pos.as_slice()),
                skia::TileMode::Clamp,
                None,
                None,
            );
            match (shader, stops.first()) {
                (Some(s), _) => {
                    p.set_shader(s);
                }
                // zero-length gradient: first stop as a flat color
                (None, Some((_, c))) => {
                    p.set_color(sk_color(*c));
                }
                (None, None) => {}
            }
            p.set_alpha_f(opacity);
        }
    }
    p
}

fn stroke_paint(stroke: &Stroke, opacity: f32) -> skia::Paint {
    let mut p = make_paint(&stroke.paint, opacity);
    p.set_style(skia::PaintStyle::Stroke);
    p.set_stroke_width(stroke.width);
    if stroke.round_cap {
        p.set_stroke_cap(skia::PaintCap::Round);
    }
    if let Some((on, off)) = stroke.dash {
        p.set_path_effect(skia::PathEffect::dash(&[on.max(0.0), off.max(0.0)], stroke.dash_offset));
    }
    p
}

fn build_path(cmds: &[PathCmd]) -> skia::Path {
    let mut path = skia::Path::new();
    for cmd in cmds {
        match cmd {
            PathCmd::MoveTo(p) => {
                path.move_to((p.x, p.y));
            }
            PathCmd::LineTo(p) => {
                path.line_to((p.x, p.y));
            }
            PathCmd::QuadTo(c, p) => {
                path.quad_to((c.x, c.y), (p.x, p.y));
            }
            PathCmd::ArcTo { radius, large_arc, sweep, to } => {
                let size = if *large_arc { skia::path::ArcSize::Large } else { skia::path::ArcSize::Small };
                // SVG sweep=1 is clockwise in y-down space
                let dir = if *sweep { skia::PathDirection::CW } else { skia::PathDirection::CCW };
                path.arc_to_rotated((*radius, *radius), 0.0, size, dir, (to.x, to.y));
            }
            PathCmd::Close => {
                path.close();
            }
        }
    }
    path
}

fn draw_shape(canvas: &skia::Canvas, shape: &Shape, paint: &skia::Paint) {
    match shape {
        Shape::Rect { rect, radius } => {
            let r = skia::Rect::from_xywh(rect.x, rect.y, rect.width.max(0.0), rect.height.max(0.0));
            if *radius > 0.0 {
                canvas.draw_rrect(skia::RRect::new_rect_xy(r, *radius, *radius), paint);
            } else {
                canvas.draw_rect(r, paint);
            }
        }
        Shape::Path(cmds) => {
            canvas.draw_path(&build_path(cmds), paint);
        }
        Shape::Line { from, to } => {
            canvas.draw_line((from.x, from.y), (to.x, to.y), paint);
        }
        Shape::Circle { center, radius } => {
            canvas.draw_circle((center.x, center.y), *radius, paint);
        }
        Shape::Text { .. } => {}
    }
}

/// CPU raster renderer for scenes.
pub struct SkiaRenderer {
    shaper: TextShaper,
}

impl Default for SkiaRenderer {
    fn default() -> Self { Self::new() }
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self { shaper: TextShaper::new() }
    }

    fn draw_item(&self, canvas: &skia::Canvas, item: &Item, opts: &RenderOptions) {
        let opacity = item.opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return;
        }
        if let Shape::Text { at, content, size, anchor, bold } = &item.shape {
            if let (true, Some(fill)) = (opts.draw_text, &item.fill) {
                let paint = make_paint(fill, opacity);
                self.shaper.draw(canvas, content, at.x, at.y, *size, *anchor, *bold, &paint);
            }
            return;
        }
        if let Some(fill) = &item.fill {
            let mut paint = make_paint(fill, opacity);
            paint.set_style(skia::PaintStyle::Fill);
            draw_shape(canvas, &item.shape, &paint);
        }
        if let Some(stroke) = &item.stroke {
            if stroke.width > 0.0 {
                draw_shape(canvas, &item.shape, &stroke_paint(stroke, opacity));
            }
        }
    }

    fn paint_scene(&self, scene: &Scene, opts: &RenderOptions) -> RenderResult<skia::Surface> {
        let frame = match opts.time_ms {
            Some(t) => scene.sample(t),
            None => scene.settled(),
        };
        let scale = if opts.scale.is_finite() && opts.scale > 0.0 { opts.scale } else { 1.0 };
        let width = ((frame.size.width * scale).ceil() as i32).max(1);
        let height = ((frame.size.height * scale).ceil() as i32).max(1);
        let mut surface = skia::surfaces::raster_n32_premul((width, height)).ok_or(RenderError::Surface { width, height })?;
        let canvas = surface.canvas();
        canvas.clear(sk_color(frame.background.unwrap_or(opts.background)));
        canvas.save();
        canvas.scale((scale, scale));
        for item in &frame.items {
            self.draw_item(canvas, item, opts);
        }
        canvas.restore();
        debug!(width, height, items = frame.items.len(), "scene rasterized");
        Ok(surface)
    }

    /// Render to tightly packed, unpremultiplied RGBA8: `(pixels, width, height, stride)`.
    pub fn render_to_rgba8(&self, scene: &Scene, opts: &RenderOptions) -> RenderResult<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.paint_scene(scene, opts)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut px = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut px, stride, (0, 0)) {
            return Err(RenderError::Readback);
        }
        Ok((px, w as u32, h as u32, stride))
    }

    pub fn render_to_png_bytes(&self, scene: &Scene, opts: &RenderOptions) -> RenderResult<Vec<u8>> {
        let mut surface = self.paint_scene(scene, opts)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image.encode_to_data(skia::EncodedImageFormat::PNG).ok_or(RenderError::Encode)?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render and write a PNG, creating parent directories.
    pub fn render_to_png(&self, scene: &Scene, opts: &RenderOptions, path: impl AsRef<Path>) -> RenderResult<()> {
        let bytes = self.render_to_png_bytes(scene, opts)?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
