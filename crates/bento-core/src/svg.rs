// File: crates/bento-core/src/svg.rs
// Summary: Scene -> standalone SVG document writer.

use std::fmt::Write as _;

use crate::color::Color;
use crate::scene::{Anchor, Item, Paint, PathCmd, Scene, Shape, Stroke};

fn num(v: f32) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// SVG path data for a command list.
pub fn path_data(cmds: &[PathCmd]) -> String {
    let mut d = String::new();
    for c in cmds {
        if !d.is_empty() { d.push(' '); }
        match c {
            PathCmd::MoveTo(p) => { let _ = write!(d, "M{},{}", num(p.x), num(p.y)); }
            PathCmd::LineTo(p) => { let _ = write!(d, "L{},{}", num(p.x), num(p.y)); }
            PathCmd::QuadTo(c1, p) => { let _ = write!(d, "Q{},{} {},{}", num(c1.x), num(c1.y), num(p.x), num(p.y)); }
            PathCmd::ArcTo { radius, large_arc, sweep, to } => {
                let _ = write!(
                    d,
                    "A{r},{r} 0 {} {} {},{}",
                    u8::from(*large_arc),
                    u8::from(*sweep),
                    num(to.x),
                    num(to.y),
                    r = num(*radius)
                );
            }
            PathCmd::Close => d.push('Z'),
        }
    }
    d
}

fn color_attrs(name: &str, c: Color) -> String {
    if c.a == 255 {
        format!(r#" {name}="{}""#, c.to_hex())
    } else {
        format!(r#" {name}="{}" {name}-opacity="{:.3}""#, c.to_hex(), c.alpha_f())
    }
}

struct Writer {
    defs: String,
    body: String,
    next_id: usize,
}

impl Writer {
    fn paint(&mut self, name: &str, paint: &Paint) -> String {
        match paint {
            Paint::Solid(c) => color_attrs(name, *c),
            Paint::LinearGradient { from, to, stops } => {
                self.next_id += 1;
                let id = format!("g{}", self.next_id);
                let _ = write!(
                    self.defs,
                    r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                    num(from.x),
                    num(from.y),
                    num(to.x),
                    num(to.y)
                );
                for (offset, c) in stops {
                    let _ = write!(
                        self.defs,
                        r#"<stop offset="{}" stop-color="{}" stop-opacity="{:.3}"/>"#,
                        num(*offset),
                        c.to_hex(),
                        c.alpha_f()
                    );
                }
                self.defs.push_str("</linearGradient>");
                format!(r#" {name}="url(#{id})""#)
            }
        }
    }

    fn stroke(&mut self, stroke: &Stroke) -> String {
        let mut s = self.paint("stroke", &stroke.paint);
        let _ = write!(s, r#" stroke-width="{}""#, num(stroke.width));
        if let Some((on, off)) = stroke.dash {
            let _ = write!(s, r#" stroke-dasharray="{} {}""#, num(on), num(off));
            if stroke.dash_offset != 0.0 {
                let _ = write!(s, r#" stroke-dashoffset="{}""#, num(stroke.dash_offset));
            }
        }
        if stroke.round_cap {
            s.push_str(r#" stroke-linecap="round""#);
        }
        s
    }

    fn item(&mut self, item: &Item) {
        let mut style = match &item.fill {
            Some(p) => self.paint("fill", p),
            None => r#" fill="none""#.to_string(),
        };
        if let Some(s) = &item.stroke {
            let attrs = self.stroke(s);
            style.push_str(&attrs);
        }
        if item.opacity < 1.0 {
            let _ = write!(style, r#" opacity="{:.3}""#, item.opacity.max(0.0));
        }
        if let Some(tag) = &item.tag {
            let _ = write!(style, r#" data-tag="{}""#, escape(tag));
        }
        let b = &mut self.body;
        let _ = match &item.shape {
            Shape::Rect { rect, radius } => {
                let rx = if *radius > 0.0 { format!(r#" rx="{}""#, num(*radius)) } else { String::new() };
                writeln!(
                    b,
                    r#"<rect x="{}" y="{}" width="{}" height="{}"{rx}{style}/>"#,
                    num(rect.x),
                    num(rect.y),
                    num(rect.width.max(0.0)),
                    num(rect.height.max(0.0))
                )
            }
            Shape::Path(cmds) => writeln!(b, r#"<path d="{}"{style}/>"#, path_data(cmds)),
            Shape::Line { from, to } => writeln!(
                b,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{style}/>"#,
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y)
            ),
            Shape::Circle { center, radius } => {
                writeln!(b, r#"<circle cx="{}" cy="{}" r="{}"{style}/>"#, num(center.x), num(center.y), num(*radius))
            }
            Shape::Text { at, content, size, anchor, bold } => {
                let anchor = match anchor {
                    Anchor::Start => "start",
                    Anchor::Middle => "middle",
                    Anchor::End => "end",
                };
                let weight = if *bold { r#" font-weight="600""# } else { "" };
                writeln!(
                    b,
                    r#"<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}"{weight}{style}>{}</text>"#,
                    num(at.x),
                    num(at.y),
                    num(*size),
                    escape(content)
                )
            }
        };
    }
}

/// Serialize one static frame. Animations are ignored; sample the scene first
/// to pick a point in time.
pub fn render(scene: &Scene) -> String {
    let mut w = Writer { defs: String::new(), body: String::new(), next_id: 0 };
    if let Some(bg) = scene.background {
        let attrs = color_attrs("fill", bg);
        let _ = writeln!(w.body, r#"<rect width="100%" height="100%"{attrs}/>"#);
    }
    for item in &scene.items {
        w.item(item);
    }
    let (width, height) = (num(scene.size.width), num(scene.size.height));
    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="Inter, system-ui, sans-serif">"#
    );
    out.push('\n');
    if !w.defs.is_empty() {
        let _ = writeln!(out, "<defs>{}</defs>", w.defs);
    }
    out.push_str(&w.body);
    out.push_str("</svg>\n");
    out
}

impl Scene {
    /// SVG of the fully settled frame.
    pub fn to_svg(&self) -> String {
        render(&self.settled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Animation;
    use crate::types::{Point, Rect, Size};

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(1.256), "1.26");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn path_data_uses_svg_commands() {
        let d = path_data(&[
            PathCmd::MoveTo(Point::new(0.0, 0.0)),
            PathCmd::ArcTo { radius: 5.0, large_arc: true, sweep: false, to: Point::new(10.0, 0.5) },
            PathCmd::Close,
        ]);
        assert_eq!(d, "M0,0 A5,5 0 1 0 10,0.5 Z");
    }

    #[test]
    fn document_has_gradient_defs_and_escaped_text() {
        let mut scene = Scene::new(Size::new(100.0, 50.0)).with_background(Color::rgb(0, 0, 0));
        let grad = Paint::LinearGradient {
            from: Point::new(0.0, 0.0),
            to: Point::new(0.0, 50.0),
            stops: vec![(0.0, Color::WHITE), (1.0, Color::WHITE.with_alpha(0))],
        };
        scene.push(Item::new(Shape::Rect { rect: Rect::from_xywh(0.0, 0.0, 10.0, 10.0), radius: 0.0 }).fill(grad));
        scene.push(
            Item::new(Shape::Text { at: Point::new(1.0, 2.0), content: "a<b & c".into(), size: 10.0, anchor: Anchor::Middle, bold: true })
                .fill(Color::WHITE)
                .animate(Animation::FadeIn { delay_ms: 0.0, duration_ms: 300.0 }),
        );
        let svg = scene.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"<linearGradient id="g1""#));
        assert!(svg.contains(r#"fill="url(#g1)""#));
        assert!(svg.contains("a&lt;b &amp; c"));
        // settled: the fade has finished, no opacity attribute
        assert!(!svg.contains("opacity=\"0.000\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
