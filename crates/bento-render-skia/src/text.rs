// File: crates/bento-render-skia/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout; places scene text by baseline and anchor.

use bento_core::scene::Anchor;
use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

const FAMILIES: [&str; 7] = ["Inter", "Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"];

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, bold: bool, paint: &skia::Paint) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_font_families(&FAMILIES);
        if bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts.set_foreground_paint(paint);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, bold: bool, paint: &skia::Paint) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, bold, paint));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32, bold: bool) -> f32 {
        self.layout(text, size, bold, &skia::Paint::default()).max_intrinsic_width()
    }

    /// Draw `text` with its alphabetic baseline at `y`; `anchor` picks which
    /// end of the run sits at `x`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, anchor: Anchor, bold: bool, paint: &skia::Paint) {
        let mut p = self.layout(text, size, bold, paint);
        let width = p.max_intrinsic_width();
        let baseline = p.alphabetic_baseline();
        let left = match anchor {
            Anchor::Start => x,
            Anchor::Middle => x - width / 2.0,
            Anchor::End => x - width,
        };
        p.paint(canvas, (left, y - baseline));
    }
}
