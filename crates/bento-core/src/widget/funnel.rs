// File: crates/bento-core/src/widget/funnel.rs
// Summary: Pipeline funnel: one proportional bar per stage plus a total footer.

use crate::data::{plain_number, FunnelStage};
use crate::scene::{Anchor, Item, Paint, Scene, Shape};
use crate::theme::Theme;
use crate::types::{Point, Rect, Size};

use super::{Hover, Tooltip, Widget};

const HEADER: f32 = 40.0;
const ROW: f32 = 32.0;
const GAP: f32 = 12.0;
const FOOTER: f32 = 36.0;
const LABEL_COL: f32 = 128.0;
const COUNT_COL: f32 = 80.0;

#[derive(Clone, Debug, PartialEq)]
pub struct FunnelChart {
    pub data: Vec<FunnelStage>,
    pub title: String,
    pub width: Option<f32>,
}

impl FunnelChart {
    pub fn new(data: Vec<FunnelStage>) -> Self {
        Self { data, title: "Pipeline".into(), width: None }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self { self.title = title.into(); self }
    pub fn width(mut self, width: f32) -> Self { self.width = Some(width); self }

    pub fn total(&self) -> f64 {
        self.data.iter().map(|d| d.count).filter(|v| v.is_finite()).sum()
    }

    /// `round(count / max * 100)` per stage; 0 for every stage when max is 0.
    pub fn percents(&self) -> Vec<u32> {
        let max = super::finite_max(self.data.iter().map(|d| d.count));
        self.data
            .iter()
            .map(|d| if max > 0.0 && d.count.is_finite() { (d.count / max * 100.0).round().clamp(0.0, 100.0) as u32 } else { 0 })
            .collect()
    }

    fn track(&self, size: Size, i: usize) -> Rect {
        let y = HEADER + i as f32 * (ROW + GAP);
        let x = LABEL_COL + 16.0;
        Rect::from_xywh(x, y, (size.width - x - COUNT_COL - 16.0).max(0.0), ROW)
    }
}

impl Widget for FunnelChart {
    fn kind(&self) -> &'static str { "funnel" }

    fn default_height(&self) -> f32 {
        let rows = self.data.len() as f32;
        HEADER + rows * ROW + (rows - 1.0).max(0.0) * GAP + FOOTER
    }

    fn layout(&self, measured: Size) -> Size {
        Size::new(self.width.unwrap_or(measured.width), self.default_height())
    }

    fn draw(&self, size: Size, theme: &Theme, scene: &mut Scene) {
        if self.data.is_empty() {
            return;
        }
        let header = Shape::Text { at: Point::new(0.0, 24.0), content: self.title.clone(), size: 18.0, anchor: Anchor::Start, bold: true };
        scene.push(Item::new(header).fill(theme.text_primary).tag("funnel:title"));

        for ((i, stage), pct) in self.data.iter().enumerate().zip(self.percents()) {
            let track = self.track(size, i);
            let mid = track.y + ROW / 2.0 + 5.0;
            let label = Shape::Text { at: Point::new(0.0, mid), content: stage.stage.clone(), size: 13.0, anchor: Anchor::Start, bold: false };
            scene.push(Item::new(label).fill(theme.text_muted));
            scene.push(Item::new(Shape::Rect { rect: track, radius: 6.0 }).fill(theme.bg_panel).tag("funnel:track"));
            let bar = Rect::from_xywh(track.x, track.y, track.width * pct as f32 / 100.0, ROW);
            let gradient = Paint::LinearGradient {
                from: Point::new(track.x, 0.0),
                to: Point::new(track.right(), 0.0),
                stops: vec![(0.0, theme.chart[2]), (1.0, theme.chart[3])],
            };
            scene.push(Item::new(Shape::Rect { rect: bar, radius: 6.0 }).fill(gradient).tag(format!("funnel:bar:{}", stage.stage)));
            let count = Shape::Text { at: Point::new(size.width, mid), content: plain_number(stage.count), size: 13.0, anchor: Anchor::End, bold: true };
            scene.push(Item::new(count).fill(theme.text_primary));
        }

        let rows = self.data.len() as f32;
        let footer_y = HEADER + rows * (ROW + GAP) + 14.0;
        let footer = Shape::Text {
            at: Point::new(0.0, footer_y),
            content: format!("Total: {}", plain_number(self.total())),
            size: 13.0,
            anchor: Anchor::Start,
            bold: false,
        };
        scene.push(Item::new(footer).fill(theme.text_muted).tag("funnel:total"));
    }

    fn hover(&self, size: Size, pointer: Point) -> Option<Hover> {
        let index = (0..self.data.len()).find(|&i| {
            let t = self.track(size, i);
            pointer.y >= t.y && pointer.y <= t.bottom() && pointer.x >= 0.0 && pointer.x <= size.width
        })?;
        let stage = &self.data[index];
        let pct = self.percents()[index];
        let t = self.track(size, index);
        let tooltip = Tooltip::new(Point::new(t.x + t.width * pct as f32 / 100.0, t.y), stage.stage.clone())
            .line(plain_number(stage.count))
            .line(format!("{pct}%"));
        Some(Hover { index, tooltip, marker: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> FunnelChart {
        FunnelChart::new(vec![
            FunnelStage::new("Lead", 200.0),
            FunnelStage::new("Qualified", 130.0),
            FunnelStage::new("Won", 34.0),
        ])
    }

    #[test]
    fn percents_are_rounded_against_max() {
        assert_eq!(pipeline().percents(), vec![100, 65, 17]);
        assert_eq!(pipeline().total(), 364.0);
        let zeros = FunnelChart::new(vec![FunnelStage::new("a", 0.0)]);
        assert_eq!(zeros.percents(), vec![0]);
    }

    #[test]
    fn footer_shows_total_and_bars_scale() {
        let f = pipeline();
        let size = f.layout(Size::new(600.0, 0.0));
        let mut scene = Scene::new(size);
        f.draw(size, &Theme::dark(), &mut scene);
        assert!(scene.tagged("funnel:total").any(|it| matches!(&it.shape, Shape::Text { content, .. } if content == "Total: 364")));
        let full = scene.tagged("funnel:bar:Lead").next().unwrap();
        let track = f.track(size, 0);
        assert!(matches!(full.shape, Shape::Rect { rect, .. } if rect.width == track.width));
    }

    #[test]
    fn hover_by_row() {
        let f = pipeline();
        let size = f.layout(Size::new(600.0, 0.0));
        let h = f.hover(size, Point::new(300.0, HEADER + ROW + GAP + 5.0)).unwrap();
        assert_eq!(h.index, 1);
        assert_eq!(h.tooltip.lines, vec!["130".to_string(), "65%".to_string()]);
        assert!(f.hover(size, Point::new(300.0, 5.0)).is_none());
    }
}
