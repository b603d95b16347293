// File: crates/bento-core/src/page/mod.rs
// Summary: Dashboard pages: bento grid layout of widget cards composed onto one page scene.
// Notes:
// - Each cell hosts one widget in its own Mount, sized from the cell width.
// - The sidebar state in DashboardContext decides how much width the grid gets.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::context::DashboardContext;
use crate::error::DashError;
use crate::fixtures::Fixtures;
use crate::scene::{Anchor, Item, Scene, Shape, Stroke};
use crate::theme::Theme;
use crate::types::{Point, Rect, Size};
use crate::widget::{
    BarChart, DonutChart, FunnelChart, Heatmap, Histogram, Hover, KpiCard, LineChart, Mount, MultiLineChart, RadialGauge, Widget,
};

pub mod analytics;
pub mod crm;
pub mod ecommerce;
pub mod fleet;
pub mod gallery;
pub mod overview;
pub mod social;

pub const COLUMNS: u32 = 4;
pub const GAP: f32 = 16.0;
const PAD: f32 = 24.0;
const HEADER: f32 = 84.0;
const CARD_PAD: f32 = 16.0;
const CARD_TITLE: f32 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageId {
    Overview,
    Fleet,
    Ecommerce,
    Analytics,
    Social,
    Crm,
    Gallery,
}

impl PageId {
    pub const ALL: [PageId; 7] =
        [PageId::Overview, PageId::Fleet, PageId::Ecommerce, PageId::Analytics, PageId::Social, PageId::Crm, PageId::Gallery];

    pub fn slug(self) -> &'static str {
        match self {
            PageId::Overview => "overview",
            PageId::Fleet => "fleet",
            PageId::Ecommerce => "ecommerce",
            PageId::Analytics => "analytics",
            PageId::Social => "social",
            PageId::Crm => "crm",
            PageId::Gallery => "components",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PageId::Overview => "Overview",
            PageId::Fleet => "Fleet",
            PageId::Ecommerce => "E-commerce",
            PageId::Analytics => "Analytics",
            PageId::Social => "Social",
            PageId::Crm => "CRM",
            PageId::Gallery => "Components",
        }
    }

    /// Aggregate fixtures into this page's widgets.
    pub fn build(self, fixtures: &Fixtures) -> Page {
        match self {
            PageId::Overview => overview::page(fixtures),
            PageId::Fleet => fleet::page(&fixtures.vehicles),
            PageId::Ecommerce => ecommerce::page(&fixtures.orders),
            PageId::Analytics => analytics::page(&fixtures.revenue, &fixtures.traffic),
            PageId::Social => social::page(&fixtures.social),
            PageId::Crm => crm::page(&fixtures.leads, &fixtures.pipeline_monthly),
            PageId::Gallery => gallery::page(),
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.slug()) }
}

impl FromStr for PageId {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        PageId::ALL
            .into_iter()
            .find(|p| p.slug() == s || (s == "gallery" && *p == PageId::Gallery))
            .ok_or_else(|| DashError::Config(format!("unknown page '{s}'")))
    }
}

/// Any widget a page can host.
#[derive(Clone, Debug, PartialEq)]
pub enum Panel {
    Kpi(KpiCard),
    Line(LineChart),
    MultiLine(MultiLineChart),
    Bar(BarChart),
    Histogram(Histogram),
    Heatmap(Heatmap),
    Donut(DonutChart),
    Gauge(RadialGauge),
    Funnel(FunnelChart),
}

macro_rules! panel_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(impl From<$ty> for Panel {
            fn from(w: $ty) -> Self { Panel::$variant(w) }
        })*
    };
}

panel_from! {
    Kpi => KpiCard,
    Line => LineChart,
    MultiLine => MultiLineChart,
    Bar => BarChart,
    Histogram => Histogram,
    Heatmap => Heatmap,
    Donut => DonutChart,
    Gauge => RadialGauge,
    Funnel => FunnelChart,
}

impl Panel {
    fn inner(&self) -> &dyn Widget {
        match self {
            Panel::Kpi(w) => w,
            Panel::Line(w) => w,
            Panel::MultiLine(w) => w,
            Panel::Bar(w) => w,
            Panel::Histogram(w) => w,
            Panel::Heatmap(w) => w,
            Panel::Donut(w) => w,
            Panel::Gauge(w) => w,
            Panel::Funnel(w) => w,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Widget {
        match self {
            Panel::Kpi(w) => w,
            Panel::Line(w) => w,
            Panel::MultiLine(w) => w,
            Panel::Bar(w) => w,
            Panel::Histogram(w) => w,
            Panel::Heatmap(w) => w,
            Panel::Donut(w) => w,
            Panel::Gauge(w) => w,
            Panel::Funnel(w) => w,
        }
    }

    /// KPI cards draw their own card chrome.
    fn has_chrome(&self) -> bool { !matches!(self, Panel::Kpi(_)) }
}

impl Widget for Panel {
    fn kind(&self) -> &'static str { self.inner().kind() }
    fn title(&self) -> Option<&str> { self.inner().title() }
    fn default_height(&self) -> f32 { self.inner().default_height() }
    fn aspect(&self) -> Option<f32> { self.inner().aspect() }
    fn layout(&self, measured: Size) -> Size { self.inner().layout(measured) }
    fn draw(&self, size: Size, theme: &Theme, scene: &mut Scene) { self.inner().draw(size, theme, scene) }
    fn hover(&self, size: Size, pointer: Point) -> Option<Hover> { self.inner().hover(size, pointer) }
    fn click(&mut self, size: Size, pointer: Point) -> bool { self.inner_mut().click(size, pointer) }
    fn set_hovered(&mut self, index: Option<usize>) -> bool { self.inner_mut().set_hovered(index) }
}

/// One grid cell: a widget spanning `span` of the grid's columns.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub span: u32,
    pub panel: Panel,
}

impl Cell {
    pub fn new(span: u32, panel: impl Into<Panel>) -> Self {
        Self { span: span.clamp(1, COLUMNS), panel: panel.into() }
    }
}

/// Placed card after layout, in page coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedCard {
    pub frame: Rect,
    pub kind: &'static str,
    pub scene: Scene,
}

/// Rows of cells; every row fills the content width.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Grid {
    pub rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new() -> Self { Self::default() }

    pub fn row(mut self, cells: Vec<Cell>) -> Self {
        if !cells.is_empty() {
            self.rows.push(cells);
        }
        self
    }

    pub fn len(&self) -> usize { self.rows.iter().map(Vec::len).sum() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Width of a cell spanning `span` columns in a grid `width` wide.
    pub fn span_width(width: f32, span: u32) -> f32 {
        let col = (width - GAP * (COLUMNS - 1) as f32) / COLUMNS as f32;
        col * span as f32 + GAP * (span.saturating_sub(1)) as f32
    }

    /// Mount every cell at its column width, stacking rows from `origin`.
    pub fn layout(&self, origin: Point, width: f32, theme: &Theme) -> Vec<PlacedCard> {
        let mut placed = Vec::with_capacity(self.len());
        let mut y = origin.y;
        for row in &self.rows {
            let mut x = origin.x;
            let mut row_height: f32 = 0.0;
            let start = placed.len();
            for cell in row {
                let card_w = Self::span_width(width, cell.span);
                let chrome = cell.panel.has_chrome();
                let inner_w = if chrome { card_w - 2.0 * CARD_PAD } else { card_w };
                let mut mount = Mount::new(cell.panel.clone(), *theme);
                mount.attach(Some(inner_w));
                let size = mount.size();
                let title_h = if chrome && cell.panel.title().is_some() { CARD_TITLE } else { 0.0 };
                let card_h = if chrome { size.height + title_h + 2.0 * CARD_PAD } else { size.height };
                row_height = row_height.max(card_h);
                placed.push(PlacedCard {
                    frame: Rect::from_xywh(x, y, card_w, card_h),
                    kind: cell.panel.kind(),
                    scene: mount.scene().clone(),
                });
                x += card_w + GAP;
            }
            // cards in one row share the tallest height
            for card in &mut placed[start..] {
                card.frame.height = row_height;
            }
            y += row_height + GAP;
        }
        placed
    }
}

/// A titled page of cards.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub subtitle: String,
    pub grid: Grid,
}

impl Page {
    pub fn new(id: PageId, title: impl Into<String>, subtitle: impl Into<String>, grid: Grid) -> Self {
        Self { id, title: title.into(), subtitle: subtitle.into(), grid }
    }

    /// Compose the sidebar, header and every card into one scene `viewport_width` wide.
    pub fn render(&self, ctx: &DashboardContext, viewport_width: f32) -> Scene {
        let theme = ctx.theme();
        let sidebar = ctx.sidebar_width();
        let content = ctx.content_width(viewport_width);
        let grid_w = (content - 2.0 * PAD).max(0.0);
        let cards = self.grid.layout(Point::new(sidebar + PAD, PAD + HEADER), grid_w, &theme);
        let bottom = cards.iter().map(|c| c.frame.bottom()).fold(PAD + HEADER, f32::max) + PAD;

        let mut scene = Scene::new(Size::new(sidebar + content, bottom)).with_background(theme.bg_primary);
        self.draw_sidebar(ctx, &theme, bottom, &mut scene);

        let title = Shape::Text { at: Point::new(sidebar + PAD, PAD + 32.0), content: self.title.clone(), size: 30.0, anchor: Anchor::Start, bold: true };
        scene.push(Item::new(title).fill(theme.text_primary).tag("page:title"));
        let subtitle = Shape::Text { at: Point::new(sidebar + PAD, PAD + 60.0), content: self.subtitle.clone(), size: 15.0, anchor: Anchor::Start, bold: false };
        scene.push(Item::new(subtitle).fill(theme.text_secondary).tag("page:subtitle"));

        for (card, cell) in cards.iter().zip(self.grid.rows.iter().flatten()) {
            let f = card.frame;
            if cell.panel.has_chrome() {
                scene.push(
                    Item::new(Shape::Rect { rect: f, radius: 16.0 })
                        .fill(theme.bg_secondary)
                        .stroke(Stroke::new(theme.border, 1.0))
                        .tag(format!("card:{}", card.kind)),
                );
                let mut top = f.y + CARD_PAD;
                if let Some(t) = cell.panel.title() {
                    let text = Shape::Text { at: Point::new(f.x + CARD_PAD, top + 16.0), content: t.to_string(), size: 16.0, anchor: Anchor::Start, bold: true };
                    scene.push(Item::new(text).fill(theme.text_primary).tag("card:title"));
                    top += CARD_TITLE;
                }
                // fixed-size widgets (the gauge) are centred in their card
                let dx = ((f.width - 2.0 * CARD_PAD - card.scene.size.width) / 2.0).max(0.0);
                scene.embed(&card.scene, f.x + CARD_PAD + dx, top);
            } else {
                scene.embed(&card.scene, f.x, f.y);
            }
        }
        debug!(page = %self.id, cards = cards.len(), width = scene.size.width, height = scene.size.height, "page composed");
        scene
    }

    fn draw_sidebar(&self, ctx: &DashboardContext, theme: &Theme, height: f32, scene: &mut Scene) {
        let w = ctx.sidebar_width();
        scene.push(
            Item::new(Shape::Rect { rect: Rect::from_xywh(0.0, 0.0, w, height), radius: 0.0 })
                .fill(theme.bg_secondary)
                .stroke(Stroke::new(theme.border, 1.0))
                .tag("sidebar"),
        );
        let collapsed = ctx.sidebar_collapsed();
        let brand = if collapsed { "B" } else { "Bento Dash" };
        let (bx, anchor) = if collapsed { (w / 2.0, Anchor::Middle) } else { (20.0, Anchor::Start) };
        scene.push(Item::new(Shape::Text { at: Point::new(bx, 44.0), content: brand.into(), size: 20.0, anchor, bold: true }).fill(theme.accent).tag("sidebar:brand"));
        for (i, id) in PageId::ALL.into_iter().enumerate() {
            let y = 80.0 + i as f32 * 44.0;
            let active = id == self.id;
            if active {
                let pill = Rect::from_xywh(8.0, y, w - 16.0, 36.0);
                scene.push(Item::new(Shape::Rect { rect: pill, radius: 10.0 }).fill(theme.accent.with_alpha(40)).tag("sidebar:active"));
            }
            let label = if collapsed { id.label().chars().take(2).collect() } else { id.label().to_string() };
            let color = if active { theme.accent } else { theme.text_secondary };
            scene.push(Item::new(Shape::Text { at: Point::new(bx, y + 23.0), content: label, size: 14.0, anchor, bold: active }).fill(color).tag(format!("nav:{}", id.slug())));
        }
    }
}

/// Count occurrences, keeping first-seen order.
pub(crate) fn tally<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<(String, f64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<(String, f64)> = Vec::new();
    for k in keys {
        match index.get(k) {
            Some(&i) => out[i].1 += 1.0,
            None => {
                index.insert(k, out.len());
                out.push((k.to_string(), 1.0));
            }
        }
    }
    out
}

/// Sum `value` per key, keeping first-seen order.
pub(crate) fn sum_by<'a, T: 'a>(items: impl IntoIterator<Item = &'a T>, key: impl Fn(&T) -> &str, value: impl Fn(&T) -> f64) -> Vec<(String, f64)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<(String, f64)> = Vec::new();
    for it in items {
        let k = key(it);
        let v = value(it);
        match index.get(k) {
            Some(&i) => out[i].1 += v,
            None => {
                index.insert(k.to_string(), out.len());
                out.push((k.to_string(), v));
            }
        }
    }
    out
}

/// Mean of `values`, 0 for none.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, n) = values.into_iter().fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Percent change of the last `window` values against the `window` before
/// them; `None` without two full windows or a zero base.
pub(crate) fn period_change(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < 2 * window {
        return None;
    }
    let n = values.len();
    let current: f64 = values[n - window..].iter().sum();
    let previous: f64 = values[n - 2 * window..n - window].iter().sum();
    (previous != 0.0).then(|| ((current - previous) / previous * 1000.0).round() / 10.0)
}

/// `"in_transit"` -> `"In transit"`.
pub(crate) fn humanize(key: &str) -> String {
    let spaced = key.replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
