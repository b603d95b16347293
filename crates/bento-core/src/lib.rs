// File: crates/bento-core/src/lib.rs
// Summary: Core library entry point; exports scales, binning, widgets, scenes and dashboard pages.

pub mod types;
pub mod color;
pub mod theme;
pub mod context;
pub mod error;
pub mod data;
pub mod scale;
pub mod format;
pub mod size;
pub mod bin;
pub mod scene;
pub mod shape;
pub mod axis;
pub mod svg;
pub mod widget;
pub mod fixtures;
pub mod page;

pub use types::{Margin, Point, Rect, Size};
pub use color::{Color, ColorRamp};
pub use theme::Theme;
pub use context::{DashboardContext, ThemeMode};
pub use error::{DashError, DashResult};
pub use scale::{BandScale, ColorScale, LinearScale, OrdinalScale};
pub use size::SizeOracle;
pub use bin::{bin, Bin, BinStrategy};
pub use scene::{Item, Paint, PathCmd, Scene, Shape, Stroke};
pub use axis::Axis;
pub use widget::{
    BarChart, DonutChart, FunnelChart, Heatmap, Histogram, Hover, KpiCard, LineChart, Mount, MultiLineChart, RadialGauge, Tooltip, Widget,
};
pub use fixtures::Fixtures;
pub use page::{Page, PageId};
