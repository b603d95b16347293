// File: crates/bento-core/src/page/gallery.rs
// Summary: Components gallery: every widget drawn with small inline data sets.

use crate::color::ColorRamp;
use crate::data::{CategoryValue, FunnelStage, HeatCell, KpiColor, KpiStat, MultiSeriesRow, Point2D};
use crate::widget::{BarChart, DonutChart, FunnelChart, Heatmap, Histogram, KpiCard, LineChart, MultiLineChart, RadialGauge};

use super::{Cell, Grid, Page, PageId};

const MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

fn line_sample() -> Vec<Point2D> {
    [12.0, 19.0, 15.0, 25.0, 22.0, 30.0].iter().enumerate().map(|(i, y)| Point2D::new(MONTHS[i], *y)).collect()
}

fn multi_sample() -> Vec<MultiSeriesRow> {
    let rows = [(40.0, 24.0, 10.0), (30.0, 13.0, 22.0), (20.0, 38.0, 29.0), (27.0, 39.0, 20.0), (18.0, 48.0, 21.0), (23.0, 38.0, 25.0)];
    MONTHS
        .iter()
        .zip(rows)
        .map(|(m, (a, b, c))| MultiSeriesRow::new(*m).with("desktop", a).with("mobile", b).with("tablet", c))
        .collect()
}

/// Deterministic bell-ish sample without a random source.
fn histogram_sample() -> Vec<f64> {
    (0..200).map(|i| {
        let t = i as f64 / 200.0;
        50.0 + 30.0 * (t * std::f64::consts::TAU).sin() * (t * 7.0).cos()
    }).collect()
}

fn heat_sample() -> Vec<HeatCell> {
    let days = ["Mon", "Tue", "Wed", "Thu", "Fri"];
    days.iter()
        .enumerate()
        .flat_map(|(d, day)| (0..8).map(move |h| HeatCell::new(*day, format!("{:02}:00", 9 + h), ((d * 7 + h * 3) % 11) as f64)))
        .collect()
}

pub fn page() -> Page {
    let kpis = vec![
        KpiStat::new("Revenue", "$48.2K").unit("USD").change(12.5).icon("💰").color(KpiColor::Success),
        KpiStat::new("Sessions", 18_420.0).change(-3.1).icon("👥"),
        KpiStat::new("Bounce Rate", "41%").change(-1.2).icon("↩").color(KpiColor::Warning),
        KpiStat::new("Errors", 7.0).icon("⚠").color(KpiColor::Danger),
    ];
    let bars = MONTHS.iter().zip([65.0, 59.0, 80.0, 81.0, 56.0, 55.0]).map(|(m, v)| CategoryValue::new(*m, v)).collect();
    let slices = vec![
        CategoryValue::new("Direct", 420.0),
        CategoryValue::new("Search", 310.0),
        CategoryValue::new("Social", 180.0),
        CategoryValue::new("Email", 90.0),
    ];
    let funnel = vec![
        FunnelStage::new("Visitors", 1200.0),
        FunnelStage::new("Sign-ups", 540.0),
        FunnelStage::new("Trials", 210.0),
        FunnelStage::new("Paid", 84.0),
    ];
    let grid = Grid::new()
        .row(kpis.into_iter().map(|s| Cell::new(1, KpiCard::new(s))).collect())
        .row(vec![
            Cell::new(2, LineChart::new(line_sample()).title("Line Chart")),
            Cell::new(2, BarChart::new(bars).title("Bar Chart")),
        ])
        .row(vec![
            Cell::new(2, MultiLineChart::new(multi_sample(), ["desktop", "mobile", "tablet"]).title("Multi-line Chart")),
            Cell::new(2, Histogram::from_values(&histogram_sample()).title("Histogram")),
        ])
        .row(vec![
            Cell::new(2, Heatmap::new(heat_sample()).title("Heatmap").ramp(ColorRamp::Viridis)),
            Cell::new(2, DonutChart::new(slices).title("Donut Chart")),
        ])
        .row(vec![
            Cell::new(1, RadialGauge::new(68.0).title("Radial Gauge").caption("Goal completion")),
            Cell::new(3, FunnelChart::new(funnel).title("Funnel")),
        ]);
    Page::new(PageId::Gallery, "Components", "Every chart widget with sample data", grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_has_one_of_each_kind() {
        let p = page();
        let mut kinds: Vec<&str> = p.grid.rows.iter().flatten().map(|c| crate::widget::Widget::kind(&c.panel)).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds, vec!["bar", "donut", "funnel", "gauge", "heatmap", "histogram", "kpi", "line", "multiline"]);
    }

    #[test]
    fn heat_sample_has_full_matrix() {
        assert_eq!(heat_sample().len(), 40);
        assert_eq!(histogram_sample().len(), 200);
    }
}
