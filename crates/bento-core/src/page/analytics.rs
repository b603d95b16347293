// File: crates/bento-core/src/page/analytics.rs
// Summary: Analytics page: revenue/cost KPIs, daily revenue, channel split and hourly traffic heatmap.

use crate::data::{HeatCell, KpiColor, KpiStat, MultiSeriesRow, Point2D};
use crate::fixtures::{Channels, RevenueDay, TrafficHeatmap};
use crate::widget::{Heatmap, KpiCard, LineChart, MultiLineChart};

use super::{Cell, Grid, Page, PageId};

pub fn kpis(days: &[RevenueDay]) -> Vec<KpiStat> {
    let revenue: f64 = days.iter().map(|d| d.revenue).sum();
    let cost: f64 = days.iter().map(|d| d.cost).sum();
    let margin = if revenue > 0.0 { ((revenue - cost) / revenue * 100.0).round() } else { 0.0 };
    vec![
        KpiStat::new("Revenue", format!("${:.0}K", revenue / 1000.0)).icon("💰").color(KpiColor::Success),
        KpiStat::new("Cost", format!("${:.0}K", cost / 1000.0)).icon("💸").color(KpiColor::Danger),
        KpiStat::new("Margin", format!("{margin}%")).icon("📈").color(KpiColor::Success),
        KpiStat::new("Days", days.len() as f64).icon("📅"),
    ]
}

pub fn channel_rows(days: &[RevenueDay]) -> Vec<MultiSeriesRow> {
    days.iter()
        .map(|d| Channels::KEYS.iter().fold(MultiSeriesRow::new(d.date.as_str()), |row, k| row.with(*k, d.channels.get(k))))
        .collect()
}

/// Hour rows (`H0`..`H23`) by date columns.
pub fn traffic_cells(traffic: &TrafficHeatmap) -> Vec<HeatCell> {
    traffic
        .iter()
        .flat_map(|(date, hours)| hours.iter().enumerate().map(move |(h, v)| HeatCell::new(format!("H{h}"), date.as_str(), *v)))
        .collect()
}

pub fn page(days: &[RevenueDay], traffic: &TrafficHeatmap) -> Page {
    let revenue = days.iter().map(|d| Point2D::new(d.date.as_str(), d.revenue)).collect();
    let rows = channel_rows(days);
    let grid = Grid::new()
        .row(kpis(days).into_iter().map(|s| Cell::new(1, KpiCard::new(s))).collect())
        .row(vec![
            Cell::new(2, LineChart::new(revenue).title("Daily Revenue")),
            Cell::new(2, MultiLineChart::new(rows.clone(), Channels::KEYS).title("Revenue Channels")),
        ])
        .row(vec![Cell::new(4, Heatmap::new(traffic_cells(traffic)).title("Traffic by Hour").height(520.0))])
        .row(vec![Cell::new(4, MultiLineChart::new(rows, Channels::KEYS).title("Channel Growth (Detailed View)").height(400.0))]);
    Page::new(PageId::Analytics, "Analytics", "Revenue, cost and channel performance", grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, revenue: f64, cost: f64) -> RevenueDay {
        RevenueDay {
            date: date.into(),
            revenue,
            cost,
            profit: revenue - cost,
            channels: Channels { online: revenue * 0.5, retail: revenue * 0.3, partners: revenue * 0.2 },
        }
    }

    #[test]
    fn margin_and_totals() {
        let k = kpis(&[day("2025-01-01", 100_000.0, 60_000.0), day("2025-01-02", 100_000.0, 40_000.0)]);
        assert_eq!(k[0].value.to_string(), "$200K");
        assert_eq!(k[1].value.to_string(), "$100K");
        assert_eq!(k[2].value.to_string(), "50%");
        assert_eq!(kpis(&[])[2].value.to_string(), "0%");
    }

    #[test]
    fn channels_become_series() {
        let rows = channel_rows(&[day("2025-01-01", 1000.0, 0.0)]);
        assert_eq!(rows[0].value("online"), 500.0);
        assert_eq!(rows[0].value("partners"), 200.0);
    }

    #[test]
    fn traffic_is_hour_by_date() {
        let mut t = TrafficHeatmap::new();
        t.insert("2025-01-01".into(), vec![1.0, 2.0]);
        let cells = traffic_cells(&t);
        assert_eq!(cells, vec![HeatCell::new("H0", "2025-01-01", 1.0), HeatCell::new("H1", "2025-01-01", 2.0)]);
    }
}
