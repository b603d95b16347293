// File: crates/bento-core/src/page/overview.rs
// Summary: Overview page: headline KPIs, revenue trend, daily orders and the financial multiline.

use crate::data::{CategoryValue, KpiColor, KpiStat, MultiSeriesRow, Point2D};
use crate::fixtures::{Fixtures, Order, RevenueDay};
use crate::format::{format_compact, format_grouped};
use crate::widget::{BarChart, KpiCard, LineChart, MultiLineChart};

use super::{mean, period_change, tally, Cell, Grid, Page, PageId};

/// Days shown in the daily orders bar chart.
const RECENT_DAYS: usize = 14;

pub fn kpis(f: &Fixtures) -> Vec<KpiStat> {
    let revenue: Vec<f64> = f.revenue.iter().map(|d| d.revenue).collect();
    let total_revenue: f64 = revenue.iter().sum();
    let daily_orders: Vec<f64> = daily_order_counts(&f.orders).into_iter().map(|(_, n)| n).collect();
    let converted = f.leads.iter().filter(|l| l.converted).count();
    let conversion = if f.leads.is_empty() { 0.0 } else { converted as f64 / f.leads.len() as f64 * 100.0 };
    let aov = mean(f.orders.iter().map(|o| o.amount));

    let with_change = |stat: KpiStat, change: Option<f64>| match change {
        Some(c) => stat.change(c),
        None => stat,
    };
    vec![
        with_change(
            KpiStat::new("Total Orders", format_grouped(f.orders.len() as f64)).unit("orders").icon("📦"),
            period_change(&daily_orders, 30),
        ),
        with_change(
            KpiStat::new("Revenue", format!("${}", format_compact(total_revenue))).unit("USD").icon("💰").color(KpiColor::Success),
            period_change(&revenue, 30),
        ),
        KpiStat::new("Conversion Rate", format!("{conversion:.2}%")).icon("📈").color(KpiColor::Warning),
        KpiStat::new("Avg. Order Value", format!("${}", aov.round())).unit("USD").icon("🛒"),
    ]
}

/// Order counts per date, in date order.
pub fn daily_order_counts(orders: &[Order]) -> Vec<(String, f64)> {
    let mut counts = tally(orders.iter().map(|o| o.date.as_str()));
    counts.sort_by(|a, b| a.0.cmp(&b.0));
    counts
}

/// Revenue, cost and profit rows keyed by date.
pub fn financial_rows(days: &[RevenueDay]) -> Vec<MultiSeriesRow> {
    days.iter()
        .map(|d| MultiSeriesRow::new(d.date.as_str()).with("revenue", d.revenue).with("cost", d.cost).with("profit", d.revenue - d.cost))
        .collect()
}

pub fn page(f: &Fixtures) -> Page {
    let kpi_cells = kpis(f).into_iter().map(|s| Cell::new(1, KpiCard::new(s))).collect();

    let line = LineChart::new(f.revenue.iter().enumerate().map(|(i, d)| Point2D::new(i as f64, d.revenue)).collect()).title("Revenue Trend");

    let counts = daily_order_counts(&f.orders);
    let recent = &counts[counts.len().saturating_sub(RECENT_DAYS)..];
    let bars = BarChart::new(
        recent.iter().map(|(date, n)| CategoryValue::new(date.get(5..).unwrap_or(date), *n)).collect(),
    )
    .title("Daily Orders");

    let multi = MultiLineChart::new(financial_rows(&f.revenue), ["revenue", "cost", "profit"]).title("Financial Overview").height(350.0);

    let grid = Grid::new()
        .row(kpi_cells)
        .row(vec![Cell::new(2, line), Cell::new(2, bars)])
        .row(vec![Cell::new(4, multi)]);
    Page::new(PageId::Overview, "Welcome back", "Here's what's happening with your business today", grid)
}
