// File: crates/bento-core/src/page/ecommerce.rs
// Summary: E-commerce page: order KPIs, orders by hub, daily trend, category revenue and orders vs revenue.

use crate::data::{CategoryValue, KpiColor, KpiStat, MultiSeriesRow, Point2D};
use crate::fixtures::Order;
use crate::widget::{BarChart, DonutChart, KpiCard, LineChart, MultiLineChart};

use super::{humanize, mean, sum_by, tally, Cell, Grid, Page, PageId};

pub fn kpis(orders: &[Order]) -> Vec<KpiStat> {
    let delivered = orders.iter().filter(|o| o.status == "delivered").count();
    let aov = mean(orders.iter().map(|o| o.amount)).round();
    let on_time = orders.iter().filter(|o| !o.sla_breach).count();
    let sla = if orders.is_empty() { 0.0 } else { (on_time as f64 / orders.len() as f64 * 100.0).round() };
    vec![
        KpiStat::new("Total Orders", orders.len() as f64).icon("📦"),
        KpiStat::new("Delivered", delivered as f64).icon("✅").color(KpiColor::Success),
        KpiStat::new("Avg Order Value", format!("${aov}")).icon("💵").color(KpiColor::Warning),
        KpiStat::new("SLA Compliance", format!("{sla}%")).icon("⏱️"),
    ]
}

/// One row per date (ascending) with the order count and summed amount.
pub fn daily_rows(orders: &[Order]) -> Vec<MultiSeriesRow> {
    let counts = tally(orders.iter().map(|o| o.date.as_str()));
    let amounts = sum_by(orders, |o| o.date.as_str(), |o| o.amount);
    let mut rows: Vec<MultiSeriesRow> = counts
        .into_iter()
        .zip(amounts)
        .map(|((date, n), (_, amount))| MultiSeriesRow::new(date).with("orders", n).with("revenue", (amount * 100.0).round() / 100.0))
        .collect();
    rows.sort_by(|a, b| a.date.to_string().cmp(&b.date.to_string()));
    rows
}

pub fn by_hub(orders: &[Order]) -> Vec<CategoryValue> {
    tally(orders.iter().map(|o| o.hub.as_str())).into_iter().map(|(hub, n)| CategoryValue::new(hub, n)).collect()
}

pub fn revenue_by_category(orders: &[Order]) -> Vec<CategoryValue> {
    sum_by(orders, |o| o.category.as_str(), |o| o.amount)
        .into_iter()
        .map(|(c, v)| CategoryValue::new(humanize(&c), v.round()))
        .collect()
}

pub fn page(orders: &[Order]) -> Page {
    let rows = daily_rows(orders);
    let trend = rows.iter().enumerate().map(|(i, r)| Point2D::new(i as f64, r.value("orders"))).collect();
    let grid = Grid::new()
        .row(kpis(orders).into_iter().map(|s| Cell::new(1, KpiCard::new(s))).collect())
        .row(vec![
            Cell::new(2, BarChart::new(by_hub(orders)).title("Orders by Hub")),
            Cell::new(2, LineChart::new(trend).title("Daily Order Trend")),
        ])
        .row(vec![
            Cell::new(2, DonutChart::new(revenue_by_category(orders)).title("Revenue by Category")),
            Cell::new(2, MultiLineChart::new(rows, ["orders", "revenue"]).title("Orders & Revenue")),
        ]);
    Page::new(PageId::Ecommerce, "E-commerce", "Orders, fulfilment and revenue by category", grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(date: &str, hub: &str, category: &str, amount: f64, breach: bool) -> Order {
        Order {
            id: format!("{date}{hub}{amount}"),
            date: date.into(),
            hub: hub.into(),
            category: category.into(),
            amount,
            status: "delivered".into(),
            sla_breach: breach,
            ..Default::default()
        }
    }

    fn sample() -> Vec<Order> {
        vec![
            order("2025-01-02", "Hub-1", "home", 10.0, false),
            order("2025-01-01", "Hub-2", "home", 30.0, true),
            order("2025-01-02", "Hub-1", "toys", 20.0, false),
            order("2025-01-02", "Hub-1", "toys", 40.0, false),
        ]
    }

    #[test]
    fn daily_rows_group_and_sort() {
        let rows = daily_rows(&sample());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date.to_string(), "2025-01-01");
        assert_eq!(rows[1].value("orders"), 3.0);
        assert_eq!(rows[1].value("revenue"), 70.0);
    }

    #[test]
    fn kpis_and_breakdowns() {
        let orders = sample();
        let k = kpis(&orders);
        assert_eq!(k[2].value.to_string(), "$25");
        assert_eq!(k[3].value.to_string(), "75%");
        assert_eq!(by_hub(&orders), vec![CategoryValue::new("Hub-1", 3.0), CategoryValue::new("Hub-2", 1.0)]);
        assert_eq!(revenue_by_category(&orders), vec![CategoryValue::new("Home", 40.0), CategoryValue::new("Toys", 60.0)]);
    }
}
