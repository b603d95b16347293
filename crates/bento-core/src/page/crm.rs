// File: crates/bento-core/src/page/crm.rs
// Summary: CRM page: lead KPIs, daily new leads, conversion gauge, pipeline by stage and source ranking.

use crate::data::{CategoryValue, FunnelStage, HeatCell, KpiStat, MultiSeriesRow, Point2D};
use crate::fixtures::{Lead, PipelineMonth};
use crate::widget::{BarChart, FunnelChart, Heatmap, KpiCard, LineChart, MultiLineChart, RadialGauge};

use super::{humanize, tally, Cell, Grid, Page, PageId};

/// Pipeline stages in funnel order.
pub const STAGES: [&str; 6] = ["lead", "qualified", "proposal", "negotiation", "won", "lost"];
const TOP_SOURCES: usize = 8;

/// Rounded percentage of converted leads, 0 with no leads.
pub fn conversion_rate(leads: &[Lead]) -> f64 {
    if leads.is_empty() {
        return 0.0;
    }
    let converted = leads.iter().filter(|l| l.converted).count();
    (converted as f64 / leads.len() as f64 * 100.0).round()
}

/// Lead sources by count, highest first.
pub fn top_sources(leads: &[Lead], n: usize) -> Vec<CategoryValue> {
    let mut sources = tally(leads.iter().map(|l| l.source.as_str()));
    sources.sort_by(|a, b| b.1.total_cmp(&a.1));
    sources.into_iter().take(n).map(|(s, v)| CategoryValue::new(s, v)).collect()
}

pub fn kpis(leads: &[Lead]) -> Vec<KpiStat> {
    let converted = leads.iter().filter(|l| l.converted).count();
    vec![
        KpiStat::new("Leads", leads.len() as f64),
        KpiStat::new("Converted", converted as f64),
        KpiStat::new("Conversion", format!("{}%", conversion_rate(leads))),
        KpiStat::new("Sources", top_sources(leads, TOP_SOURCES).len() as f64),
    ]
}

/// New leads per creation date, ascending.
pub fn new_leads(leads: &[Lead]) -> Vec<Point2D> {
    let mut days = tally(leads.iter().map(|l| l.created_at.as_str()));
    days.sort_by(|a, b| a.0.cmp(&b.0));
    days.into_iter().map(|(d, n)| Point2D::new(d, n)).collect()
}

/// Stage keys of the first month: known stages in funnel order, then any others.
pub fn stage_keys(months: &[PipelineMonth]) -> Vec<String> {
    let Some(first) = months.first() else { return Vec::new() };
    let mut keys: Vec<String> = STAGES.iter().filter(|s| first.by_stage.contains_key(**s)).map(|s| s.to_string()).collect();
    keys.extend(first.by_stage.keys().filter(|k| !STAGES.contains(&k.as_str())).cloned());
    keys
}

pub fn pipeline_rows(months: &[PipelineMonth], stages: &[String]) -> Vec<MultiSeriesRow> {
    months
        .iter()
        .map(|m| stages.iter().fold(MultiSeriesRow::new(m.month.as_str()), |row, s| row.with(s.as_str(), m.by_stage.get(s).copied().unwrap_or(0.0))))
        .collect()
}

pub fn pipeline_cells(months: &[PipelineMonth], stages: &[String]) -> Vec<HeatCell> {
    months
        .iter()
        .flat_map(|m| stages.iter().map(move |s| HeatCell::new(s.as_str(), m.month.as_str(), m.by_stage.get(s).copied().unwrap_or(0.0))))
        .collect()
}

/// Open and won leads per stage; lost leads leave the funnel.
pub fn funnel_stages(leads: &[Lead]) -> Vec<FunnelStage> {
    STAGES
        .iter()
        .filter(|s| **s != "lost")
        .map(|s| FunnelStage::new(humanize(s), leads.iter().filter(|l| l.stage == *s).count() as f64))
        .collect()
}

pub fn page(leads: &[Lead], months: &[PipelineMonth]) -> Page {
    let stages = stage_keys(months);
    let grid = Grid::new()
        .row(kpis(leads).into_iter().map(|s| Cell::new(1, KpiCard::new(s))).collect())
        .row(vec![
            Cell::new(3, LineChart::new(new_leads(leads)).title("New Leads")),
            Cell::new(1, RadialGauge::new(conversion_rate(leads)).title("Conversion")),
        ])
        .row(vec![
            Cell::new(2, MultiLineChart::new(pipeline_rows(months, &stages), stages.clone()).title("Pipeline by Stage")),
            Cell::new(2, Heatmap::new(pipeline_cells(months, &stages)).title("Pipeline Heatmap")),
        ])
        .row(vec![
            Cell::new(2, BarChart::new(top_sources(leads, TOP_SOURCES)).title("Top Sources")),
            Cell::new(2, FunnelChart::new(funnel_stages(leads))),
        ]);
    Page::new(PageId::Crm, "CRM", "Leads, conversion and pipeline health", grid)
}
