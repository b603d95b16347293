// File: crates/bento-core/src/page/social.rs
// Summary: Social page: audience KPIs, follower growth and share, reach per platform, campaign rankings.

use crate::data::{CategoryValue, HeatCell, KpiStat, MultiSeriesRow, Point2D};
use crate::fixtures::{Campaign, PlatformDay, SocialMetrics};
use crate::widget::{BarChart, DonutChart, Heatmap, KpiCard, LineChart, MultiLineChart};

use super::{Cell, Grid, Page, PageId};

const TOP_CAMPAIGNS: usize = 10;
const HEATMAP_CAMPAIGNS: usize = 20;

/// Last day of each platform's series (zeros for an empty series).
pub fn latest(social: &SocialMetrics) -> Vec<(String, PlatformDay)> {
    social.platforms.iter().map(|(name, days)| (name.clone(), days.last().cloned().unwrap_or_default())).collect()
}

pub fn kpis(social: &SocialMetrics) -> Vec<KpiStat> {
    let latest = latest(social);
    let followers: f64 = latest.iter().map(|(_, d)| d.followers).sum();
    let reach: f64 = latest.iter().map(|(_, d)| d.reach).sum();
    let engagement = latest.iter().map(|(_, d)| d.engagement).sum::<f64>() / latest.len().max(1) as f64;
    vec![
        KpiStat::new("Followers", followers),
        KpiStat::new("Reach", reach),
        KpiStat::new("Engagement", format!("{engagement:.2}%")),
        KpiStat::new("Platforms", latest.len() as f64),
    ]
}

/// Dates of the first platform; every platform shares them.
fn dates(social: &SocialMetrics) -> Vec<String> {
    social.platforms.values().next().map(|days| days.iter().map(|d| d.date.clone()).collect()).unwrap_or_default()
}

fn per_day(social: &SocialMetrics, f: impl Fn(&PlatformDay) -> f64) -> Vec<Vec<f64>> {
    let n = dates(social).len();
    (0..n).map(|i| social.platforms.values().map(|days| days.get(i).map(&f).unwrap_or(0.0)).collect()).collect()
}

/// Total followers per day across platforms.
pub fn follower_growth(social: &SocialMetrics) -> Vec<Point2D> {
    dates(social).into_iter().zip(per_day(social, |d| d.followers)).map(|(date, v)| Point2D::new(date, v.iter().sum())).collect()
}

/// Mean engagement per day, two decimals.
pub fn engagement_trend(social: &SocialMetrics) -> Vec<Point2D> {
    let platforms = social.platforms.len().max(1) as f64;
    dates(social)
        .into_iter()
        .zip(per_day(social, |d| d.engagement))
        .map(|(date, v)| Point2D::new(date, (v.iter().sum::<f64>() / platforms * 100.0).round() / 100.0))
        .collect()
}

pub fn reach_rows(social: &SocialMetrics) -> Vec<MultiSeriesRow> {
    dates(social)
        .into_iter()
        .zip(per_day(social, |d| d.reach))
        .map(|(date, v)| social.platforms.keys().zip(v).fold(MultiSeriesRow::new(date), |row, (k, r)| row.with(k.as_str(), r)))
        .collect()
}

/// Campaigns by impressions, highest first.
pub fn top_campaigns(campaigns: &[Campaign], n: usize) -> Vec<CategoryValue> {
    let mut sorted: Vec<&Campaign> = campaigns.iter().collect();
    sorted.sort_by(|a, b| b.impressions.total_cmp(&a.impressions));
    sorted.into_iter().take(n).map(|c| CategoryValue::new(c.name.as_str(), c.impressions)).collect()
}

pub fn campaign_cells(campaigns: &[Campaign], n: usize) -> Vec<HeatCell> {
    campaigns
        .iter()
        .take(n)
        .flat_map(|c| Campaign::METRICS.iter().map(move |m| HeatCell::new(c.name.as_str(), *m, c.metric(m))))
        .collect()
}

pub fn page(social: &SocialMetrics) -> Page {
    let share = latest(social).into_iter().map(|(name, d)| CategoryValue::new(name, d.followers)).collect();
    let platforms: Vec<String> = social.platforms.keys().cloned().collect();
    let grid = Grid::new()
        .row(kpis(social).into_iter().map(|s| Cell::new(1, KpiCard::new(s))).collect())
        .row(vec![
            Cell::new(2, LineChart::new(follower_growth(social)).title("Followers Growth")),
            Cell::new(2, DonutChart::new(share).title("Followers by Platform")),
        ])
        .row(vec![
            Cell::new(2, MultiLineChart::new(reach_rows(social), platforms).title("Reach by Platform")),
            Cell::new(2, LineChart::new(engagement_trend(social)).title("Avg Engagement")),
        ])
        .row(vec![
            Cell::new(2, BarChart::new(top_campaigns(&social.campaigns, TOP_CAMPAIGNS)).title("Top Campaigns")),
            Cell::new(2, Heatmap::new(campaign_cells(&social.campaigns, HEATMAP_CAMPAIGNS)).title("Campaign Metrics").height(480.0)),
        ]);
    Page::new(PageId::Social, "Social", "Audience growth, reach and campaign performance", grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, followers: f64, reach: f64, engagement: f64) -> PlatformDay {
        PlatformDay { date: date.into(), followers, reach, engagement }
    }

    fn sample() -> SocialMetrics {
        let mut s = SocialMetrics::default();
        s.platforms.insert("instagram".into(), vec![day("d1", 100.0, 10.0, 2.0), day("d2", 110.0, 20.0, 4.0)]);
        s.platforms.insert("twitter".into(), vec![day("d1", 50.0, 5.0, 1.0), day("d2", 55.0, 6.0, 3.0)]);
        s.campaigns = vec![
            Campaign { id: "c1".into(), name: "Spring".into(), impressions: 10.0, clicks: 2.0, ..Default::default() },
            Campaign { id: "c2".into(), name: "Launch".into(), impressions: 30.0, conversions: 1.0, ..Default::default() },
        ];
        s
    }

    #[test]
    fn totals_use_the_latest_day() {
        let k = kpis(&sample());
        assert_eq!(k[0].value.to_string(), "165");
        assert_eq!(k[1].value.to_string(), "26");
        assert_eq!(k[2].value.to_string(), "3.50%");
        assert_eq!(k[3].value.to_string(), "2");
    }

    #[test]
    fn daily_series() {
        let s = sample();
        assert_eq!(follower_growth(&s), vec![Point2D::new("d1", 150.0), Point2D::new("d2", 165.0)]);
        assert_eq!(engagement_trend(&s)[0].y, 1.5);
        let rows = reach_rows(&s);
        assert_eq!(rows[1].value("instagram"), 20.0);
        assert_eq!(rows[1].value("twitter"), 6.0);
    }

    #[test]
    fn campaign_rankings() {
        let s = sample();
        assert_eq!(top_campaigns(&s.campaigns, 1), vec![CategoryValue::new("Launch", 30.0)]);
        let cells = campaign_cells(&s.campaigns, 20);
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[1], HeatCell::new("Spring", "clicks", 2.0));
    }

    #[test]
    fn empty_metrics() {
        let s = SocialMetrics::default();
        assert!(follower_growth(&s).is_empty());
        assert_eq!(kpis(&s)[2].value.to_string(), "0.00%");
    }
}
