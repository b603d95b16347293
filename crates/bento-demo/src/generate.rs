// File: crates/bento-demo/src/generate.rs
// Summary: Seeded synthetic fixtures for every dashboard area, dated back from a fixed anchor day.

use anyhow::{Context, Result};
use bento_core::fixtures::{
    Campaign, Channels, Fixtures, Lead, Order, PipelineMonth, PlatformDay, RevenueDay, SocialMetrics, TrafficHeatmap, Vehicle,
};
use bento_core::format::format_date;
use chrono::{Duration, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::GenerateConfig;

/// Last generated day; every date counts back from here.
pub const ANCHOR: (i32, u32, u32) = (2025, 6, 30);
pub const HUBS: usize = 10;
pub const TRAFFIC_DAYS: usize = 30;
pub const PIPELINE_MONTHS: u32 = 6;

const VEHICLE_STATUS: [&str; 6] = ["idle", "in_transit", "charging", "maintenance", "offline", "decommissioned"];
const CATEGORIES: [&str; 8] = ["electronics", "home", "beauty", "fashion", "sports", "toys", "groceries", "auto"];
const ORDER_STATUS: [&str; 5] = ["delivered", "shipped", "returned", "processing", "cancelled"];
const COURIERS: [&str; 5] = ["DHL", "UPS", "USPS", "FastShip", "QuickCouriers"];
const PLATFORMS: [&str; 3] = ["instagram", "twitter", "linkedin"];
const SOURCES: [&str; 5] = ["web", "ad", "referral", "event", "email"];
const STAGES: [&str; 6] = ["lead", "qualified", "proposal", "negotiation", "won", "lost"];

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

struct Dates {
    anchor: NaiveDate,
}

impl Dates {
    fn new() -> Result<Self> {
        let (y, m, d) = ANCHOR;
        let anchor = NaiveDate::from_ymd_opt(y, m, d).context("invalid anchor date")?;
        Ok(Self { anchor })
    }

    fn days_ago(&self, n: usize) -> String {
        format_date(self.anchor - Duration::days(n as i64), "%Y-%m-%d")
    }

    fn months_ago(&self, n: u32) -> String {
        let d = self.anchor.checked_sub_months(Months::new(n)).unwrap_or(self.anchor);
        format_date(d, "%Y-%m")
    }
}

fn hub(rng: &mut StdRng) -> String {
    format!("Hub-{}", rng.gen_range(1..=HUBS))
}

fn vehicles(rng: &mut StdRng, n: usize) -> Vec<Vehicle> {
    (0..n)
        .map(|i| Vehicle {
            id: format!("veh-{}", 1000 + i),
            hub: hub(rng),
            status: pick(rng, &VEHICLE_STATUS).to_string(),
            speed_kmh: (rng.gen_range(0.0..120.0_f64) * 10.0).round() / 10.0,
            fuel_pct: rng.gen_range(5..=100) as f64,
            delay_min: rng.gen_range(0..=240) as f64,
            health_score: rng.gen_range(0..=100) as f64,
        })
        .collect()
}

fn orders(rng: &mut StdRng, dates: &Dates, n: usize, days: usize) -> Vec<Order> {
    (0..n)
        .map(|i| Order {
            id: format!("order-{}", 100_000 + i),
            date: dates.days_ago(rng.gen_range(0..days.max(1))),
            amount: round2(rng.gen_range(5.0..1505.0)),
            category: pick(rng, &CATEGORIES).to_string(),
            status: pick(rng, &ORDER_STATUS).to_string(),
            hub: hub(rng),
            courier: pick(rng, &COURIERS).to_string(),
            sla_breach: rng.gen_bool(0.08),
        })
        .collect()
}

fn revenue(rng: &mut StdRng, dates: &Dates, days: usize) -> Vec<RevenueDay> {
    (0..days)
        .map(|i| {
            let revenue = round2(rng.gen_range(150_000.0..750_000.0));
            let cost = round2(revenue * rng.gen_range(0.45..0.75));
            let channels = Channels {
                online: round2(revenue * rng.gen_range(0.45..0.65)),
                retail: round2(revenue * rng.gen_range(0.25..0.40)),
                partners: round2(revenue * rng.gen_range(0.15..0.25)),
            };
            RevenueDay { date: dates.days_ago(days - 1 - i), revenue, cost, profit: round2(revenue - cost), channels }
        })
        .collect()
}

fn traffic(rng: &mut StdRng, dates: &Dates, days: usize) -> TrafficHeatmap {
    (0..days.min(TRAFFIC_DAYS))
        .map(|i| (dates.days_ago(days - 1 - i), (0..24).map(|_| rng.gen_range(100..=2100) as f64).collect()))
        .collect()
}

fn social(rng: &mut StdRng, dates: &Dates, days: usize, campaigns: usize) -> SocialMetrics {
    let mut platforms = std::collections::BTreeMap::new();
    for p in PLATFORMS {
        let mut base: f64 = rng.gen_range(20_000.0..70_000.0_f64).round();
        let series = (0..days)
            .map(|i| {
                base = (base * (1.0 + rng.gen_range(-0.002..0.008))).round();
                if rng.gen_bool(0.04) {
                    base += rng.gen_range(0.0..5000.0_f64).round();
                }
                PlatformDay {
                    date: dates.days_ago(days - 1 - i),
                    followers: base,
                    reach: rng.gen_range(2000.0..82_000.0_f64).round(),
                    engagement: round2(rng.gen_range(0.0..8.0)),
                }
            })
            .collect();
        platforms.insert(p.to_string(), series);
    }
    let campaigns = (0..campaigns)
        .map(|i| Campaign {
            id: format!("camp-{}", i + 1),
            name: format!("Campaign {}", i + 1),
            platform: pick(rng, &PLATFORMS).to_string(),
            impressions: rng.gen_range(0.0..800_000.0_f64).round(),
            clicks: rng.gen_range(0.0..100_000.0_f64).round(),
            conversions: rng.gen_range(0.0..10_000.0_f64).round(),
        })
        .collect();
    SocialMetrics { platforms, campaigns }
}

fn leads(rng: &mut StdRng, dates: &Dates, n: usize, days: usize) -> Vec<Lead> {
    (0..n)
        .map(|i| Lead {
            id: format!("lead-{}", 30_000 + i),
            created_at: dates.days_ago(rng.gen_range(0..=days)),
            source: pick(rng, &SOURCES).to_string(),
            stage: pick(rng, &STAGES).to_string(),
            value: rng.gen_range(0.0..50_000.0_f64).round(),
            converted: rng.gen_bool(0.18),
        })
        .collect()
}

fn pipeline(rng: &mut StdRng, dates: &Dates) -> Vec<PipelineMonth> {
    (0..PIPELINE_MONTHS)
        .map(|i| PipelineMonth {
            month: dates.months_ago(PIPELINE_MONTHS - 1 - i),
            by_stage: STAGES.iter().map(|s| (s.to_string(), rng.gen_range(100.0..1100.0_f64).round())).collect(),
        })
        .collect()
}

/// Build every fixture from `cfg.seed`; the same config always yields the same data.
pub fn generate(cfg: &GenerateConfig) -> Result<Fixtures> {
    let dates = Dates::new()?;
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let days = cfg.days.max(1);
    Ok(Fixtures {
        vehicles: vehicles(&mut rng, cfg.vehicles),
        orders: orders(&mut rng, &dates, cfg.orders, days),
        revenue: revenue(&mut rng, &dates, days),
        traffic: traffic(&mut rng, &dates, days),
        social: social(&mut rng, &dates, days, cfg.campaigns),
        leads: leads(&mut rng, &dates, cfg.leads, days),
        pipeline_monthly: pipeline(&mut rng, &dates),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> GenerateConfig {
        GenerateConfig { seed: 7, days: 10, vehicles: 5, orders: 20, leads: 15, campaigns: 3 }
    }

    #[test]
    fn same_seed_same_data() {
        assert_eq!(generate(&small()).unwrap(), generate(&small()).unwrap());
        let other = GenerateConfig { seed: 8, ..small() };
        assert_ne!(generate(&small()).unwrap(), generate(&other).unwrap());
    }

    #[test]
    fn shapes_follow_the_config() {
        let f = generate(&small()).unwrap();
        assert_eq!(f.vehicles.len(), 5);
        assert_eq!(f.orders.len(), 20);
        assert_eq!(f.revenue.len(), 10);
        assert_eq!(f.revenue.last().unwrap().date, "2025-06-30");
        assert_eq!(f.revenue[0].date, "2025-06-21");
        assert_eq!(f.traffic.len(), 10);
        assert!(f.traffic.values().all(|h| h.len() == 24));
        assert_eq!(f.social.platforms.len(), 3);
        assert!(f.social.platforms.values().all(|s| s.len() == 10));
        assert_eq!(f.pipeline_monthly.len(), 6);
        assert_eq!(f.pipeline_monthly.last().unwrap().month, "2025-06");
        assert_eq!(f.pipeline_monthly[0].month, "2025-01");
    }

    #[test]
    fn values_stay_in_range() {
        let f = generate(&GenerateConfig { seed: 1, ..GenerateConfig::default() }).unwrap();
        assert!(f.vehicles.iter().all(|v| (0.0..=120.0).contains(&v.speed_kmh) && (0.0..=100.0).contains(&v.health_score)));
        assert!(f.orders.iter().all(|o| (5.0..=1505.0).contains(&o.amount)));
        assert!(f.revenue.iter().all(|d| d.cost < d.revenue && d.profit > 0.0));
        assert_eq!(f.traffic.len(), TRAFFIC_DAYS);
    }
}
