// File: crates/bento-core/src/page/fleet.rs
// Summary: Fleet page: vehicle KPIs, status breakdown and speed/health distributions.

use crate::data::{CategoryValue, KpiColor, KpiStat};
use crate::fixtures::Vehicle;
use crate::widget::{BarChart, Histogram, KpiCard};

use super::{humanize, mean, tally, Cell, Grid, Page, PageId};

/// Status of a vehicle that is on the road.
pub const ACTIVE_STATUS: &str = "in_transit";

pub fn kpis(vehicles: &[Vehicle]) -> Vec<KpiStat> {
    let active = vehicles.iter().filter(|v| v.status == ACTIVE_STATUS).count();
    let health = mean(vehicles.iter().map(|v| v.health_score)).round();
    let speed = mean(vehicles.iter().map(|v| v.speed_kmh)).round();
    vec![
        KpiStat::new("Total Vehicles", vehicles.len() as f64).icon("🚗"),
        KpiStat::new("Active Vehicles", active as f64).icon("✅").color(KpiColor::Success),
        KpiStat::new("Avg. Health", format!("{health}%")).icon("❤️").color(KpiColor::Danger),
        KpiStat::new("Avg. Speed", format!("{speed} km/h")).icon("⚡").color(KpiColor::Warning),
    ]
}

/// Vehicle count per status, first-seen order, labels humanized.
pub fn by_status(vehicles: &[Vehicle]) -> Vec<CategoryValue> {
    tally(vehicles.iter().map(|v| v.status.as_str()))
        .into_iter()
        .map(|(status, n)| CategoryValue::new(humanize(&status), n))
        .collect()
}

pub fn page(vehicles: &[Vehicle]) -> Page {
    let speeds: Vec<f64> = vehicles.iter().map(|v| v.speed_kmh).collect();
    let health: Vec<f64> = vehicles.iter().map(|v| v.health_score).collect();
    let grid = Grid::new()
        .row(kpis(vehicles).into_iter().map(|s| Cell::new(1, KpiCard::new(s))).collect())
        .row(vec![
            Cell::new(2, BarChart::new(by_status(vehicles)).title("Vehicles by Status")),
            Cell::new(2, Histogram::from_values(&speeds).bins(15).title("Speed Distribution")),
        ])
        .row(vec![Cell::new(4, Histogram::from_values(&health).bins(20).title("Fleet Health Distribution"))]);
    Page::new(PageId::Fleet, "Fleet Operations", "Fleet monitoring, vehicle status and health analytics", grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(status: &str, speed: f64, health: f64) -> Vehicle {
        Vehicle { id: format!("veh-{status}-{speed}"), status: status.into(), speed_kmh: speed, health_score: health, ..Default::default() }
    }

    #[test]
    fn status_counts_and_averages() {
        let fleet = vec![vehicle("in_transit", 60.0, 90.0), vehicle("idle", 0.0, 71.0), vehicle("in_transit", 90.0, 80.0)];
        assert_eq!(by_status(&fleet), vec![CategoryValue::new("In transit", 2.0), CategoryValue::new("Idle", 1.0)]);
        let k = kpis(&fleet);
        assert_eq!(k[1].value.to_string(), "2");
        assert_eq!(k[2].value.to_string(), "80%");
        assert_eq!(k[3].value.to_string(), "50 km/h");
    }

    #[test]
    fn empty_fleet_is_zeroed() {
        let k = kpis(&[]);
        assert_eq!(k[0].value.to_string(), "0");
        assert_eq!(k[2].value.to_string(), "0%");
        assert_eq!(page(&[]).grid.len(), 7);
    }
}
