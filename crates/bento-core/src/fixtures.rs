// File: crates/bento-core/src/fixtures.rs
// Summary: Typed dashboard fixtures (fleet, e-commerce, analytics, social, CRM) and JSON load/save.
// Notes:
// - Paths are relative to a data directory (`data/` by default).
// - Numeric fields that are missing, null or non-numeric load as 0.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::data::{lenient_f64, lenient_f64_map};
use crate::error::{DashError, DashResult};

pub const VEHICLES: &str = "fleet/vehicles.json";
pub const ORDERS: &str = "ecommerce/orders.json";
pub const REVENUE: &str = "analytics/revenue.json";
pub const TRAFFIC_HEATMAP: &str = "analytics/traffic_heatmap.json";
pub const SOCIAL_METRICS: &str = "social/social_metrics.json";
pub const LEADS: &str = "crm/leads.json";
pub const PIPELINE_MONTHLY: &str = "crm/pipeline_monthly.json";

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    #[serde(default)]
    pub hub: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub speed_kmh: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fuel_pct: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub delay_min: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub health_score: f64,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub hub: String,
    #[serde(default)]
    pub courier: String,
    #[serde(default)]
    pub sla_breach: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Channels {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub online: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub retail: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub partners: f64,
}

impl Channels {
    pub const KEYS: [&'static str; 3] = ["online", "retail", "partners"];

    pub fn get(&self, key: &str) -> f64 {
        match key {
            "online" => self.online,
            "retail" => self.retail,
            "partners" => self.partners,
            _ => 0.0,
        }
    }
}

/// One day of revenue analytics.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct RevenueDay {
    pub date: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub revenue: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub profit: f64,
    #[serde(default)]
    pub channels: Channels,
}

/// Date -> 24 hourly visit counts.
pub type TrafficHeatmap = BTreeMap<String, Vec<f64>>;

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PlatformDay {
    pub date: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub followers: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub reach: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub engagement: f64,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub impressions: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub clicks: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub conversions: f64,
}

impl Campaign {
    pub const METRICS: [&'static str; 3] = ["impressions", "clicks", "conversions"];

    pub fn metric(&self, name: &str) -> f64 {
        match name {
            "impressions" => self.impressions,
            "clicks" => self.clicks,
            "conversions" => self.conversions,
            _ => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct SocialMetrics {
    /// Platform name -> daily series, all series sharing the same dates.
    #[serde(default)]
    pub platforms: BTreeMap<String, Vec<PlatformDay>>,
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub stage: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: f64,
    #[serde(default)]
    pub converted: bool,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineMonth {
    /// `YYYY-MM`.
    pub month: String,
    #[serde(default, alias = "byStage", deserialize_with = "lenient_f64_map")]
    pub by_stage: BTreeMap<String, f64>,
}

/// Read and parse one JSON fixture.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> DashResult<T> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DashError::MissingFixture(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| DashError::Json { path: path.to_path_buf(), source })
}

/// Pretty-print `value` to `path`, creating parent directories.
pub fn save_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> DashResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string_pretty(value).map_err(|source| DashError::Json { path: path.to_path_buf(), source })?;
    fs::write(path, text)?;
    Ok(())
}

/// Every fixture the pages read, loaded from one data directory.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Fixtures {
    pub vehicles: Vec<Vehicle>,
    pub orders: Vec<Order>,
    pub revenue: Vec<RevenueDay>,
    pub traffic: TrafficHeatmap,
    pub social: SocialMetrics,
    pub leads: Vec<Lead>,
    pub pipeline_monthly: Vec<PipelineMonth>,
}

/// Missing files fall back to empty data with a warning; unreadable or
/// malformed ones are errors.
fn or_empty<T: Default>(result: DashResult<T>) -> DashResult<T> {
    match result {
        Ok(v) => Ok(v),
        Err(DashError::MissingFixture(path)) => {
            warn!(path = %path.display(), "fixture missing, using empty data");
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}

impl Fixtures {
    pub fn load(data_dir: impl AsRef<Path>) -> DashResult<Self> {
        let dir = data_dir.as_ref();
        let f = Self {
            vehicles: or_empty(load_json(dir.join(VEHICLES)))?,
            orders: or_empty(load_json(dir.join(ORDERS)))?,
            revenue: or_empty(load_json(dir.join(REVENUE)))?,
            traffic: or_empty(load_json(dir.join(TRAFFIC_HEATMAP)))?,
            social: or_empty(load_json(dir.join(SOCIAL_METRICS)))?,
            leads: or_empty(load_json(dir.join(LEADS)))?,
            pipeline_monthly: or_empty(load_json(dir.join(PIPELINE_MONTHLY)))?,
        };
        debug!(
            dir = %dir.display(),
            vehicles = f.vehicles.len(),
            orders = f.orders.len(),
            days = f.revenue.len(),
            leads = f.leads.len(),
            "fixtures loaded"
        );
        Ok(f)
    }

    /// Write every fixture under `data_dir`; returns the written paths.
    pub fn save(&self, data_dir: impl AsRef<Path>) -> DashResult<Vec<PathBuf>> {
        let dir = data_dir.as_ref();
        let out = vec![
            (dir.join(VEHICLES), serde_json::to_value(&self.vehicles)),
            (dir.join(ORDERS), serde_json::to_value(&self.orders)),
            (dir.join(REVENUE), serde_json::to_value(&self.revenue)),
            (dir.join(TRAFFIC_HEATMAP), serde_json::to_value(&self.traffic)),
            (dir.join(SOCIAL_METRICS), serde_json::to_value(&self.social)),
            (dir.join(LEADS), serde_json::to_value(&self.leads)),
            (dir.join(PIPELINE_MONTHLY), serde_json::to_value(&self.pipeline_monthly)),
        ];
        let mut written = Vec::with_capacity(out.len());
        for (path, value) in out {
            let value = value.map_err(|source| DashError::Json { path: path.clone(), source })?;
            save_json(&path, &value)?;
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let f = Fixtures::load(dir.path().join("nope")).unwrap();
        assert_eq!(f, Fixtures::default());
    }

    #[test]
    fn malformed_json_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(VEHICLES);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[{").unwrap();
        match Fixtures::load(dir.path()) {
            Err(DashError::Json { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected json error, got {other:?}"),
        }
    }

    #[test]
    fn partial_records_and_camel_case_stages() {
        let v: Vec<Vehicle> = serde_json::from_str(r#"[{"id":"veh-1000","status":"idle"}]"#).unwrap();
        assert_eq!(v[0].speed_kmh, 0.0);
        let m: Vec<PipelineMonth> = serde_json::from_str(r#"[{"month":"2025-01","byStage":{"won":3}}]"#).unwrap();
        assert_eq!(m[0].by_stage["won"], 3.0);
    }

    #[test]
    fn malformed_numbers_do_not_fail_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ORDERS);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"[{"id":"o1","amount":null},{"id":"o2","amount":"19.5"},{"id":"o3","amount":"n/a"}]"#).unwrap();
        let f = Fixtures::load(dir.path()).unwrap();
        assert_eq!(f.orders.iter().map(|o| o.amount).collect::<Vec<_>>(), vec![0.0, 19.5, 0.0]);
        let m: Vec<PipelineMonth> = serde_json::from_str(r#"[{"month":"2025-01","by_stage":{"won":null,"lead":"4"}}]"#).unwrap();
        assert_eq!((m[0].by_stage["won"], m[0].by_stage["lead"]), (0.0, 4.0));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = Fixtures::default();
        f.leads.push(Lead { id: "lead-1".into(), created_at: "2025-01-02".into(), source: "web".into(), stage: "won".into(), value: 10.0, converted: true });
        f.traffic.insert("2025-01-01".into(), vec![1.0; 24]);
        let written = f.save(dir.path()).unwrap();
        assert_eq!(written.len(), 7);
        assert_eq!(Fixtures::load(dir.path()).unwrap(), f);
    }
}
