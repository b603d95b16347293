// File: crates/bento-core/src/data.rs
// Summary: Input data model for widgets: points, categories, wide rows, samples, cells, slices, KPIs.
// Notes:
// - Every record is an immutable snapshot handed to a widget per render.
// - Missing or malformed numeric fields resolve to 0 instead of failing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A JSON scalar that may be a number or a string (x labels, dates, KPI values).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Numeric view; numeric strings are parsed, anything else is 0.
    pub fn as_f64(&self) -> f64 {
        match self {
            Scalar::Number(v) if v.is_finite() => *v,
            Scalar::Number(_) => 0.0,
            Scalar::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0),
        }
    }
}

impl Default for Scalar {
    fn default() -> Self { Scalar::Number(0.0) }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self { Scalar::Number(v) }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self { Scalar::Number(v as f64) }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self { Scalar::Text(v.to_string()) }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self { Scalar::Text(v) }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(v) => f.write_str(&plain_number(*v)),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

fn value_f64(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// `deserialize_with` for numeric record fields: numbers pass through,
/// numeric strings are parsed, null and anything else become 0.
pub fn lenient_f64<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    Ok(value_f64(&Value::deserialize(de)?))
}

/// Map flavour of [`lenient_f64`]; a non-object becomes an empty map.
pub fn lenient_f64_map<'de, D: Deserializer<'de>>(de: D) -> Result<BTreeMap<String, f64>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Object(entries) => entries.iter().map(|(k, v)| (k.clone(), value_f64(v))).collect(),
        _ => BTreeMap::new(),
    })
}

/// Shortest plain rendering of a number: integers print without a fraction.
pub fn plain_number(v: f64) -> String {
    if !v.is_finite() {
        return "NaN".to_string();
    }
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Line/area input. Sequence order is significant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    #[serde(default)]
    pub x: Scalar,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub y: f64,
}

impl Point2D {
    pub fn new(x: impl Into<Scalar>, y: f64) -> Self {
        Self { x: x.into(), y }
    }
}

/// Bar chart input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryValue {
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: f64,
}

impl CategoryValue {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self { label: label.into(), value }
    }
}

/// Wide row: one shared x value plus one column per series key.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiSeriesRow {
    #[serde(default)]
    pub date: Scalar,
    #[serde(flatten)]
    pub values: BTreeMap<String, Scalar>,
}

impl MultiSeriesRow {
    pub fn new(date: impl Into<Scalar>) -> Self {
        Self { date: date.into(), values: BTreeMap::new() }
    }

    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), Scalar::Number(value));
        self
    }

    /// Value for `key`, 0 when absent or non-numeric.
    pub fn value(&self, key: &str) -> f64 {
        self.values.get(key).map(Scalar::as_f64).unwrap_or(0.0)
    }
}

/// Raw histogram observation; binning happens in the widget.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistogramSample {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: f64,
}

impl From<f64> for HistogramSample {
    fn from(value: f64) -> Self { Self { value } }
}

/// Sparse heatmap matrix entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeatCell {
    #[serde(default)]
    pub row: String,
    #[serde(default)]
    pub column: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: f64,
}

impl HeatCell {
    pub fn new(row: impl Into<String>, column: impl Into<String>, value: f64) -> Self {
        Self { row: row.into(), column: column.into(), value }
    }
}

/// Donut slice.
pub type PieSlice = CategoryValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiColor {
    #[default]
    Accent,
    Success,
    Warning,
    Danger,
}

/// KPI card content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KpiStat {
    pub title: String,
    #[serde(default)]
    pub value: Scalar,
    #[serde(default)]
    pub unit: Option<String>,
    /// Percent delta; the sign picks the badge direction.
    #[serde(default)]
    pub change: Option<f64>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: KpiColor,
}

impl KpiStat {
    pub fn new(title: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self { title: title.into(), value: value.into(), unit: None, change: None, icon: None, color: KpiColor::Accent }
    }
    pub fn unit(mut self, unit: impl Into<String>) -> Self { self.unit = Some(unit.into()); self }
    pub fn change(mut self, change: f64) -> Self { self.change = Some(change); self }
    pub fn icon(mut self, icon: impl Into<String>) -> Self { self.icon = Some(icon.into()); self }
    pub fn color(mut self, color: KpiColor) -> Self { self.color = color; self }
}

/// Funnel stage (pipeline counts).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub stage: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub count: f64,
}

impl FunnelStage {
    pub fn new(stage: impl Into<String>, count: f64) -> Self {
        Self { stage: stage.into(), count }
    }
}
