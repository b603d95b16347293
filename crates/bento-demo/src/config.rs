// File: crates/bento-demo/src/config.rs
// Summary: `bento.toml` configuration with defaults and BENTO_* environment overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bento_core::DashError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG: &str = "bento.toml";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Svg,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: f32,
    pub theme: String,
    pub formats: Vec<OutputFormat>,
    /// Animation time sampled for PNG output.
    pub time_ms: f32,
    pub sidebar_collapsed: bool,
    pub scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            theme: "dark".into(),
            formats: vec![OutputFormat::Png, OutputFormat::Svg],
            time_ms: 2000.0,
            sidebar_collapsed: false,
            scale: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("data"), out_dir: PathBuf::from("target/out") }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub seed: u64,
    pub days: usize,
    pub vehicles: usize,
    pub orders: usize,
    pub leads: usize,
    pub campaigns: usize,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self { seed: 42, days: 120, vehicles: 140, orders: 1200, leads: 2000, campaigns: 30 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".into() }
    }
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub paths: PathsConfig,
    pub generate: GenerateConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, DashError> {
        toml::from_str(text).map_err(|e| DashError::Config(e.to_string()))
    }

    /// Load `path`, or `bento.toml` in the working directory when it exists,
    /// or defaults. An explicit path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG), false),
        };
        if !path.exists() {
            if required {
                anyhow::bail!("config file not found: {}", path.display());
            }
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Apply `BENTO_DATA_DIR`, `BENTO_OUT_DIR` and `BENTO_THEME`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("BENTO_DATA_DIR").filter(|v| !v.is_empty()) {
            self.paths.data_dir = PathBuf::from(v);
        }
        if let Some(v) = var("BENTO_OUT_DIR").filter(|v| !v.is_empty()) {
            self.paths.out_dir = PathBuf::from(v);
        }
        if let Some(v) = var("BENTO_THEME").filter(|v| !v.is_empty()) {
            self.render.theme = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = Config::from_toml("[render]\nwidth = 1600\nformats = [\"svg\"]\n[generate]\nseed = 7\n").unwrap();
        assert_eq!(cfg.render.width, 1600.0);
        assert_eq!(cfg.render.formats, vec![OutputFormat::Svg]);
        assert_eq!(cfg.render.theme, "dark");
        assert_eq!(cfg.generate.seed, 7);
        assert_eq!(cfg.generate.days, 120);
        assert_eq!(cfg.paths.out_dir, PathBuf::from("target/out"));
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        assert!(matches!(Config::from_toml("[render\nwidth = "), Err(DashError::Config(_))));
        assert!(matches!(Config::from_toml("[render]\nformats = [\"gif\"]"), Err(DashError::Config(_))));
    }

    #[test]
    fn env_overrides_win() {
        let mut cfg = Config::default();
        cfg.apply_env(|k| match k {
            "BENTO_THEME" => Some("light".into()),
            "BENTO_OUT_DIR" => Some("/tmp/out".into()),
            "BENTO_DATA_DIR" => Some(String::new()),
            _ => None,
        });
        assert_eq!(cfg.render.theme, "light");
        assert_eq!(cfg.paths.out_dir, PathBuf::from("/tmp/out"));
        assert_eq!(cfg.paths.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("none.toml"))).is_err());
        let path = dir.path().join("bento.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap().logging.level, "debug");
    }
}
