use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::loader::FetchOptions;

/// Optional config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "income-explorer.json";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Paths and remote source. Every field has a default, so the config file
/// may set any subset of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Pre-rendered choropleth map.
    pub map_path: PathBuf,
    /// Counties table loaded at startup when present.
    pub counties_csv: PathBuf,
    /// Remote counties table; takes precedence over `counties_csv`.
    pub counties_url: Option<String>,
    pub fetch_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            map_path: PathBuf::from("income_map.html"),
            counties_csv: PathBuf::from("counties.csv"),
            counties_url: None,
            fetch_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Defaults, then `income-explorer.json` if present, then environment.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::from_file(Path::new(CONFIG_FILE))?;
        cfg.apply_env(|k| std::env::var(k).ok())?;
        Ok(cfg)
    }

    /// Read a JSON config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Using configuration from {}", path.display());
        Ok(cfg)
    }

    /// Override fields from `INCOME_MAP_PATH`, `COUNTIES_CSV`, `COUNTIES_URL`
    /// and `FETCH_TIMEOUT_SECS`. Empty values are ignored.
    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| var(k).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("INCOME_MAP_PATH") {
            self.map_path = PathBuf::from(v);
        }
        if let Some(v) = get("COUNTIES_CSV") {
            self.counties_csv = PathBuf::from(v);
        }
        if let Some(v) = get("COUNTIES_URL") {
            self.counties_url = Some(v);
        }
        if let Some(v) = get("FETCH_TIMEOUT_SECS") {
            self.fetch_timeout_secs = v
                .trim()
                .parse()
                .with_context(|| format!("FETCH_TIMEOUT_SECS={v:?} is not a number of seconds"))?;
        }
        Ok(())
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.fetch_timeout_secs),
        }
    }
}
