//! Server config loader (strict parsing).

pub mod schema;

use std::fs;

use metricsx_core::error::{MetricsError, Result};

pub use schema::{MetricsSection, MetricsxConfig, ServerSection};

/// Env var overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "METRICSX_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "metricsx.yaml";

pub fn load_from_file(path: &str) -> Result<MetricsxConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricsError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<MetricsxConfig> {
    let cfg: MetricsxConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Config path from `METRICSX_CONFIG`, falling back to `metricsx.yaml`.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}
