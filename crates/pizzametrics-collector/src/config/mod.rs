//! Collector config loader (strict parsing).
//!
//! Order of application: YAML file, then `PIZZAMETRICS_*` environment
//! overrides, then `validate()`.

pub mod schema;

use std::fs;

use pizzametrics_core::error::{PizzaMetricsError, Result};

pub use schema::{CollectorConfig, MetricsSection, ServerSection};

/// Environment variable naming the config file for the binary.
pub const CONFIG_PATH_ENV: &str = "PIZZAMETRICS_CONFIG";
/// Config path used when `PIZZAMETRICS_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "pizzametrics.yaml";

pub fn load_from_file(path: &str) -> Result<CollectorConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PizzaMetricsError::Config(format!("read config failed ({path}): {e}")))?;
    load_with_overrides(&s, |k| std::env::var(k).ok())
}

/// Parse and validate without consulting the environment.
pub fn load_from_str(s: &str) -> Result<CollectorConfig> {
    load_with_overrides(s, |_| None)
}

/// Parse, apply overrides from `lookup`, then validate.
pub fn load_with_overrides<F>(s: &str, lookup: F) -> Result<CollectorConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg: CollectorConfig = serde_yaml::from_str(s)
        .map_err(|e| PizzaMetricsError::Config(format!("invalid yaml: {e}")))?;
    cfg.metrics.apply_overrides(lookup)?;
    cfg.validate()?;
    Ok(cfg)
}
