//! Server config loader (strict parsing).
//!
//! Sources, in order: the YAML file named by `ECOMPULSE_CONFIG` (or
//! `ecompulse.yaml` when present), then the `PORT` environment override.

pub mod schema;

use std::fs;
use std::path::Path;

use ecompulse_core::error::{EcomPulseError, Result};

pub use schema::{AppConfig, GeneratorSection, ServerSection};

pub const CONFIG_PATH_ENV: &str = "ECOMPULSE_CONFIG";
pub const PORT_ENV: &str = "PORT";
pub const DEFAULT_CONFIG_PATH: &str = "ecompulse.yaml";

pub fn load() -> Result<AppConfig> {
    let mut cfg = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => load_from_file(&path)?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH)?,
        Err(_) => AppConfig::default(),
    };

    if let Ok(port) = std::env::var(PORT_ENV) {
        cfg.server.override_port(&port)?;
    }
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| EcomPulseError::Config(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AppConfig> {
    let cfg: AppConfig = serde_yaml::from_str(s)
        .map_err(|e| EcomPulseError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
