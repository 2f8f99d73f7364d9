use std::path::Path;

use anyhow::{Context, Result};
use costwatch_defs::ApiConfig;
use log::info;

pub fn parse_config(raw: &str) -> Result<ApiConfig> {
    let config: ApiConfig =
        serde_yaml::from_str(raw).context("Failed to parse configuration yaml")?;
    Ok(config)
}

/// Reads the yaml config, applies environment overrides and validates the storage section.
pub fn load_config(path: &Path) -> Result<ApiConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let mut config = parse_config(&raw)?;

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    config.storage.elasticsearch.validate()?;
    Ok(config)
}

pub fn apply_env_overrides<F>(config: &mut ApiConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let es = &mut config.storage.elasticsearch;

    if let Some(endpoints) = lookup("COSTWATCH_ES_ENDPOINTS") {
        es.endpoints = endpoints
            .split(',')
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        info!("Using elasticsearch endpoints from COSTWATCH_ES_ENDPOINTS");
    }
    if let Some(username) = lookup("COSTWATCH_ES_USERNAME") {
        es.username = username;
    }
    if let Some(password) = lookup("COSTWATCH_ES_PASSWORD") {
        es.password = password;
    }
    if let Some(index) = lookup("COSTWATCH_ES_INDEX") {
        es.index = index;
    }
    if let Some(port) = lookup("PORT").and_then(|p| p.parse::<u16>().ok()) {
        config.port = port;
    }
}
