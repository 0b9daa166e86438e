use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use smokelink_core::DecoderConfig;

/// Contents of a `smokelink.toml` file; every key is optional.
///
/// ```toml
/// log_level = "debug"
///
/// [decoder]
/// length_policy = "strict"
/// timestamp_style = "iso8601"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub log_level: Option<String>,
    pub decoder: DecoderConfig,
}

pub fn load_config(path: &Path) -> Result<CliConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn parse_config(content: &str) -> Result<CliConfig> {
    Ok(toml::from_str(content)?)
}
