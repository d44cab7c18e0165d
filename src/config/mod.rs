// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a file (YAML or JSON)
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<SmokeConfig> {
    let config = read_config(path.as_ref()).await?;
    config.validate()?;
    Ok(config)
}

/// Resolve the effective configuration: defaults, then the optional file,
/// then `overrides`.
pub async fn resolve_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<SmokeConfig> {
    let mut config = match path {
        Some(path) => read_config(path).await?,
        None => SmokeConfig::default(),
    };

    config.apply(overrides);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn read_config(path: &Path) -> Result<SmokeConfig> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(path, &contents)
}

fn parse_config(path: &Path, contents: &str) -> Result<SmokeConfig> {
    let is_yaml = matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    );

    let config: SmokeConfig = if is_yaml {
        serde_yaml::from_str(contents).context("Failed to parse YAML config")?
    } else {
        serde_json::from_str(contents).context("Failed to parse JSON config")?
    };
    Ok(config)
}
