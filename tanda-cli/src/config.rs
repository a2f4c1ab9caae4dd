use anyhow::Context;
use std::path::{Path, PathBuf};
use tanda_core::TandaConfig;

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tanda")
        .join("config.json")
}

/// Explicit `--config`, else the per-user config file if present, else defaults.
pub async fn load_config(explicit: Option<&Path>) -> anyhow::Result<TandaConfig> {
    if let Some(path) = explicit {
        return TandaConfig::load(path)
            .await
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let path = default_config_path();
    if path.exists() {
        tracing::debug!("Using config file {}", path.display());
        return Ok(TandaConfig::load(&path).await?);
    }

    Ok(TandaConfig::default())
}
