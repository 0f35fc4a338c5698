//! Application glue behind the CLI subcommands.

pub mod baseline;
pub mod evolve;
pub mod replay;

use anyhow::{Context, Result};
use ophidia_core::config::AppConfig;
use std::path::Path;

/// Reads and validates a TOML config, or returns the defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = AppConfig::from_toml(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    let fingerprint = config
        .fingerprint()
        .with_context(|| format!("fingerprinting config {}", path.display()))?;
    tracing::info!(path = %path.display(), %fingerprint, "Loaded config");
    Ok(config)
}

/// Applies a CLI seed and validates the result.
pub(crate) fn finalize(mut config: AppConfig, seed: Option<u64>) -> Result<AppConfig> {
    if seed.is_some() {
        config.evolution.seed = seed;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[cfg(test)]
pub(crate) fn scratch_dir() -> std::path::PathBuf {
    use rand::Rng;
    let dir = std::env::temp_dir().join(format!(
        "ophidia_app_{}_{:016x}",
        std::process::id(),
        rand::thread_rng().gen::<u64>()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
