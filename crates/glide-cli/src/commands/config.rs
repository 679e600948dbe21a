use anyhow::{Context, Result};
use tracing::info;

use glide_core::AppConfig;

pub fn show(config: &AppConfig) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to render configuration")?;
    println!("{}", content);
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() && !force {
        println!("Configuration already exists at {}", path.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    AppConfig::default().save()?;
    info!(path = %path.display(), "Wrote default configuration");
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}
