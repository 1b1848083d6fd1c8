// src/cli/handlers/commons.rs

// Shared functions used by multiple handlers.

use anyhow::{Context, Result, anyhow};
use dialoguer::{Select, theme::ColorfulTheme};
use std::path::{Path, PathBuf};

use crate::{
    core::{
        config_loader::{self, ConfigError, SettingsSource},
        paths,
    },
    models::{AppConfig, Settings},
};

/// Expands a `--config` argument (`~`, `$VAR`) into a path.
pub fn resolve_config_arg(config: Option<&str>) -> Result<Option<PathBuf>> {
    let path = config.map(paths::expand_path_template).transpose()?;
    Ok(path)
}

/// Loads the settings that apply to files in `file_dir`.
pub fn load_settings(
    config: Option<&str>,
    file_dir: Option<&Path>,
) -> Result<(Settings, SettingsSource)> {
    let explicit = resolve_config_arg(config)?;
    config_loader::load(explicit.as_deref(), file_dir)
        .context("Failed to load settings")
}

/// The quick panel: lets the user pick one of the configured apps.
pub fn prompt_app(apps: &[AppConfig]) -> Result<&AppConfig> {
    if apps.is_empty() {
        return Err(ConfigError::NoApps.into());
    }

    let names: Vec<&str> = apps.iter().map(|app| app.name.as_str()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Open with")
        .items(&names)
        .default(0)
        .interact_opt()?
        .ok_or_else(|| anyhow!("Operation cancelled by user."))?;

    apps.get(selection)
        .ok_or_else(|| anyhow!("Selection {} is out of range.", selection))
}
