// src/core/paths.rs

use crate::constants::{APP_DIR, SETTINGS_FILENAME};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Failed to expand path '{template}': {reason}")]
    Expansion { template: String, reason: String },
}

/// Returns the path to the open-with configuration directory (`~/.config/open-with`).
/// The directory is not created.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or(PathError::ConfigDirNotFound)
}

/// Returns the path to the global `settings.toml` file.
pub fn get_settings_path() -> Result<PathBuf, PathError> {
    get_config_dir().map(|dir| dir.join(SETTINGS_FILENAME))
}

/// Expands `~` and environment variables (`$VAR`, `${VAR}`) in a user-supplied path.
pub fn expand_path_template(template: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(template).map_err(|e| PathError::Expansion {
        template: template.to_string(),
        reason: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_path_lives_in_app_dir() {
        if let Ok(path) = get_settings_path() {
            assert!(path.ends_with(format!("{APP_DIR}/{SETTINGS_FILENAME}")));
        }
    }

    #[test]
    fn test_plain_paths_are_unchanged() {
        let path = expand_path_template("/etc/open-with/settings.toml").unwrap();
        assert_eq!(path, PathBuf::from("/etc/open-with/settings.toml"));
    }

    #[test]
    fn test_undefined_variable_is_an_error() {
        let result = expand_path_template("$OPEN_WITH_UNDEFINED_VAR/settings.toml");
        assert!(matches!(result, Err(PathError::Expansion { .. })));
    }
}
