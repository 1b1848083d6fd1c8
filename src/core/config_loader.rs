//! # Config Loader
//!
//! Finds, parses and validates the settings that list the available apps, and
//! selects one app by position or name.
//!
//! Settings are looked up in this order, and the first one found is used as a whole:
//!
//! 1. An explicit path given by the caller.
//! 2. The nearest `.open-with.toml` above the file being opened.
//! 3. The global `settings.toml` in the config directory.
//! 4. Built-in empty settings.
use crate::{
    constants::LOCAL_SETTINGS_FILENAME,
    core::{
        paths::{self, PathError},
        root_resolver::{self, Marker},
    },
    models::{AppConfig, Settings},
};
use std::{
    collections::HashSet,
    fmt, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("App name '{0}' is used more than once. Names must be unique.")]
    DuplicateName(String),
    #[error("App '{0}' has an empty command.")]
    EmptyCommand(String),
    #[error("No app matches '{0}'.")]
    AppNotFound(String),
    #[error("No apps are configured. Run `open-with init` to create a settings file.")]
    NoApps,
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Where the settings in use came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    Explicit(PathBuf),
    Local(PathBuf),
    Global(PathBuf),
    BuiltIn,
}

impl fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) | Self::Local(p) | Self::Global(p) => write!(f, "{}", p.display()),
            Self::BuiltIn => f.write_str("<built-in>"),
        }
    }
}

/// Finds which settings file applies, without reading it.
pub fn locate_settings(
    explicit: Option<&Path>,
    file_dir: Option<&Path>,
) -> Result<SettingsSource, ConfigError> {
    if let Some(path) = explicit {
        return Ok(SettingsSource::Explicit(path.to_path_buf()));
    }

    if let Some(dir) = file_dir
        && let Some(root) = root_resolver::find_root(dir, &Marker::Entry(LOCAL_SETTINGS_FILENAME))
    {
        return Ok(SettingsSource::Local(root.join(LOCAL_SETTINGS_FILENAME)));
    }

    match paths::get_settings_path() {
        Ok(global) if global.is_file() => Ok(SettingsSource::Global(global)),
        Ok(_) => Ok(SettingsSource::BuiltIn),
        Err(e) => {
            log::debug!("No global settings location: {}", e);
            Ok(SettingsSource::BuiltIn)
        }
    }
}

/// Locates and loads the settings that apply to a file in `file_dir`.
pub fn load(
    explicit: Option<&Path>,
    file_dir: Option<&Path>,
) -> Result<(Settings, SettingsSource), ConfigError> {
    let source = locate_settings(explicit, file_dir)?;
    log::debug!("Using settings from {}", source);

    let settings = match &source {
        SettingsSource::Explicit(p) | SettingsSource::Local(p) | SettingsSource::Global(p) => {
            load_settings_file(p)?
        }
        SettingsSource::BuiltIn => Settings::default(),
    };
    Ok((settings, source))
}

/// Reads, parses and validates one settings file.
pub fn load_settings_file(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let settings: Settings = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;
    validate(&settings)?;
    Ok(settings)
}

/// Rejects settings the launcher could not use unambiguously.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for app in &settings.open_with {
        if !seen.insert(app.name.as_str()) {
            return Err(ConfigError::DuplicateName(app.name.clone()));
        }
        if app.command.is_empty() {
            return Err(ConfigError::EmptyCommand(app.name.clone()));
        }
    }
    Ok(())
}

/// Picks an app by position or by name. A selector that is a valid position
/// wins over an app that happens to be named like a number.
pub fn select_app<'s>(apps: &'s [AppConfig], selector: &str) -> Result<&'s AppConfig, ConfigError> {
    if apps.is_empty() {
        return Err(ConfigError::NoApps);
    }

    let by_index = selector
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|i| apps.get(i));

    by_index
        .or_else(|| apps.iter().find(|app| app.name == selector))
        .ok_or_else(|| ConfigError::AppNotFound(selector.to_string()))
}

/// Writes the sample settings to `path`, creating parent directories.
pub fn write_default_settings(path: &Path) -> Result<(), ConfigError> {
    let io_err = |e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let content = toml::to_string_pretty(&Settings::new())?;
    fs::write(path, content).map_err(io_err)
}
