// src/constants.rs

/// Suffix of the editor project file that marks an `{any_project}` root.
pub const PROJECT_MARKER_SUFFIX: &str = ".sublime-project";

/// Package manifest that marks a `{package}` root.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Version-control entry that marks a `{git}` root.
pub const VCS_MARKER: &str = ".git";

/// Name of the application directory inside the system config directory.
pub const APP_DIR: &str = "open-with";

/// Name of the global settings file (in ~/.config/open-with/).
pub const SETTINGS_FILENAME: &str = "settings.toml";

/// Name of a directory-local settings override, searched upwards from the file.
pub const LOCAL_SETTINGS_FILENAME: &str = ".open-with.toml";

/// Prefix for every diagnostic line printed when an app has `debug = true`.
pub const LOG_PREFIX: &str = "[open-with]";

/// Upper bound on the number of directories visited by a single root search.
pub const MAX_ASCENT_DEPTH: usize = 4096;
