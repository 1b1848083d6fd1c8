// src/models.rs

use crate::constants::{PACKAGE_MANIFEST, PROJECT_MARKER_SUFFIX, VCS_MARKER};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// --- SETTINGS MODELS (What is read from settings.toml) ---

/// A fallback that may stand in for `{project}` when no project is open.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FallbackKind {
    /// Nearest directory containing an editor project file.
    AnyProject,
    /// Nearest directory containing a package manifest.
    Package,
    /// Nearest directory containing a version-control marker.
    Git,
}

impl FallbackKind {
    /// The order in which fallbacks are tried for `{project}`. First enabled hit wins.
    pub const PRIORITY: [Self; 3] = [Self::AnyProject, Self::Package, Self::Git];

    /// The anchor this fallback resolves to.
    pub fn anchor(self) -> AnchorKind {
        match self {
            Self::AnyProject => AnchorKind::AnyProject,
            Self::Package => AnchorKind::Package,
            Self::Git => AnchorKind::Git,
        }
    }
}

impl fmt::Display for FallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor().key())
    }
}

/// One named external application or editor.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub name: String,
    /// Program and arguments; every token may contain `{variable}` placeholders.
    pub command: Vec<String>,
    #[serde(default)]
    pub debug: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_fallbacks: Vec<FallbackKind>,
}

impl AppConfig {
    /// Whether `kind` may be used to satisfy `{project}`.
    pub fn fallback_enabled(&self, kind: FallbackKind) -> bool {
        !self.disabled_fallbacks.contains(&kind)
    }

    /// The command template joined into one string, used for placeholder detection.
    pub fn joined_command(&self) -> String {
        self.command.concat()
    }
}

/// The filesystem entries that identify each kind of root.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Markers {
    pub project_suffix: String,
    pub package_manifest: String,
    pub vcs: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            project_suffix: PROJECT_MARKER_SUFFIX.to_string(),
            package_manifest: PACKAGE_MANIFEST.to_string(),
            vcs: VCS_MARKER.to_string(),
        }
    }
}

/// Represents the deserialized structure of a settings file.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub markers: Markers,
    #[serde(default)]
    pub open_with: Vec<AppConfig>,
}

impl Settings {
    /// Creates the sample settings written by `open-with init`.
    pub fn new() -> Self {
        let mut open_with = vec![
            AppConfig {
                name: "VS Code".to_string(),
                command: vec![
                    "code".to_string(),
                    "-g".to_string(),
                    "{filename}:{line}:{column}".to_string(),
                ],
                debug: false,
                disabled_fallbacks: Vec::new(),
            },
            AppConfig {
                name: "VS Code (project)".to_string(),
                command: vec![
                    "code".to_string(),
                    "{project}".to_string(),
                    "-g".to_string(),
                    "{filename}:{line}:{column}".to_string(),
                ],
                debug: false,
                disabled_fallbacks: Vec::new(),
            },
        ];

        // --- OS-Specific File Explorer ---
        let explorer = if cfg!(target_os = "windows") {
            vec!["explorer".to_string(), "{directory}".to_string()]
        } else if cfg!(target_os = "macos") {
            vec!["open".to_string(), "{directory}".to_string()]
        } else {
            vec!["xdg-open".to_string(), "{directory}".to_string()]
        };
        open_with.push(AppConfig {
            name: "File Manager".to_string(),
            command: explorer,
            debug: false,
            disabled_fallbacks: Vec::new(),
        });

        Self {
            markers: Markers::default(),
            open_with,
        }
    }
}

// --- RUNTIME MODELS ---

/// Every kind of contextual root directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    Project,
    AnyProject,
    Package,
    Git,
}

impl AnchorKind {
    /// All anchors, in the order they appear in the variable mapping.
    pub const ALL: [Self; 4] = [Self::Project, Self::AnyProject, Self::Package, Self::Git];

    /// The template variable name of this anchor.
    pub fn key(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::AnyProject => "any_project",
            Self::Package => "package",
            Self::Git => "git",
        }
    }

    /// The literal placeholder, e.g. `{git}`.
    pub fn placeholder(self) -> String {
        format!("{{{}}}", self.key())
    }

    /// The fallback kind backing this anchor, if any. `project` has none.
    pub fn fallback(self) -> Option<FallbackKind> {
        match self {
            Self::Project => None,
            Self::AnyProject => Some(FallbackKind::AnyProject),
            Self::Package => Some(FallbackKind::Package),
            Self::Git => Some(FallbackKind::Git),
        }
    }
}

/// What the host editor knows about the active view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    /// Absolute path of the file in the active view.
    pub file: PathBuf,
    /// Zero-based cursor row.
    pub row: usize,
    /// Zero-based cursor column.
    pub col: usize,
}

/// A single substitutable value.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum VariableValue {
    Number(usize),
    Text(String),
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// The fixed set of template variables, assembled once per launch.
/// Anchors that were not requested or not found are empty strings.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Variables {
    pub line: usize,
    pub column: usize,
    pub filename: String,
    pub directory: String,
    pub project: String,
    pub any_project: String,
    pub package: String,
    pub git: String,
}

impl Variables {
    /// Names accepted inside `{...}` placeholders.
    pub const KEYS: [&'static str; 8] = [
        "line",
        "column",
        "filename",
        "directory",
        "project",
        "any_project",
        "package",
        "git",
    ];

    /// Looks up a variable by name. `None` means the name is not a known variable.
    pub fn get(&self, key: &str) -> Option<VariableValue> {
        let value = match key {
            "line" => VariableValue::Number(self.line),
            "column" => VariableValue::Number(self.column),
            "filename" => VariableValue::Text(self.filename.clone()),
            "directory" => VariableValue::Text(self.directory.clone()),
            "project" => VariableValue::Text(self.project.clone()),
            "any_project" => VariableValue::Text(self.any_project.clone()),
            "package" => VariableValue::Text(self.package.clone()),
            "git" => VariableValue::Text(self.git.clone()),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_parses_with_defaults() {
        let app: AppConfig = toml::from_str(
            r#"
            name = "Vim"
            command = ["gvim", "+{line}", "{filename}"]
            "#,
        )
        .unwrap();
        assert!(!app.debug);
        assert!(app.disabled_fallbacks.is_empty());
        assert!(app.fallback_enabled(FallbackKind::Git));
    }

    #[test]
    fn test_disabled_fallbacks_use_snake_case_names() {
        let app: AppConfig = toml::from_str(
            r#"
            name = "Tower"
            command = ["gittower", "{git}"]
            disabled_fallbacks = ["any_project", "git"]
            "#,
        )
        .unwrap();
        assert!(!app.fallback_enabled(FallbackKind::AnyProject));
        assert!(app.fallback_enabled(FallbackKind::Package));
        assert!(!app.fallback_enabled(FallbackKind::Git));
    }

    #[test]
    fn test_unknown_fallback_kind_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
            name = "X"
            command = ["x"]
            disabled_fallbacks = ["svn"]
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_variables_lookup_is_limited_to_known_keys() {
        let vars = Variables {
            line: 5,
            column: 10,
            filename: "/repo/src/a.py".to_string(),
            directory: "/repo/src".to_string(),
            project: String::new(),
            any_project: String::new(),
            package: String::new(),
            git: "/repo".to_string(),
        };
        for key in Variables::KEYS {
            assert!(vars.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(vars.get("line").unwrap().to_string(), "5");
        assert_eq!(vars.get("git").unwrap().to_string(), "/repo");
        assert!(vars.get("unknown").is_none());
    }

    #[test]
    fn test_fallback_priority_order() {
        assert_eq!(
            FallbackKind::PRIORITY,
            [FallbackKind::AnyProject, FallbackKind::Package, FallbackKind::Git]
        );
        assert_eq!(FallbackKind::AnyProject.to_string(), "any_project");
    }
}
