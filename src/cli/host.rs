// src/cli/host.rs

use crate::{
    core::host::{EditorHost, HostError},
    models::EditorState,
    system::{
        activation,
        executor::{self, SystemSpawner},
    },
};
use colored::Colorize;
use std::path::PathBuf;

/// Stands in for the editor when open-with is driven from the command line.
/// The "active view" and "open project" are whatever the arguments say.
#[derive(Debug, Clone)]
pub struct CliHost {
    state: EditorState,
    project_file: Option<PathBuf>,
}

impl CliHost {
    pub fn new(state: EditorState, project_file: Option<PathBuf>) -> Self {
        Self {
            state,
            project_file,
        }
    }
}

impl EditorHost for CliHost {
    fn active_editor_state(&self) -> Result<EditorState, HostError> {
        if !self.state.file.is_file() {
            return Err(HostError::NoActiveFile);
        }
        Ok(self.state.clone())
    }

    fn active_project_file(&self) -> Result<PathBuf, HostError> {
        match &self.project_file {
            Some(path) if path.is_file() => Ok(path.clone()),
            Some(path) => Err(HostError::NoProjectOpen(format!(
                "project file '{}' does not exist",
                path.display()
            ))),
            None => Err(HostError::NoProjectOpen(
                "no --project file was given".to_string(),
            )),
        }
    }

    fn activate_application(&self, name: &str) -> Result<(), HostError> {
        let env = executor::prepare_environment();
        activation::activate(name, &SystemSpawner, &env).map_err(|e| {
            HostError::ActivationFailed {
                name: name.to_string(),
                reason: e.to_string(),
            }
        })
    }

    fn report_error(&self, message: &str) {
        eprintln!("\n{}: {}", "Error".red().bold(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn state() -> EditorState {
        EditorState {
            file: PathBuf::from("/tmp/a.txt"),
            row: 0,
            col: 0,
        }
    }

    #[test]
    fn test_no_project_argument_means_no_project() {
        let host = CliHost::new(state(), None);
        assert!(matches!(
            host.active_project_file(),
            Err(HostError::NoProjectOpen(_))
        ));
    }

    #[test]
    fn test_missing_project_file_means_no_project() {
        let tmp = TempDir::new().unwrap();
        let host = CliHost::new(state(), Some(tmp.path().join("gone.sublime-project")));
        assert!(host.active_project_file().is_err());
    }

    #[test]
    fn test_existing_project_file_is_returned() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("site.sublime-project");
        std::fs::write(&project, "{}").unwrap();
        let host = CliHost::new(state(), Some(project.clone()));
        assert_eq!(host.active_project_file().unwrap(), project);
    }

    #[test]
    fn test_vanished_file_means_no_active_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("notes.md");
        std::fs::write(&file, "# notes").unwrap();
        let host = CliHost::new(
            EditorState {
                file: file.clone(),
                row: 2,
                col: 0,
            },
            None,
        );
        assert_eq!(host.active_editor_state().unwrap().row, 2);

        std::fs::remove_file(&file).unwrap();
        assert!(matches!(
            host.active_editor_state(),
            Err(HostError::NoActiveFile)
        ));
    }
}
