// src/core/host.rs

//! The capabilities the launcher borrows from whatever is hosting it.

use crate::models::EditorState;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("No file is open in the active view.")]
    NoActiveFile,
    #[error("No project is open: {0}")]
    NoProjectOpen(String),
    #[error("Could not activate application '{name}': {reason}")]
    ActivationFailed { name: String, reason: String },
}

/// Everything the launcher needs from the host editor.
///
/// The launcher only calls [`EditorHost::active_project_file`] when the command
/// actually references `{project}`.
pub trait EditorHost {
    /// File path and zero-based cursor position of the active view.
    fn active_editor_state(&self) -> Result<EditorState, HostError>;

    /// Path of the project file currently open in the editor.
    fn active_project_file(&self) -> Result<PathBuf, HostError>;

    /// Brings the named application to the foreground. Best effort.
    fn activate_application(&self, name: &str) -> Result<(), HostError>;

    /// Shows an error to the user.
    fn report_error(&self, message: &str);
}
