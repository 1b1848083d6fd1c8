//! Open the current file in an external application or editor.
//!
//! The command to run is a template filled in with the cursor position, the
//! file path and the roots of the enclosing project, package and repository.

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
