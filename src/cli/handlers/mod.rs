// src/cli/handlers/mod.rs

// One module per CLI action.

pub mod commons;
pub mod init;
pub mod list;
pub mod open;
pub mod path;
