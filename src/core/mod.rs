// src/core/mod.rs

pub mod anchors;
pub mod config_loader;
pub mod host;
pub mod interpolator;
pub mod launcher;
pub mod paths;
pub mod root_resolver;
