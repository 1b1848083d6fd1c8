// src/core/root_resolver.rs

//! Upward search for the directory that holds a marker file or directory.
//!
//! Every search re-reads the filesystem. Project files come and go between
//! invocations, so nothing here is cached.

use crate::{constants::MAX_ASCENT_DEPTH, models::Markers};
use std::fs;
use std::path::{Path, PathBuf};

/// A test applied to each directory on the way up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker<'a> {
    /// The directory contains an entry with exactly this name.
    Entry(&'a str),
    /// The directory contains an entry whose name ends with this suffix.
    Suffix(&'a str),
}

impl Marker<'_> {
    /// Checks a single directory. Unreadable directories never match.
    pub fn matches(&self, dir: &Path) -> bool {
        match self {
            Marker::Entry(name) => dir.join(name).exists(),
            Marker::Suffix(suffix) => match fs::read_dir(dir) {
                Ok(entries) => entries
                    .filter_map(|entry| entry.ok())
                    .any(|entry| entry.file_name().to_string_lossy().ends_with(suffix)),
                Err(e) => {
                    log::trace!("Cannot list '{}': {}", dir.display(), e);
                    false
                }
            },
        }
    }
}

/// Walks from `start` towards the filesystem root and returns the first
/// directory satisfying `marker`, or `None` once the root has been checked.
pub fn find_root(start: &Path, marker: &Marker<'_>) -> Option<PathBuf> {
    let mut current = start;

    for _ in 0..MAX_ASCENT_DEPTH {
        if marker.matches(current) {
            log::debug!("Found {:?} at '{}'", marker, current.display());
            return Some(current.to_path_buf());
        }

        match current.parent() {
            Some(parent) if parent != current && !parent.as_os_str().is_empty() => {
                current = parent;
            }
            _ => return None,
        }
    }

    log::warn!(
        "Stopped searching for {:?} after {} levels above '{}'.",
        marker,
        MAX_ASCENT_DEPTH,
        start.display()
    );
    None
}

/// Nearest directory containing an editor project file.
pub fn find_any_project_root(start: &Path, markers: &Markers) -> Option<PathBuf> {
    find_root(start, &Marker::Suffix(&markers.project_suffix))
}

/// Nearest directory containing the package manifest.
pub fn find_package_root(start: &Path, markers: &Markers) -> Option<PathBuf> {
    find_root(start, &Marker::Entry(&markers.package_manifest))
}

/// Nearest directory containing the version-control marker.
pub fn find_git_root(start: &Path, markers: &Markers) -> Option<PathBuf> {
    find_root(start, &Marker::Entry(&markers.vcs))
}
