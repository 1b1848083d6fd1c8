// src/core/anchors.rs

use crate::{
    core::{
        host::{EditorHost, HostError},
        root_resolver,
    },
    models::{AnchorKind, AppConfig, FallbackKind, Markers},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnchorError {
    #[error(
        "Could not find your project file.\n\
         Please open a project first to enable the {{project}} variable. ({reason})"
    )]
    NoProjectOpen { reason: String },
}

/// Which anchors an app needs computed for one launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorPlan {
    pub project: bool,
    pub any_project: bool,
    pub package: bool,
    pub git: bool,
}

impl AnchorPlan {
    /// A fallback anchor is computed when its placeholder appears in the command
    /// or when the fallback is enabled, since it may be needed for `{project}`.
    /// `{project}` itself is only resolved when referenced.
    pub fn for_app(app: &AppConfig) -> Self {
        let joined = app.joined_command();
        let needs = |kind: AnchorKind| {
            let referenced = references(&joined, kind);
            match kind.fallback() {
                Some(fallback) => referenced || app.fallback_enabled(fallback),
                None => referenced,
            }
        };

        Self {
            project: needs(AnchorKind::Project),
            any_project: needs(AnchorKind::AnyProject),
            package: needs(AnchorKind::Package),
            git: needs(AnchorKind::Git),
        }
    }

    pub fn requires(&self, kind: AnchorKind) -> bool {
        match kind {
            AnchorKind::Project => self.project,
            AnchorKind::AnyProject => self.any_project,
            AnchorKind::Package => self.package,
            AnchorKind::Git => self.git,
        }
    }
}

/// Whether the joined command template contains the literal placeholder for `kind`.
pub fn references(joined_command: &str, kind: AnchorKind) -> bool {
    joined_command.contains(&kind.placeholder())
}

/// The directories found for one launch. `None` means not requested or not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAnchors {
    pub project: Option<PathBuf>,
    pub any_project: Option<PathBuf>,
    pub package: Option<PathBuf>,
    pub git: Option<PathBuf>,
    /// Set when `{project}` was satisfied by a fallback instead of the host.
    pub fallback_used: Option<FallbackKind>,
}

impl ResolvedAnchors {
    pub fn get(&self, kind: AnchorKind) -> Option<&Path> {
        match kind {
            AnchorKind::Project => self.project.as_deref(),
            AnchorKind::AnyProject => self.any_project.as_deref(),
            AnchorKind::Package => self.package.as_deref(),
            AnchorKind::Git => self.git.as_deref(),
        }
    }

    fn fallback(&self, kind: FallbackKind) -> Option<&Path> {
        self.get(kind.anchor())
    }
}

fn find_fallback_root(
    kind: FallbackKind,
    directory: &Path,
    markers: &Markers,
) -> Option<PathBuf> {
    match kind {
        FallbackKind::AnyProject => root_resolver::find_any_project_root(directory, markers),
        FallbackKind::Package => root_resolver::find_package_root(directory, markers),
        FallbackKind::Git => root_resolver::find_git_root(directory, markers),
    }
}

/// Computes every anchor the plan asks for, starting from the file's directory.
///
/// `{project}` comes from the host's open project file. If the host has none,
/// the fallbacks are tried in [`FallbackKind::PRIORITY`] order and the first one
/// that is enabled and was found wins.
pub fn resolve_anchors<H: EditorHost + ?Sized>(
    app: &AppConfig,
    plan: &AnchorPlan,
    directory: &Path,
    markers: &Markers,
    host: &H,
) -> Result<ResolvedAnchors, AnchorError> {
    let mut anchors = ResolvedAnchors::default();

    for kind in FallbackKind::PRIORITY {
        if !plan.requires(kind.anchor()) {
            continue;
        }
        let found = find_fallback_root(kind, directory, markers);
        match kind {
            FallbackKind::AnyProject => anchors.any_project = found,
            FallbackKind::Package => anchors.package = found,
            FallbackKind::Git => anchors.git = found,
        }
    }

    if !plan.project {
        return Ok(anchors);
    }

    match host.active_project_file().and_then(project_directory) {
        Ok(project_dir) => {
            log::debug!("Using open project at '{}'", project_dir.display());
            anchors.project = Some(project_dir);
        }
        Err(e) => {
            log::debug!("No project from host ({}). Trying fallbacks.", e);
            let fallback = FallbackKind::PRIORITY.into_iter().find_map(|kind| {
                if !app.fallback_enabled(kind) {
                    return None;
                }
                anchors
                    .fallback(kind)
                    .map(|dir| (kind, dir.to_path_buf()))
            });

            let (kind, dir) = fallback.ok_or_else(|| AnchorError::NoProjectOpen {
                reason: e.to_string(),
            })?;
            log::debug!("Fallback {} used for project: '{}'", kind, dir.display());
            anchors.project = Some(dir);
            anchors.fallback_used = Some(kind);
        }
    }

    Ok(anchors)
}

/// The directory holding the project file. A bare file name has no usable
/// directory and counts as no project.
fn project_directory(project_file: PathBuf) -> Result<PathBuf, HostError> {
    match project_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.to_path_buf()),
        _ => Err(HostError::NoProjectOpen(format!(
            "project file '{}' has no directory",
            project_file.display()
        ))),
    }
}
