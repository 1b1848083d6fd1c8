// src/core/launcher.rs

//! Turns an app configuration plus the editor's state into a running process.
//!
//! One launch goes through these stages, with no state kept between launches:
//!
//! 1. **Activation:** ask the host to bring the app forward. Failures are only
//!    logged.
//! 2. **Anchors:** compute the roots the command needs ([`AnchorPlan`]) and
//!    resolve `{project}`, falling back to other roots if no project is open.
//! 3. **Substitution:** fill the command template from the [`Variables`].
//! 4. **Spawn:** start the process with an expanded copy of the environment
//!    and return without waiting for it.
//!
//! Any error is reported through [`EditorHost::report_error`] and returned.

use crate::{
    constants::LOG_PREFIX,
    core::{
        anchors::{self, AnchorError, AnchorPlan, ResolvedAnchors},
        host::{EditorHost, HostError},
        interpolator::{Interpolator, TemplateError},
    },
    models::{AppConfig, EditorState, Markers, Variables},
    system::executor::{self, Environment, ExecutionError, Spawner},
};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error(transparent)]
    Project(#[from] AnchorError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    #[error(transparent)]
    Host(#[from] HostError),
}

/// A fully substituted command, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedLaunch {
    pub argv: Vec<String>,
    pub variables: Variables,
    pub anchors: ResolvedAnchors,
}

/// What was started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    pub argv: Vec<String>,
    pub pid: u32,
}

/// Builds and launches commands on behalf of a host editor.
#[derive(Debug)]
pub struct Launcher<'a, H: ?Sized, S: ?Sized> {
    host: &'a H,
    spawner: &'a S,
    markers: &'a Markers,
    /// Variables handed to the child before expansion. `None` uses this process's.
    base_env: Option<Environment>,
}

impl<'a, H, S> Launcher<'a, H, S>
where
    H: EditorHost + ?Sized,
    S: Spawner + ?Sized,
{
    pub fn new(host: &'a H, spawner: &'a S, markers: &'a Markers) -> Self {
        Self {
            host,
            spawner,
            markers,
            base_env: None,
        }
    }

    /// Starts children from `vars` instead of this process's environment.
    pub fn with_base_environment(mut self, vars: Environment) -> Self {
        self.base_env = Some(vars);
        self
    }

    /// Opens the host's active file with `app`.
    pub fn launch(&self, app: &AppConfig) -> Result<LaunchReport, LaunchError> {
        self.try_launch(app).inspect_err(|e| {
            log::debug!("Launch of '{}' failed: {:?}", app.name, e);
            self.host.report_error(&e.to_string());
        })
    }

    fn try_launch(&self, app: &AppConfig) -> Result<LaunchReport, LaunchError> {
        let state = self.host.active_editor_state()?;

        if let Err(e) = self.host.activate_application(&app.name) {
            log::debug!("Activation failed: {}", e);
            if app.debug {
                eprintln!("{} activation failed: {}", LOG_PREFIX, e);
            }
        }

        let prepared = self.prepare(app, &state)?;
        let env = match &self.base_env {
            Some(vars) => executor::expand_environment(vars.clone()),
            None => executor::prepare_environment(),
        };
        let pid = self.spawner.spawn_detached(&prepared.argv, &env)?;

        Ok(LaunchReport {
            argv: prepared.argv,
            pid,
        })
    }

    /// Resolves anchors and substitutes the command without starting anything.
    pub fn prepare(
        &self,
        app: &AppConfig,
        state: &EditorState,
    ) -> Result<PreparedLaunch, LaunchError> {
        let directory = state.file.parent().unwrap_or_else(|| Path::new(""));

        let plan = AnchorPlan::for_app(app);
        log::debug!("Anchor plan for '{}': {:?}", app.name, plan);
        let anchors =
            anchors::resolve_anchors(app, &plan, directory, self.markers, self.host)?;

        if app.debug
            && let (Some(kind), Some(dir)) =
                (anchors.fallback_used, anchors.project.as_deref())
        {
            eprintln!(
                "{} fallback: {} used {}",
                LOG_PREFIX,
                kind,
                display_path(dir)
            );
        }

        let as_text = |dir: Option<&Path>| dir.map(display_path).unwrap_or_default();
        let variables = Variables {
            line: state.row + 1,
            column: state.col + 1,
            filename: display_path(&state.file),
            directory: display_path(directory),
            project: as_text(anchors.project.as_deref()),
            any_project: as_text(anchors.any_project.as_deref()),
            package: as_text(anchors.package.as_deref()),
            git: as_text(anchors.git.as_deref()),
        };

        log::debug!("Resolved variables: {:?}", variables);
        if app.debug {
            let dump = serde_json::to_string_pretty(&variables)
                .unwrap_or_else(|_| format!("{variables:#?}"));
            eprintln!("{} resolved variables:\n{}", LOG_PREFIX, dump);
        }

        let argv = Interpolator::new(&variables).expand_command(&app.command)?;
        if argv.is_empty() {
            return Err(ExecutionError::EmptyCommand.into());
        }

        Ok(PreparedLaunch {
            argv,
            variables,
            anchors,
        })
    }
}

/// Always hand out clean paths (no `\\?\` prefixes on Windows).
fn display_path(path: &Path) -> String {
    dunce::simplified(path).to_string_lossy().to_string()
}
