// src/system/executor.rs

use std::collections::HashMap;
use std::env;
use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("No command specified to run.")]
    EmptyCommand,
    #[error("Command '{0}' could not be executed: {1}")]
    SpawnFailed(String, std::io::Error),
}

/// Environment for a child process, keyed like `std::env::vars_os`.
pub type Environment = HashMap<OsString, OsString>;

/// Launches a process without waiting for it.
pub trait Spawner {
    /// Starts `argv[0]` with the remaining arguments and exactly `env` as its
    /// environment. Returns the child's process id.
    fn spawn_detached(&self, argv: &[String], env: &Environment) -> Result<u32, ExecutionError>;
}

/// Spawns real operating-system processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSpawner;

impl Spawner for SystemSpawner {
    fn spawn_detached(&self, argv: &[String], env: &Environment) -> Result<u32, ExecutionError> {
        let (program, args) = argv.split_first().ok_or(ExecutionError::EmptyCommand)?;
        if program.trim().is_empty() {
            return Err(ExecutionError::EmptyCommand);
        }

        let command_line = argv.join(" ");
        let mut command = StdCommand::new(program);
        command
            .args(args)
            .env_clear()
            .envs(env)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Editors on Windows are often `.cmd` shims, which only `cmd /C` can resolve.
        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound && cfg!(target_os = "windows") => {
                log::debug!("Command '{}' not found. Retrying with cmd /C.", program);
                StdCommand::new("cmd")
                    .arg("/C")
                    .args(argv)
                    .env_clear()
                    .envs(env)
                    .stdin(Stdio::null())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .spawn()
                    .map_err(|e| ExecutionError::SpawnFailed(command_line.clone(), e))?
            }
            Err(e) => return Err(ExecutionError::SpawnFailed(command_line, e)),
        };

        // The child is intentionally not waited on; dropping the handle detaches it.
        let pid = child.id();
        log::debug!("Spawned '{}' (PID: {})", command_line, pid);
        Ok(pid)
    }
}

/// Copies the current process environment, expanding variable references
/// found inside each value.
pub fn prepare_environment() -> Environment {
    expand_environment(env::vars_os())
}

/// Expands `$VAR` and `${VAR}` references inside every value, looking them up
/// in the same set of variables. Unknown references and non-UTF-8 values are
/// kept as they are.
pub fn expand_environment<I>(vars: I) -> Environment
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let original: Environment = vars.into_iter().collect();
    let lookup = |name: &str| original.get(OsStr::new(name)).and_then(|v| v.to_str());

    original
        .iter()
        .map(|(key, value)| {
            let expanded = match value.to_str() {
                Some(text) if text.contains('$') => {
                    let expanded = shellexpand::env_with_context_no_errors(text, lookup);
                    OsString::from(expanded.into_owned())
                }
                _ => value.clone(),
            };
            (key.clone(), expanded)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> Environment {
        expand_environment(
            pairs
                .iter()
                .map(|(k, v)| (OsString::from(k), OsString::from(v))),
        )
    }

    fn value<'a>(env: &'a Environment, key: &str) -> &'a str {
        env.get(OsStr::new(key)).and_then(|v| v.to_str()).unwrap()
    }

    #[test]
    fn test_expands_references_between_variables() {
        let env = env_of(&[
            ("HOME", "/home/dev"),
            ("TOOLS", "$HOME/tools"),
            ("EDITOR_PATH", "${HOME}/bin:/usr/bin"),
        ]);
        assert_eq!(value(&env, "TOOLS"), "/home/dev/tools");
        assert_eq!(value(&env, "EDITOR_PATH"), "/home/dev/bin:/usr/bin");
        assert_eq!(value(&env, "HOME"), "/home/dev");
    }

    #[test]
    fn test_unknown_references_are_left_verbatim() {
        let env = env_of(&[("PROMPT", "$UNDEFINED_VAR_XYZ> ")]);
        assert_eq!(value(&env, "PROMPT"), "$UNDEFINED_VAR_XYZ> ");
    }

    #[test]
    fn test_plain_values_are_copied() {
        let env = env_of(&[("LANG", "en_US.UTF-8"), ("EMPTY", "")]);
        assert_eq!(env.len(), 2);
        assert_eq!(value(&env, "LANG"), "en_US.UTF-8");
        assert_eq!(value(&env, "EMPTY"), "");
    }

    #[test]
    fn test_empty_argv_is_rejected() {
        let result = SystemSpawner.spawn_detached(&[], &Environment::new());
        assert!(matches!(result, Err(ExecutionError::EmptyCommand)));
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_executable_is_reported() {
        let argv = vec!["definitely-not-a-real-editor-9c1e".to_string()];
        let result = SystemSpawner.spawn_detached(&argv, &prepare_environment());
        assert!(matches!(result, Err(ExecutionError::SpawnFailed(_, _))));
    }
}
