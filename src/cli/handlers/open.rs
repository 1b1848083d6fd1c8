// src/cli/handlers/open.rs

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use colored::*;
use std::path::PathBuf;

use super::commons;
use crate::{
    cli::host::CliHost,
    core::{config_loader, host::EditorHost, launcher::Launcher},
    models::{AppConfig, EditorState},
    system::executor::SystemSpawner,
};

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Opens a file with a configured app.")]
struct OpenArgs {
    /// The file to open.
    file: PathBuf,

    /// The app to use, by position or name. Prompts when omitted.
    #[arg(conflicts_with = "command")]
    app: Option<String>,

    /// 1-based cursor line.
    #[arg(long, short, default_value_t = 1)]
    line: usize,

    /// 1-based cursor column.
    #[arg(long, short, default_value_t = 1)]
    column: usize,

    /// The project file currently open in the editor.
    #[arg(long, short)]
    project: Option<PathBuf>,

    /// Settings file to use.
    #[arg(long)]
    config: Option<String>,

    /// Ad-hoc command template, e.g. "code -g {filename}:{line}".
    #[arg(long)]
    command: Option<String>,

    /// Display name for an ad-hoc command (also the app to activate).
    #[arg(long, requires = "command")]
    name: Option<String>,

    /// Print the resolved variables before launching.
    #[arg(long)]
    debug: bool,

    /// Print the final command instead of running it.
    #[arg(long)]
    dry_run: bool,
}

/// Builds an app from `--command`, split like a shell would.
fn ad_hoc_app(template: &str, name: Option<String>) -> Result<AppConfig> {
    let command = shlex::split(template)
        .ok_or_else(|| anyhow!("Command could not be parsed: {}", template))?;
    let program = command
        .first()
        .ok_or_else(|| anyhow!("No command specified to run."))?;

    Ok(AppConfig {
        name: name.unwrap_or_else(|| program.clone()),
        command,
        debug: false,
        disabled_fallbacks: Vec::new(),
    })
}

/// Pins a `--project` path to an absolute one so its directory is usable.
/// A path that cannot be resolved is kept and reported missing by the host.
fn resolve_project_arg(project: Option<PathBuf>) -> Option<PathBuf> {
    project.map(|path| match dunce::canonicalize(&path) {
        Ok(absolute) => absolute,
        Err(e) => {
            log::debug!("Could not resolve project '{}': {}", path.display(), e);
            path
        }
    })
}

/// The main handler for the `open` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    // 1. Parse arguments and pin down the file.
    let open_args = OpenArgs::try_parse_from(&args)?;
    let file = dunce::canonicalize(&open_args.file)
        .with_context(|| format!("Cannot open '{}'", open_args.file.display()))?;

    // 2. Load the settings that apply to this file.
    let (settings, source) =
        commons::load_settings(open_args.config.as_deref(), file.parent())?;
    log::debug!("Loaded {} app(s) from {}", settings.open_with.len(), source);

    // 3. Decide which app to use.
    let mut app = match (&open_args.command, &open_args.app) {
        (Some(template), _) => ad_hoc_app(template, open_args.name.clone())?,
        (None, Some(selector)) => {
            config_loader::select_app(&settings.open_with, selector)?.clone()
        }
        (None, None) => commons::prompt_app(&settings.open_with)?.clone(),
    };
    app.debug |= open_args.debug;

    // 4. Build the host view of the "editor".
    let state = EditorState {
        file,
        row: open_args.line.saturating_sub(1),
        col: open_args.column.saturating_sub(1),
    };
    let host = CliHost::new(state.clone(), resolve_project_arg(open_args.project));
    let launcher = Launcher::new(&host, &SystemSpawner, &settings.markers);

    // 5. Launch, or just show what would be launched.
    if open_args.dry_run {
        let prepared = launcher
            .prepare(&app, &state)
            .inspect_err(|e| host.report_error(&e.to_string()))?;
        println!("{}", display_command(&prepared.argv));
        return Ok(());
    }

    let report = launcher.launch(&app)?;
    println!("\n> {}", display_command(&report.argv).green());
    log::debug!("'{}' started with PID {}", app.name, report.pid);

    Ok(())
}

/// Quotes the argv so it can be pasted back into a shell.
fn display_command(argv: &[String]) -> String {
    shlex::try_join(argv.iter().map(String::as_str))
        .unwrap_or_else(|_| argv.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_ad_hoc_app_splits_like_a_shell() {
        let app = ad_hoc_app("subl '{project}' \"{filename}:{line}\"", None).unwrap();
        assert_eq!(app.name, "subl");
        assert_eq!(app.command, vec!["subl", "{project}", "{filename}:{line}"]);
    }

    #[test]
    fn test_ad_hoc_app_uses_given_name() {
        let app =
            ad_hoc_app("open -a Typora {filename}", Some("Typora".to_string())).unwrap();
        assert_eq!(app.name, "Typora");
    }

    #[test]
    fn test_ad_hoc_app_rejects_empty_or_unbalanced_commands() {
        assert!(ad_hoc_app("", None).is_err());
        assert!(ad_hoc_app("code 'unterminated", None).is_err());
    }

    #[test]
    fn test_open_args_defaults_to_first_line_and_column() {
        let args = OpenArgs::try_parse_from(["notes.md", "Vim"]).unwrap();
        assert_eq!(args.line, 1);
        assert_eq!(args.column, 1);
        assert_eq!(args.app.as_deref(), Some("Vim"));
        assert!(!args.dry_run);
    }

    #[test]
    fn test_display_command_quotes_spaces() {
        let argv = vec!["code".to_string(), "/my repo/a.py".to_string()];
        let shown = display_command(&argv);
        assert!(shown.starts_with("code "));
        assert_eq!(shlex::split(&shown).unwrap(), argv);
    }

    #[test]
    fn test_relative_project_is_made_absolute() {
        // Tests run from the package root, where the manifest lives.
        let resolved = resolve_project_arg(Some(PathBuf::from("Cargo.toml"))).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("Cargo.toml"));
        assert!(resolved.parent().is_some_and(|dir| dir != Path::new("")));
    }

    #[test]
    fn test_missing_project_is_kept_as_given() {
        let missing = PathBuf::from("no-such-dir/site.sublime-project");
        assert_eq!(resolve_project_arg(Some(missing.clone())), Some(missing));
        assert_eq!(resolve_project_arg(None), None);
    }
}
