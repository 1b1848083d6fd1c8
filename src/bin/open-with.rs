// src/bin/open-with.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use open_with::{
    cli::{Cli, handlers},
    core::launcher::LaunchError,
};

// --- Command Definition and Registry ---

/// Defines a command, its aliases, and its handler function.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
}

/// The single source of truth for all commands.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "init",
        aliases: &[],
        handler: handlers::init::handle,
    },
    CommandDefinition {
        name: "list",
        aliases: &["ls"],
        handler: handlers::list::handle,
    },
    CommandDefinition {
        name: "open",
        aliases: &["o"],
        handler: handlers::open::handle,
    },
    CommandDefinition {
        name: "path",
        aliases: &[],
        handler: handlers::path::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Sets up logging, dispatches to the right handler and reports errors.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        // Launch errors have already been shown through the host.
        if e.downcast_ref::<LaunchError>().is_some() {
            std::process::exit(1);
        }

        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Routes `open-with <command> [args...]`, treating anything that is not a
/// known command as the file argument of `open`.
fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let mut args = cli.args.into_iter();
    let Some(first) = args.next() else {
        return handlers::list::handle(Vec::new());
    };

    match find_command(&first) {
        Some(command) => (command.handler)(args.collect()),
        None => {
            let mut open_args = vec![first];
            open_args.extend(args);
            handlers::open::handle(open_args)
        }
    }
}
