// src/cli/handlers/list.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::{env, path::PathBuf};

use super::commons;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Lists the configured apps.")]
struct ListArgs {
    /// Directory whose local settings should apply. Defaults to the current directory.
    dir: Option<PathBuf>,

    /// Settings file to use.
    #[arg(long)]
    config: Option<String>,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let list_args = ListArgs::try_parse_from(&args)?;
    let dir = match list_args.dir {
        Some(dir) => dir,
        None => env::current_dir()?,
    };

    let (settings, source) =
        commons::load_settings(list_args.config.as_deref(), Some(dir.as_path()))?;
    println!("{}", format!("Settings: {source}").dimmed());

    if settings.open_with.is_empty() {
        println!(
            "{}",
            "No apps configured. Run `open-with init` to create some.".yellow()
        );
        return Ok(());
    }

    for (i, app) in settings.open_with.iter().enumerate() {
        println!(
            "  {:>2}. {}  {}",
            i,
            app.name.cyan().bold(),
            app.command.join(" ").dimmed()
        );
    }
    Ok(())
}
