// src/cli/handlers/init.rs

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::core::{config_loader, paths};

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Writes a sample settings file.")]
struct InitArgs {
    /// Where to write the file. Defaults to the global settings path.
    #[arg(long)]
    config: Option<String>,

    /// Overwrite an existing file.
    #[arg(long, short)]
    force: bool,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let init_args = InitArgs::try_parse_from(&args)?;
    let target = match commons::resolve_config_arg(init_args.config.as_deref())? {
        Some(path) => path,
        None => paths::get_settings_path()?,
    };

    if target.exists() && !init_args.force {
        return Err(anyhow!(
            "Settings file '{}' already exists. Use --force to overwrite it.",
            target.display()
        ));
    }

    config_loader::write_default_settings(&target)?;
    println!(
        "{} {}",
        "Wrote sample settings to".green(),
        target.display().to_string().cyan()
    );
    Ok(())
}
