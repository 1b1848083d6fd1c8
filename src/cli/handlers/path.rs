// src/cli/handlers/path.rs

use anyhow::Result;
use clap::Parser;
use std::{env, path::PathBuf};

use crate::core::{config_loader, paths};

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Shows which settings file is in use.")]
struct PathArgs {
    /// Directory whose local settings should apply. Defaults to the current directory.
    dir: Option<PathBuf>,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let path_args = PathArgs::try_parse_from(&args)?;
    let dir = match path_args.dir {
        Some(dir) => dir,
        None => env::current_dir()?,
    };

    println!("global: {}", paths::get_settings_path()?.display());
    println!(
        "active: {}",
        config_loader::locate_settings(None, Some(dir.as_path()))?
    );
    Ok(())
}
