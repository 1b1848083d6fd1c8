use clap::Parser;

pub mod handlers;
pub mod host;

const HELP_TEMPLATE: &str = "\
<title>open-with</title> {version}
Open the current file in an external application or editor.

<title>USAGE:</title>
  <cmd>open-with</cmd> <hl><FILE></hl> [APP] [OPTIONS]          <dim>shortcut for `open`</dim>
  <cmd>open-with</cmd> <group><COMMAND></group> [ARGS...]

<title>COMMANDS:</title>
  <group>open</group> <hl><FILE></hl> [APP]   Open FILE with APP (position or name). Prompts if APP is omitted.
      --line N, --column N    1-based cursor position (default 1)
      --project FILE          Project file open in the editor
      --command \"TPL ...\"     Run an ad-hoc command template instead of a configured app
      --config FILE           Settings file to use
      --debug                 Print the resolved variables
      --dry-run               Print the command instead of running it
  <group>list</group>                List configured apps
  <group>init</group>                Write a sample settings file
  <group>path</group>                Show which settings file is in use

<title>TEMPLATE VARIABLES:</title>
  line, column, filename, directory, project, any_project, package, git
";

/// Builds the color-aware help string at runtime.
fn build_help_string() -> &'static str {
    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();

    let title = if use_colors { "\x1b[1;33m" } else { "" }; // Bold Yellow
    let hl = if use_colors { "\x1b[1;36m" } else { "" }; // Bold Cyan
    let cmd = if use_colors { "\x1b[36m" } else { "" }; // Cyan
    let group = if use_colors { "\x1b[1;32m" } else { "" }; // Bold Green
    let dim = if use_colors { "\x1b[2m" } else { "" };
    let reset = if use_colors { "\x1b[0m" } else { "" };

    // Curly braces are clap's own tags, so the template avoids them apart from `{version}`.
    let formatted_string = HELP_TEMPLATE
        .replace("<title>", title)
        .replace("</title>", reset)
        .replace("<hl>", hl)
        .replace("</hl>", reset)
        .replace("<cmd>", cmd)
        .replace("</cmd>", reset)
        .replace("<group>", group)
        .replace("</group>", reset)
        .replace("<dim>", dim)
        .replace("</dim>", reset);

    Box::leak(formatted_string.into_boxed_str())
}

/// open-with: open the current file in an external application.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    help_template = { build_help_string() },
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
#[command(trailing_var_arg = true)]
pub struct Cli {
    /// The sequence of arguments passed to open-with. Each command parses its own.
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}
