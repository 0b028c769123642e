mod commands;
mod context;
mod output;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{
    coerce::{CoerceArgs, handle_coerce},
    forms::{FormsCommands, handle_forms_commands},
    validate::{ValidateArgs, handle_validate},
};
use context::ConfigContext;
use output::{GlobalOptions, OutputFormat, OutputManager};

const CONFIG_ENV: &str = "FORMCOERCE_CONFIG";

const HELP_FOOTER: &str = "\
Examples:
  formcoerce validate gallery -f title=Sunset -f width=1920
  formcoerce validate blog --input post.json -f status=draft
  cat post.json | formcoerce --output json validate blog --input -
  formcoerce coerce numeric ' 42 '
  formcoerce forms show department

Configuration is read from --config, then $FORMCOERCE_CONFIG, then the
nearest forms.toml in the working directory or one of its parents.
Set RUST_LOG (or pass -v) to see coercion and validation logs.";

/// Validate form submissions against configured form schemas
#[derive(Parser)]
#[command(name = "formcoerce", version, after_long_help = HELP_FOOTER)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Only print errors
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Print progress details and debug logs
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Form configuration file
    #[arg(long, env = CONFIG_ENV, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a submission against a configured form
    Validate(ValidateArgs),

    /// Show how a raw value is normalized by a coercer
    Coerce(CoerceArgs),

    /// List and inspect configured forms
    #[command(subcommand)]
    Forms(FormsCommands),
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = execute(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }
    let output = OutputManager::new(GlobalOptions {
        output_format: cli.output,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    });

    match cli.command {
        Commands::Validate(args) => {
            let ctx = ConfigContext::load(cli.config.as_deref())?;
            handle_validate(args, &ctx, &output)
        }
        Commands::Coerce(args) => handle_coerce(args, &output),
        Commands::Forms(command) => {
            let ctx = ConfigContext::load(cli.config.as_deref())?;
            output.detail(&format!(
                "Loaded {} form(s) from {}",
                ctx.config.forms.len(),
                ctx.config_path.display()
            ));
            handle_forms_commands(command, &ctx, &output)
        }
    }
}
