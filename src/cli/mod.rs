//! Command-line interface for typecfg
//!
//! Provides `get`, `dump` and `check` subcommands over one merged store.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod check;
mod dump;
mod get;
mod utils;

/// Load, merge and query typed configuration files
#[derive(Parser)]
#[command(name = "typecfg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Root configuration file
    #[arg(
        long = "use-config",
        value_name = "PATH",
        env = "TYPECFG_CONFIG",
        default_value = "config.cfg"
    )]
    use_config: PathBuf,

    /// Merge another configuration file on top of the root file (repeatable)
    #[arg(long = "add-config", value_name = "PATH")]
    add_config: Vec<PathBuf>,

    /// Define a value with the highest priority (repeatable; `-DNAME TYPE VALUE` also works)
    #[arg(
        short = 'D',
        long = "define",
        num_args = 3,
        value_names = ["NAME", "TYPE", "VALUE"],
        allow_negative_numbers = true
    )]
    define: Vec<String>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one configuration value
    Get(get::GetArgs),

    /// Print every configuration value
    Dump(dump::DumpArgs),

    /// Load the configuration and report redefinitions
    Check,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse_from(utils::split_attached_defines(std::env::args_os()));

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let sources = utils::build_sources(&cli.use_config, &cli.add_config, &cli.define)?;

    match cli.command {
        Commands::Get(args) => get::run(sources, args),
        Commands::Dump(args) => dump::run(sources, args),
        Commands::Check => check::run(sources),
    }
}
