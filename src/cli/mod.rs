//! Command-line interface for bandreport
//!
//! The CLI exposes the pure parts of the engine (parameter resolution and
//! output naming) plus configuration inspection. Rendering needs renderer
//! and loader implementations, which embedding applications supply.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

pub mod commands;
mod output;

pub use output::Output;

use crate::config::ReportingConfig;
use commands::{config, name, params, version};

#[derive(Parser)]
#[command(
    name = "bandreport",
    version = env!("CARGO_PKG_VERSION"),
    about = "Band-based report execution engine",
    long_about = "bandreport resolves report parameters, computes output file names from band data \
                  and inspects the engine configuration."
)]
pub struct Cli {
    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the output file name a template produces for a band tree
    Name(name::NameArgs),
    /// Resolve report parameters and print them as JSON
    Params(params::ParamsArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Show version information
    Version,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet, &base_log_level(self.config.as_deref()));

        let output = Output::new(self.quiet);
        match self.command {
            Some(Commands::Name(args)) => name::execute(args),
            Some(Commands::Params(args)) => params::execute(args, self.config.as_deref()),
            Some(Commands::Config(args)) => config::execute(args, self.config.as_deref(), &output),
            Some(Commands::Version) => version::execute(&output),
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        }
    }
}

/// `logging.level` from the configuration, `warn` when it cannot be read
fn base_log_level(config: Option<&str>) -> String {
    ReportingConfig::load_with_custom_config(config)
        .and_then(|config| config.settings())
        .map(|settings| settings.logging.level)
        .unwrap_or_else(|_| "warn".to_string())
}

fn setup_logging(verbose: u8, quiet: bool, base_level: &str) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => tracing_subscriber::EnvFilter::new(base_level),
        1 => tracing_subscriber::EnvFilter::new("info"),
        2 => tracing_subscriber::EnvFilter::new("debug"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
