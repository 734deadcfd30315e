//! Configuration command implementations

use crate::cli::Output;
use crate::config::ReportingConfig;
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective settings as TOML
    Show,
    /// Check the effective settings
    Validate,
}

pub fn execute(args: ConfigArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let config = ReportingConfig::load_with_custom_config(config_path)?;
    match args.command {
        ConfigCommands::Show => {
            let settings = config.settings()?;
            print!("{}", toml::to_string_pretty(&settings)?);
            Ok(())
        }
        ConfigCommands::Validate => match config.settings() {
            Ok(settings) => {
                output.success("Configuration is valid");
                output.key_value("parameters.keep_undeclared:", &settings.parameters.keep_undeclared.to_string(), false);
                output.key_value(
                    "extraction.put_empty_row_if_no_data:",
                    &settings.extraction.put_empty_row_if_no_data.to_string(),
                    false,
                );
                output.key_value("logging.level:", &settings.logging.level, false);
                Ok(())
            }
            Err(e) => {
                output.error(&format!("Configuration is invalid: {e:#}"));
                Err(e)
            }
        },
    }
}
