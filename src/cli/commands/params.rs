//! Parameter resolution command

use super::load_definition;
use crate::config::ReportingConfig;
use crate::params::ParameterResolver;
use crate::structure::Report;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ParamsArgs {
    /// Report definition (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub report: PathBuf,

    /// Parameter value as alias=value (repeatable)
    #[arg(short, long = "param", value_name = "ALIAS=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

fn parse_param(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(alias, value)| (alias.trim().to_string(), value.to_string()))
        .filter(|(alias, _)| !alias.is_empty())
        .ok_or_else(|| format!("expected ALIAS=VALUE, got '{raw}'"))
}

pub fn execute(args: ParamsArgs, config_path: Option<&str>) -> Result<()> {
    let settings = ReportingConfig::load_with_custom_config(config_path)?.settings()?;
    let report: Report = load_definition(&args.report)?;
    report.validate()?;

    let resolver = ParameterResolver::default().keep_undeclared(settings.parameters.keep_undeclared);
    let raw = args
        .params
        .iter()
        .map(|(alias, value)| (alias.as_str(), value.as_str()));
    let params = resolver.convert_raw(&report, raw)?;
    let resolved = resolver
        .resolve(&report, &params)
        .with_context(|| format!("Report name [{}]", report.name))?;

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
