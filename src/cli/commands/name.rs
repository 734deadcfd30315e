//! Output name command
//!
//! Loads a template and a band tree and prints the file name a run with that
//! data would produce.

use super::load_definition;
use crate::band::BandData;
use crate::naming::resolve_output_file_name;
use crate::structure::{OutputType, ReportTemplate};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct NameArgs {
    /// Template definition (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub template: PathBuf,

    /// Band tree the name is resolved against (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub data: PathBuf,

    /// Output type overriding the template's, e.g. pdf
    #[arg(long, value_name = "TYPE")]
    pub output_type: Option<String>,
}

pub fn execute(args: NameArgs) -> Result<()> {
    let template: ReportTemplate = load_definition(&args.template)?;
    let root: BandData = load_definition(&args.data)?;
    let output_type = args
        .output_type
        .map(OutputType::new)
        .unwrap_or_else(|| template.output_type.clone());

    tracing::debug!("Resolving output name of [{}] as {}", template.document_name, output_type);
    let name = resolve_output_file_name(&template, &output_type, &root)?;
    println!("{name}");
    Ok(())
}
