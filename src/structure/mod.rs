//! Report definition model
//!
//! Immutable descriptions of what to run: the [`Report`] with its declared
//! parameters, band definitions and templates, plus the [`OutputType`] a run
//! targets and the [`ReportOutputDocument`] it produces.

mod output;
mod parameter;
mod report;
mod template;

use std::collections::BTreeMap;

pub use output::{OutputType, ReportOutputDocument};
pub use parameter::{ParameterKind, ParameterType, ReportParameter};
pub use report::{BandDefinition, Report, ReportBuilder, ReportFieldFormat, ReportQuery};
pub use template::{DEFAULT_TEMPLATE_CODE, ReportTemplate};

/// Field and parameter values
pub use serde_json::Value;

/// Parameter or band field mapping, keyed by alias / field name
pub type ParamMap = BTreeMap<String, Value>;
