//! Report definitions and their builder

use super::{DEFAULT_TEMPLATE_CODE, ReportParameter, ReportTemplate};
use crate::band::ROOT_BAND_NAME;
use crate::error::{ReportingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Formatting rule for a field, interpreted by renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFieldFormat {
    /// Field name, optionally qualified as `Band.field`
    pub name: String,
    pub format: String,
}

impl ReportFieldFormat {
    pub fn new(name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format: format.into(),
        }
    }
}

/// Data query attached to a band definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub name: String,
    /// Query text handed to the loader as-is
    pub script: String,
    /// Selects the loader in the loader factory
    pub loader_type: String,
}

impl ReportQuery {
    pub fn new(
        name: impl Into<String>,
        script: impl Into<String>,
        loader_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            script: script.into(),
            loader_type: loader_type.into(),
        }
    }
}

/// Declared shape of one level of the band tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<ReportQuery>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BandDefinition>,
}

impl BandDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: None,
            children: Vec::new(),
        }
    }

    pub fn root() -> Self {
        Self::new(ROOT_BAND_NAME)
    }

    pub fn with_query(mut self, query: ReportQuery) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_child(mut self, child: BandDefinition) -> Self {
        self.children.push(child);
        self
    }
}

impl Default for BandDefinition {
    fn default() -> Self {
        Self::root()
    }
}

/// Immutable report definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub name: String,

    #[serde(default)]
    pub parameters: Vec<ReportParameter>,

    #[serde(default)]
    pub field_formats: Vec<ReportFieldFormat>,

    #[serde(default)]
    pub root_band: BandDefinition,

    /// Templates keyed by code
    #[serde(default)]
    pub templates: BTreeMap<String, ReportTemplate>,
}

impl Report {
    pub fn builder(name: impl Into<String>) -> ReportBuilder {
        ReportBuilder::new(name)
    }

    pub fn template(&self, code: &str) -> Option<&ReportTemplate> {
        self.templates.get(code)
    }

    pub fn default_template(&self) -> Option<&ReportTemplate> {
        self.template(DEFAULT_TEMPLATE_CODE)
    }

    pub fn parameter(&self, alias: &str) -> Option<&ReportParameter> {
        self.parameters.iter().find(|p| p.alias == alias)
    }

    /// Check the definition invariants
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ReportingError::validation("Report name can not be empty"));
        }

        let mut aliases = HashSet::new();
        for parameter in &self.parameters {
            if parameter.alias.is_empty() {
                return Err(ReportingError::validation(format!(
                    "Parameter [{}] of report [{}] has an empty alias",
                    parameter.name, self.name
                )));
            }
            if !aliases.insert(parameter.alias.as_str()) {
                return Err(ReportingError::validation(format!(
                    "Parameter alias [{}] is declared more than once in report [{}]",
                    parameter.alias, self.name
                )));
            }
        }

        for (code, template) in &self.templates {
            if template.document_name.trim().is_empty() {
                return Err(ReportingError::validation(format!(
                    "Template [{code}] of report [{}] has no document name",
                    self.name
                )));
            }
        }

        Ok(())
    }
}

/// Incremental construction of a [`Report`]
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    report: Report,
}

impl ReportBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            report: Report {
                name: name.into(),
                parameters: Vec::new(),
                field_formats: Vec::new(),
                root_band: BandDefinition::root(),
                templates: BTreeMap::new(),
            },
        }
    }

    pub fn parameter(mut self, parameter: ReportParameter) -> Self {
        self.report.parameters.push(parameter);
        self
    }

    pub fn field_format(mut self, format: ReportFieldFormat) -> Self {
        self.report.field_formats.push(format);
        self
    }

    /// Add a first-level band definition
    pub fn band(mut self, band: BandDefinition) -> Self {
        self.report.root_band.children.push(band);
        self
    }

    /// Add a template under its own code, replacing one with the same code
    pub fn template(mut self, template: ReportTemplate) -> Self {
        self.report.templates.insert(template.code.clone(), template);
        self
    }

    pub fn build(self) -> Result<Report> {
        self.report.validate()?;
        Ok(self.report)
    }
}
