//! Parameter resolution
//!
//! Validates a caller's parameter map against the parameters a report declares:
//! defaults are converted and applied, required parameters are enforced and
//! every declared alias ends up with an entry (possibly `null`).

mod converter;

pub use converter::{DefaultValueConverter, ValueConverter};

use crate::error::{ErrorKind, ReportingError, Result};
use crate::structure::{ParamMap, ParameterKind, Report, Value};
use std::sync::Arc;

/// Resolves caller parameters against a report's declared parameters
#[derive(Clone)]
pub struct ParameterResolver {
    converter: Arc<dyn ValueConverter>,
    keep_undeclared: bool,
}

impl ParameterResolver {
    pub fn new(converter: Arc<dyn ValueConverter>) -> Self {
        Self {
            converter,
            keep_undeclared: false,
        }
    }

    /// Carry caller parameters the report does not declare into the result
    pub fn keep_undeclared(mut self, keep: bool) -> Self {
        self.keep_undeclared = keep;
        self
    }

    /// Build the resolved parameter map; `params` is left untouched
    pub fn resolve(&self, report: &Report, params: &ParamMap) -> Result<ParamMap> {
        let mut resolved = if self.keep_undeclared {
            params.clone()
        } else {
            ParamMap::new()
        };

        for parameter in &report.parameters {
            let alias = &parameter.alias;
            let mut value = params.get(alias).filter(|v| !v.is_null()).cloned();

            if value.is_none() {
                if let ParameterKind::WithDefault(default) = &parameter.kind {
                    let converted = self.converter.convert(parameter.parameter_type, default)?;
                    tracing::trace!("Applied default for parameter [{}]: {}", alias, converted);
                    value = Some(converted).filter(|v| !v.is_null());
                }
            }

            if parameter.required && value.is_none() {
                return Err(ReportingError::new(ErrorKind::MissingRequiredParameter(
                    alias.clone(),
                )));
            }

            resolved.insert(alias.clone(), value.unwrap_or(Value::Null));
        }

        Ok(resolved)
    }

    /// Convert raw textual values (e.g. from a command line) to the declared
    /// parameter types; undeclared aliases stay strings
    pub fn convert_raw<'a>(
        &self,
        report: &Report,
        raw: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<ParamMap> {
        raw.into_iter()
            .map(|(alias, text)| {
                let value = match report.parameter(alias) {
                    Some(parameter) => self.converter.convert(parameter.parameter_type, text)?,
                    None => Value::String(text.to_string()),
                };
                Ok((alias.to_string(), value))
            })
            .collect()
    }
}

impl Default for ParameterResolver {
    fn default() -> Self {
        Self::new(Arc::new(DefaultValueConverter))
    }
}
