//! Declared report parameters

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type a parameter value is expected to have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    #[default]
    String,
    Integer,
    Float,
    Boolean,
    /// `YYYY-MM-DD`, kept as text
    Date,
    /// `YYYY-MM-DD HH:MM[:SS]` (or with a `T` separator), kept as text
    DateTime,
    /// Arbitrary JSON document
    Json,
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterType::String => "string",
            ParameterType::Integer => "integer",
            ParameterType::Float => "float",
            ParameterType::Boolean => "boolean",
            ParameterType::Date => "date",
            ParameterType::DateTime => "date_time",
            ParameterType::Json => "json",
        };
        f.write_str(name)
    }
}

/// Whether a parameter carries a textual default
///
/// Serialized as an optional `default_value` string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ParameterKind {
    #[default]
    Plain,
    WithDefault(String),
}

impl From<Option<String>> for ParameterKind {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(default) => ParameterKind::WithDefault(default),
            None => ParameterKind::Plain,
        }
    }
}

impl From<ParameterKind> for Option<String> {
    fn from(kind: ParameterKind) -> Self {
        match kind {
            ParameterKind::Plain => None,
            ParameterKind::WithDefault(default) => Some(default),
        }
    }
}

/// A parameter the report declares
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportParameter {
    /// Display name
    #[serde(default)]
    pub name: String,

    /// Key the caller supplies the value under; unique within a report
    pub alias: String,

    #[serde(default, rename = "type")]
    pub parameter_type: ParameterType,

    #[serde(default)]
    pub required: bool,

    #[serde(default, rename = "default_value", skip_serializing_if = "ParameterKind::is_plain")]
    pub kind: ParameterKind,
}

impl ParameterKind {
    pub fn is_plain(&self) -> bool {
        matches!(self, ParameterKind::Plain)
    }
}

impl ReportParameter {
    pub fn new(alias: impl Into<String>, parameter_type: ParameterType) -> Self {
        let alias = alias.into();
        Self {
            name: alias.clone(),
            alias,
            parameter_type,
            required: false,
            kind: ParameterKind::Plain,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.kind = ParameterKind::WithDefault(default_value.into());
        self
    }

    pub fn default_value(&self) -> Option<&str> {
        match &self.kind {
            ParameterKind::WithDefault(default) => Some(default),
            ParameterKind::Plain => None,
        }
    }
}
