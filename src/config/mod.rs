//! Engine configuration
//!
//! Settings are layered with figment (see [`ReportingConfig`]) and read through
//! the typed [`ReportingSettings`] view. Libraries embedding the engine can also
//! build [`ReportingSettings`] directly.

pub mod core;

pub use self::core::ReportingConfig;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Levels accepted by `logging.level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Typed engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportingSettings {
    pub parameters: ParameterSettings,
    pub extraction: ExtractionSettings,
    pub logging: LoggingSettings,
}

/// Parameter resolution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ParameterSettings {
    /// Carry caller parameters the report does not declare
    pub keep_undeclared: bool,
}

/// Default data extractor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// One empty band per definition whose loader returned no rows
    pub put_empty_row_if_no_data: bool,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            put_empty_row_if_no_data: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Include the flattened parameter set in run records
    pub log_parameters: bool,
    /// Filter used by the CLI when no `-v` is given
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_parameters: true,
            level: "warn".to_string(),
        }
    }
}

impl ReportingSettings {
    pub fn validate(&self) -> Result<()> {
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            bail!(
                "Invalid logging.level '{}', expected one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            );
        }
        Ok(())
    }
}
