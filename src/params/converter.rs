//! String to typed value conversion for parameter defaults

use crate::error::{ErrorKind, ReportingError, Result};
use crate::structure::{ParameterType, Value};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Number;

/// Converts textual values into the declared parameter type
///
/// Shared by concurrent report runs, so implementations must be thread safe.
pub trait ValueConverter: Send + Sync {
    fn convert(&self, target: ParameterType, value: &str) -> Result<Value>;
}

lazy_static! {
    static ref DATE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid");
    static ref DATE_TIME: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}(:\d{2}(\.\d+)?)?$").expect("date-time pattern is valid");
}

/// Built-in converter covering every [`ParameterType`]
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultValueConverter;

impl DefaultValueConverter {
    fn failed(target: ParameterType, value: &str) -> ReportingError {
        ReportingError::new(ErrorKind::ParameterConversionFailed {
            value: value.to_string(),
            target,
        })
    }
}

impl ValueConverter for DefaultValueConverter {
    fn convert(&self, target: ParameterType, value: &str) -> Result<Value> {
        let trimmed = value.trim();
        match target {
            ParameterType::String => Ok(Value::String(value.to_string())),
            ParameterType::Integer => trimmed
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| Self::failed(target, value).with_source(e)),
            ParameterType::Float => {
                let parsed = trimmed
                    .parse::<f64>()
                    .map_err(|e| Self::failed(target, value).with_source(e))?;
                Number::from_f64(parsed)
                    .map(Value::Number)
                    .ok_or_else(|| Self::failed(target, value))
            }
            // Anything other than "true" is false
            ParameterType::Boolean => Ok(Value::Bool(trimmed.eq_ignore_ascii_case("true"))),
            ParameterType::Date if DATE.is_match(trimmed) => Ok(Value::String(trimmed.to_string())),
            ParameterType::DateTime if DATE_TIME.is_match(trimmed) => {
                Ok(Value::String(trimmed.to_string()))
            }
            ParameterType::Date | ParameterType::DateTime => Err(Self::failed(target, value)),
            ParameterType::Json => serde_json::from_str(value)
                .map_err(|e| Self::failed(target, value).with_source(e)),
        }
    }
}
