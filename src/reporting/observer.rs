//! Run observation
//!
//! The executor reports what it does to an injected [`ReportObserver`] instead
//! of a process-wide logger. [`TracingObserver`] is the default and forwards
//! everything to `tracing`.

use super::ExecutionStage;
use crate::band::value_to_text;
use crate::error::ReportingError;
use crate::structure::{ParamMap, Report};

/// Receives the lifecycle records of report runs
///
/// Shared across concurrent runs. Every method defaults to a no-op.
pub trait ReportObserver: Send + Sync {
    fn stage_changed(&self, _report: &Report, _stage: ExecutionStage) {}

    fn report_started(&self, _report: &Report, _params: &ParamMap) {}

    fn report_finished(&self, _report: &Report, _params: &ParamMap, _document_name: &str) {}

    fn report_cancelled(&self, _report: &Report, _params: &ParamMap) {}

    fn report_failed(&self, _report: &Report, _params: &ParamMap, _error: &ReportingError) {}

    /// A run was rejected before a report could be trusted
    fn input_rejected(&self, _error: &ReportingError) {}
}

/// Observer writing run records through `tracing`
#[derive(Debug, Clone)]
pub struct TracingObserver {
    log_parameters: bool,
}

impl TracingObserver {
    pub fn new(log_parameters: bool) -> Self {
        Self { log_parameters }
    }

    fn parameters(&self, params: &ParamMap) -> String {
        if self.log_parameters {
            format!(" with parameters:{}", flatten_parameters(params))
        } else {
            String::new()
        }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ReportObserver for TracingObserver {
    fn stage_changed(&self, report: &Report, stage: ExecutionStage) {
        if stage.is_terminal() {
            tracing::debug!("Report [{}] ended {}", report.name, stage);
        } else {
            tracing::trace!("Report [{}] -> {}", report.name, stage);
        }
    }

    fn report_started(&self, report: &Report, params: &ParamMap) {
        tracing::info!("Started report [{}]{}", report.name, self.parameters(params));
    }

    fn report_finished(&self, report: &Report, params: &ParamMap, document_name: &str) {
        tracing::info!(
            "Finished report [{}] as [{}]{}",
            report.name,
            document_name,
            self.parameters(params)
        );
    }

    fn report_cancelled(&self, report: &Report, params: &ParamMap) {
        tracing::warn!("Report [{}] was interrupted{}", report.name, self.parameters(params));
    }

    fn report_failed(&self, report: &Report, params: &ParamMap, error: &ReportingError) {
        tracing::error!(
            "An error occurred while running report [{}]{}\n{}",
            report.name,
            self.parameters(params),
            error.chain_to_string()
        );
    }

    fn input_rejected(&self, error: &ReportingError) {
        tracing::error!("Report run rejected: {}", error.chain_to_string());
    }
}

/// One `\nkey:value` line per parameter, in key order
pub fn flatten_parameters(params: &ParamMap) -> String {
    params
        .iter()
        .map(|(key, value)| {
            let text = value_to_text(value).unwrap_or_else(|| "null".to_string());
            format!("\n{}:{}", key, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_parameters() {
        let mut params = ParamMap::new();
        params.insert("to".into(), json!("2024-03-01"));
        params.insert("from".into(), json!("2024-02-01"));
        params.insert("limit".into(), json!(10));
        params.insert("region".into(), serde_json::Value::Null);

        assert_eq!(
            flatten_parameters(&params),
            "\nfrom:2024-02-01\nlimit:10\nregion:null\nto:2024-03-01"
        );
        assert_eq!(flatten_parameters(&ParamMap::new()), "");
    }

    #[test]
    fn test_parameters_can_be_hidden() {
        let mut params = ParamMap::new();
        params.insert("password".into(), json!("secret"));

        assert!(TracingObserver::new(true).parameters(&params).contains("secret"));
        assert!(TracingObserver::new(false).parameters(&params).is_empty());
    }
}
