//! Report templates

use super::OutputType;
use crate::render::CustomReport;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Code of the template used when the caller does not pick one
pub const DEFAULT_TEMPLATE_CODE: &str = "DEFAULT";

/// Document skeleton plus rendering, post-processing and naming configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ReportTemplate {
    #[serde(default = "default_code")]
    pub code: String,

    /// Document name; its suffix selects the renderer
    pub document_name: String,

    /// Where the template document lives, for renderers that read it lazily
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_path: Option<String>,

    /// Template document bytes
    #[serde(skip)]
    pub content: Vec<u8>,

    pub output_type: OutputType,

    /// Pattern for the produced file name, e.g. `${Root.fileName}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_name_pattern: Option<String>,

    /// Identifier of a registered post-processor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_processor: Option<String>,

    /// Externally rendered templates bypass the renderer factory
    #[serde(skip)]
    pub custom_report: Option<Arc<dyn CustomReport>>,
}

fn default_code() -> String {
    DEFAULT_TEMPLATE_CODE.to_string()
}

impl ReportTemplate {
    pub fn new(document_name: impl Into<String>, output_type: OutputType) -> Self {
        Self {
            code: default_code(),
            document_name: document_name.into(),
            document_path: None,
            content: Vec::new(),
            output_type,
            output_name_pattern: None,
            post_processor: None,
            custom_report: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_content(mut self, content: Vec<u8>) -> Self {
        self.content = content;
        self
    }

    pub fn with_output_name_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.output_name_pattern = Some(pattern.into());
        self
    }

    pub fn with_post_processor(mut self, identifier: impl Into<String>) -> Self {
        self.post_processor = Some(identifier.into());
        self
    }

    pub fn with_custom_report(mut self, custom: Arc<dyn CustomReport>) -> Self {
        self.custom_report = Some(custom);
        self
    }

    pub fn is_custom(&self) -> bool {
        self.custom_report.is_some()
    }

    /// Post-processor identifier, if a non-empty one is declared
    pub fn post_processor_id(&self) -> Option<&str> {
        self.post_processor.as_deref().filter(|id| !id.is_empty())
    }

    /// Suffix after the last `.` of the document name, empty when there is none
    pub fn extension(&self) -> &str {
        self.document_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("")
    }
}

impl fmt::Debug for ReportTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportTemplate")
            .field("code", &self.code)
            .field("document_name", &self.document_name)
            .field("document_path", &self.document_path)
            .field("content_len", &self.content.len())
            .field("output_type", &self.output_type)
            .field("output_name_pattern", &self.output_name_pattern)
            .field("post_processor", &self.post_processor)
            .field("custom", &self.is_custom())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_suffix_after_last_dot() {
        let template = ReportTemplate::new("monthly.report.xlsx", OutputType::XLSX);
        assert_eq!(template.extension(), "xlsx");

        let template = ReportTemplate::new("README", OutputType::CUSTOM);
        assert_eq!(template.extension(), "");
    }

    #[test]
    fn test_empty_post_processor_is_not_set() {
        let template = ReportTemplate::new("a.docx", OutputType::PDF).with_post_processor("");
        assert_eq!(template.post_processor_id(), None);

        let template = template.with_post_processor("watermark");
        assert_eq!(template.post_processor_id(), Some("watermark"));
    }

    #[test]
    fn test_template_from_yaml() {
        let yaml = r#"
document_name: invoice.docx
output_type: pdf
output_name_pattern: "${Root.number}"
"#;
        let template: ReportTemplate = serde_yml::from_str(yaml).unwrap();
        assert_eq!(template.code, DEFAULT_TEMPLATE_CODE);
        assert_eq!(template.output_type, OutputType::PDF);
        assert_eq!(template.output_name_pattern.as_deref(), Some("${Root.number}"));
        assert!(!template.is_custom());
    }
}
