//! Output types and the produced document

use super::Report;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Target document format, identified by its canonical file extension
///
/// The `custom` sentinel marks externally defined formats and suppresses
/// extension rewriting of the output name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct OutputType {
    id: Cow<'static, str>,
}

impl OutputType {
    pub const XLS: OutputType = OutputType::predefined("xls");
    pub const XLSX: OutputType = OutputType::predefined("xlsx");
    pub const DOC: OutputType = OutputType::predefined("doc");
    pub const DOCX: OutputType = OutputType::predefined("docx");
    pub const PDF: OutputType = OutputType::predefined("pdf");
    pub const HTML: OutputType = OutputType::predefined("html");
    pub const CSV: OutputType = OutputType::predefined("csv");
    pub const CUSTOM: OutputType = OutputType::predefined("custom");

    const fn predefined(id: &'static str) -> Self {
        Self {
            id: Cow::Borrowed(id),
        }
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Cow::Owned(id.into().to_ascii_lowercase()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Canonical file extension, without the dot
    pub fn extension(&self) -> &str {
        &self.id
    }

    pub fn is_custom(&self) -> bool {
        *self == Self::CUSTOM
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl From<String> for OutputType {
    fn from(id: String) -> Self {
        OutputType::new(id)
    }
}

impl From<&str> for OutputType {
    fn from(id: &str) -> Self {
        OutputType::new(id)
    }
}

impl From<OutputType> for String {
    fn from(output_type: OutputType) -> Self {
        output_type.id.into_owned()
    }
}

impl FromStr for OutputType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OutputType::new(s.trim()))
    }
}

/// Result of a report run
#[derive(Debug, Clone)]
pub struct ReportOutputDocument {
    pub report: Arc<Report>,
    /// Rendered bytes; only present when the run buffered its output
    pub content: Option<Vec<u8>>,
    pub document_name: String,
    pub output_type: OutputType,
}

impl ReportOutputDocument {
    pub fn new(report: Arc<Report>, document_name: String, output_type: OutputType) -> Self {
        Self {
            report,
            content: None,
            document_name,
            output_type,
        }
    }
}
