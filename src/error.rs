//! Error taxonomy for report execution
//!
//! Every failure raised by the engine or by a collaborator is a [`ReportingError`].
//! The [`ErrorKind`] tells callers what went wrong; the executor appends the report
//! name to most kinds before the error leaves [`crate::reporting::Reporting`].

use crate::structure::ParameterType;
use thiserror::Error;

/// Boxed error used for collaborator-provided causes
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, ReportingError>;

/// What went wrong while running a report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A required invocation argument was not supplied
    #[error("\"{0}\" can not be null")]
    InvalidInput(&'static str),

    #[error("Report template not found for code [{0}]")]
    TemplateNotFound(String),

    #[error("Required report parameter \"{0}\" not found")]
    MissingRequiredParameter(String),

    #[error("Can not convert value [{value}] to {target}")]
    ParameterConversionFailed { value: String, target: ParameterType },

    /// Cancellation observed by a collaborator. Never annotated.
    #[error("Report execution was interrupted")]
    Interrupted,

    #[error("{0} is not configured")]
    MissingCollaborator(&'static str),

    #[error("No data loader registered for type [{0}]")]
    DataLoaderNotFound(String),

    #[error("An error occurred while loading data for band [{band}]: {message}")]
    DataLoadingFailed { band: String, message: String },

    #[error("No renderer available for template extension [{0}]")]
    UnsupportedTemplate(String),

    #[error("An error occurred while processing template [{template}]")]
    RenderingFailed { template: String },

    #[error(
        "Post processor [{0}] not found.\nPlease ensure that you entered the exact identifier \
         the post processor was registered with and that it is registered with the engine"
    )]
    PostProcessorNotFound(String),

    #[error("Component [{0}] does not implement the post processor capability")]
    InvalidPostProcessor(String),

    #[error("An error occurred while instantiating post processor [{0}]")]
    PostProcessorInstantiationFailed(String),

    #[error("Post processor [{processor}] failed: {message}")]
    PostProcessingFailed { processor: String, message: String },

    #[error("No data in band [{0}] found. This band is used for output file name generation.")]
    OutputNamingBandNotFound(String),

    #[error(
        "No data in band [{band}] parameter [{field}] found. \
         This band and parameter is used for output file name generation."
    )]
    OutputNamingFieldNotFound { band: String, field: String },

    /// Caller-facing validation message, shown verbatim
    #[error("{0}")]
    Validation(String),
}

/// Error raised by report execution
#[derive(Debug, Error)]
#[error("{}{}", .kind, .report_details.as_deref().unwrap_or(""))]
pub struct ReportingError {
    kind: ErrorKind,
    report_details: Option<String>,
    #[source]
    source: Option<BoxError>,
}

impl ReportingError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            report_details: None,
            source: None,
        }
    }

    /// Attach the underlying cause
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The error a collaborator returns when it observes cancellation
    pub fn interrupted() -> Self {
        Self::new(ErrorKind::Interrupted)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation(message.into()))
    }

    /// Rendering failure tagged with the template document name
    pub fn rendering(template: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::RenderingFailed {
            template: template.into(),
        })
        .with_source(source)
    }

    pub fn data_loading(band: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DataLoadingFailed {
            band: band.into(),
            message: message.into(),
        })
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn report_details(&self) -> Option<&str> {
        self.report_details.as_deref()
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self.kind, ErrorKind::Interrupted)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation(_))
    }

    /// Whether the executor appends the report name to this error
    pub fn is_annotated_kind(&self) -> bool {
        !matches!(
            self.kind,
            ErrorKind::Interrupted | ErrorKind::Validation(_) | ErrorKind::InvalidInput(_)
        )
    }

    /// Set the report details suffix, replacing any previous one
    pub fn set_report_details(&mut self, details: impl Into<String>) {
        self.report_details = Some(details.into());
    }

    /// Render the error and its causes, one per line
    pub fn chain_to_string(&self) -> String {
        let mut text = self.to_string();
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            text.push_str("\nCaused by: ");
            text.push_str(&cause.to_string());
            current = cause.source();
        }
        text
    }
}

impl From<ErrorKind> for ReportingError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}
