//! # bandreport - band-based report execution
//!
//! Runs report definitions end to end: caller parameters are resolved against
//! the declared ones, a data extractor fills a tree of named bands, a renderer
//! chosen by template extension writes the document (optionally routed through
//! a registered post-processor) and the output file name is derived from the
//! template's naming pattern.
//!
//! Renderers, data loaders and post-processors are collaborators supplied by
//! the embedding application.
//!
//! ## Quick Start
//!
//! ```ignore
//! let reporting = Reporting::builder()
//!     .renderer_factory(Arc::new(MyRenderers))
//!     .loader_factory(Arc::new(MyLoaders))
//!     .build();
//!
//! let document = reporting.run_report(RunParams::new(report).param("customer", "ACME"))?;
//! std::fs::write(&document.document_name, document.content.unwrap_or_default())?;
//! ```

pub mod band;
pub mod cancellation;
pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod naming;
pub mod params;
pub mod postprocess;
pub mod render;
pub mod reporting;
pub mod structure;

pub use band::{BandData, ROOT_BAND_NAME};
pub use cancellation::CancellationToken;
pub use cli::{Cli, Output};
pub use config::{ReportingConfig, ReportingSettings};
pub use error::{ErrorKind, ReportingError, Result};
pub use reporting::{ExecutionStage, ReportObserver, Reporting, ReportingBuilder, RunParams, TracingObserver};
pub use structure::{OutputType, ParamMap, Report, ReportOutputDocument, ReportTemplate};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
