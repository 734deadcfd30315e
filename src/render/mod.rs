//! Rendering collaborators
//!
//! The engine never renders documents itself. A [`RendererFactory`] picks a
//! concrete [`Renderer`] from the template's file extension; custom templates
//! bring their own [`CustomReport`]. [`RenderDispatcher`] decides which of the
//! two applies and routes output through post-processing when required.

mod dispatch;

pub use dispatch::{RenderDispatcher, RenderJob};

use crate::band::BandData;
use crate::error::Result;
use crate::structure::{OutputType, ParamMap, Report, ReportTemplate};
use std::io::Write;

/// Everything a renderer factory needs to build a renderer
pub struct RenderInput<'a> {
    /// Template document suffix, e.g. `xlsx`
    pub template_extension: &'a str,
    pub root_band: &'a BandData,
    pub template: &'a ReportTemplate,
    pub output_type: &'a OutputType,
    pub output: &'a mut dyn Write,
}

/// A renderer bound to one run; writes the document into its output
pub trait Renderer {
    fn render_document(&mut self) -> Result<()>;
}

/// Selects renderers by template extension
///
/// Shared by concurrent report runs. Returns
/// [`ErrorKind::UnsupportedTemplate`](crate::error::ErrorKind::UnsupportedTemplate)
/// for extensions it cannot handle.
pub trait RendererFactory: Send + Sync {
    fn create_renderer<'a>(&self, input: RenderInput<'a>) -> Result<Box<dyn Renderer + 'a>>;
}

/// Fully custom report producing its own bytes
pub trait CustomReport: Send + Sync {
    fn create_report(&self, report: &Report, root: &BandData, params: &ParamMap) -> Result<Vec<u8>>;
}
