//! Render path selection

use super::{RenderInput, RendererFactory};
use crate::band::BandData;
use crate::error::{ErrorKind, ReportingError, Result};
use crate::postprocess::{self, ExtensionRegistry};
use crate::structure::{OutputType, ParamMap, Report, ReportTemplate};
use std::io::Write;
use std::sync::Arc;

/// Inputs of one render
#[derive(Clone, Copy)]
pub struct RenderJob<'a> {
    pub report: &'a Report,
    pub template: &'a ReportTemplate,
    pub output_type: &'a OutputType,
    pub params: &'a ParamMap,
    pub root_band: &'a BandData,
}

/// Routes a render job to the custom, post-processed or direct path
#[derive(Clone)]
pub struct RenderDispatcher {
    renderer_factory: Option<Arc<dyn RendererFactory>>,
    extensions: Arc<ExtensionRegistry>,
}

impl RenderDispatcher {
    pub fn new(
        renderer_factory: Option<Arc<dyn RendererFactory>>,
        extensions: Arc<ExtensionRegistry>,
    ) -> Self {
        Self {
            renderer_factory,
            extensions,
        }
    }

    /// Render `job` into `destination`
    ///
    /// Paths, in order:
    /// 1. custom template: its bytes are written as-is
    /// 2. post-processor declared: render into memory, post-process, then write;
    ///    `destination` is dropped before returning on every path
    /// 3. otherwise render straight into `destination`, then flush it
    ///
    /// `before_post_processing` runs once the in-memory render of path 2 is done.
    pub fn dispatch<W: Write>(
        &self,
        job: &RenderJob<'_>,
        mut destination: W,
        before_post_processing: impl FnOnce(),
    ) -> Result<()> {
        let template = job.template;

        if let Some(custom) = &template.custom_report {
            tracing::debug!("Rendering custom template [{}]", template.document_name);
            let bytes = custom.create_report(job.report, job.root_band, job.params)?;
            destination
                .write_all(&bytes)
                .and_then(|()| destination.flush())
                .map_err(|e| ReportingError::rendering(&template.document_name, e))?;
        } else if let Some(post_processor) = template.post_processor_id() {
            let mut buffer = Vec::new();
            self.render_to(job, &mut buffer)?;

            before_post_processing();
            let bytes =
                postprocess::apply_post_processor(&self.extensions, buffer, post_processor, job.root_band)?;

            let written = destination
                .write_all(&bytes)
                .and_then(|()| destination.flush());
            drop(destination);
            written.map_err(|e| {
                ReportingError::rendering(&template.document_name, e)
            })?;
        } else {
            self.render_to(job, &mut destination)?;
            destination
                .flush()
                .map_err(|e| ReportingError::rendering(&template.document_name, e))?;
        }

        Ok(())
    }

    fn render_to(&self, job: &RenderJob<'_>, output: &mut dyn Write) -> Result<()> {
        let factory = self
            .renderer_factory
            .as_ref()
            .ok_or(ReportingError::new(ErrorKind::MissingCollaborator("Renderer factory")))?;

        let input = RenderInput {
            template_extension: job.template.extension(),
            root_band: job.root_band,
            template: job.template,
            output_type: job.output_type,
            output,
        };

        tracing::debug!(
            "Rendering template [{}] to {}",
            job.template.document_name,
            job.output_type
        );
        let mut renderer = factory.create_renderer(input)?;
        renderer.render_document()
    }
}
