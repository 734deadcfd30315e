//! Report execution
//!
//! [`Reporting`] runs one report per call: parameters are resolved, the data
//! extractor fills the band tree, the template is rendered (and post-processed
//! when it asks for it) and the output file name is computed. An instance holds
//! only collaborators configured once through [`ReportingBuilder`], so it can be
//! shared by concurrent callers.

mod observer;
mod stage;

pub use observer::{ReportObserver, TracingObserver, flatten_parameters};
pub use stage::ExecutionStage;

use crate::band::BandData;
use crate::config::ReportingSettings;
use crate::error::{ErrorKind, ReportingError, Result};
use crate::extraction::{DataExtractor, DefaultDataExtractor, LoaderFactory};
use crate::naming;
use crate::params::{DefaultValueConverter, ParameterResolver, ValueConverter};
use crate::postprocess::ExtensionRegistry;
use crate::render::{RenderDispatcher, RenderJob, RendererFactory};
use crate::structure::{OutputType, ParamMap, Report, ReportOutputDocument, ReportTemplate, Value};
use std::io::Write;
use std::sync::Arc;

/// Arguments of one report run
#[derive(Debug, Clone, Default)]
pub struct RunParams {
    report: Option<Arc<Report>>,
    template: Option<ReportTemplate>,
    output_type: Option<OutputType>,
    params: ParamMap,
}

impl RunParams {
    /// Run `report` with its default template
    pub fn new(report: Arc<Report>) -> Self {
        let template = report.default_template().cloned();
        Self {
            report: Some(report),
            template,
            ..Self::default()
        }
    }

    pub fn template(mut self, template: ReportTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Select one of the report's templates by code
    pub fn template_code(mut self, code: &str) -> Result<Self> {
        let report = self
            .report
            .as_ref()
            .ok_or(ReportingError::new(ErrorKind::InvalidInput("report")))?;
        let template = report
            .template(code)
            .cloned()
            .ok_or_else(|| ReportingError::new(ErrorKind::TemplateNotFound(code.to_string())))?;
        self.template = Some(template);
        Ok(self)
    }

    /// Override the template's output type
    pub fn output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = Some(output_type);
        self
    }

    pub fn param(mut self, alias: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(alias.into(), value.into());
        self
    }

    pub fn params(mut self, params: ParamMap) -> Self {
        self.params.extend(params);
        self
    }

    pub fn report(&self) -> Option<&Arc<Report>> {
        self.report.as_ref()
    }

    pub fn get_template(&self) -> Option<&ReportTemplate> {
        self.template.as_ref()
    }

    pub fn get_params(&self) -> &ParamMap {
        &self.params
    }
}

/// Configures a [`Reporting`] instance
#[derive(Default)]
pub struct ReportingBuilder {
    renderer_factory: Option<Arc<dyn RendererFactory>>,
    loader_factory: Option<Arc<dyn LoaderFactory>>,
    data_extractor: Option<Arc<dyn DataExtractor>>,
    value_converter: Option<Arc<dyn ValueConverter>>,
    extensions: Option<Arc<ExtensionRegistry>>,
    observer: Option<Arc<dyn ReportObserver>>,
    settings: ReportingSettings,
}

impl ReportingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renderer_factory(mut self, factory: Arc<dyn RendererFactory>) -> Self {
        self.renderer_factory = Some(factory);
        self
    }

    /// Loader factory used to derive a [`DefaultDataExtractor`] when no extractor is set
    pub fn loader_factory(mut self, factory: Arc<dyn LoaderFactory>) -> Self {
        self.loader_factory = Some(factory);
        self
    }

    pub fn data_extractor(mut self, extractor: Arc<dyn DataExtractor>) -> Self {
        self.data_extractor = Some(extractor);
        self
    }

    pub fn value_converter(mut self, converter: Arc<dyn ValueConverter>) -> Self {
        self.value_converter = Some(converter);
        self
    }

    pub fn extension_registry(mut self, registry: ExtensionRegistry) -> Self {
        self.extensions = Some(Arc::new(registry));
        self
    }

    pub fn observer(mut self, observer: Arc<dyn ReportObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn settings(mut self, settings: ReportingSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> Reporting {
        let settings = self.settings;

        let data_extractor = self.data_extractor.or_else(|| {
            self.loader_factory.map(|factory| {
                Arc::new(
                    DefaultDataExtractor::new(factory)
                        .put_empty_row_if_no_data(settings.extraction.put_empty_row_if_no_data),
                ) as Arc<dyn DataExtractor>
            })
        });

        let converter = self
            .value_converter
            .unwrap_or_else(|| Arc::new(DefaultValueConverter));
        let resolver =
            ParameterResolver::new(converter).keep_undeclared(settings.parameters.keep_undeclared);

        let observer = self
            .observer
            .unwrap_or_else(|| Arc::new(TracingObserver::new(settings.logging.log_parameters)));

        Reporting {
            dispatcher: RenderDispatcher::new(self.renderer_factory, self.extensions.unwrap_or_default()),
            data_extractor,
            resolver,
            observer,
        }
    }
}

/// Report executor
#[derive(Clone)]
pub struct Reporting {
    dispatcher: RenderDispatcher,
    data_extractor: Option<Arc<dyn DataExtractor>>,
    resolver: ParameterResolver,
    observer: Arc<dyn ReportObserver>,
}

impl Reporting {
    pub fn builder() -> ReportingBuilder {
        ReportingBuilder::new()
    }

    /// Run a report and keep the rendered bytes in the returned document
    pub fn run_report(&self, run: RunParams) -> Result<ReportOutputDocument> {
        let mut buffer = Vec::new();
        let mut document = self.run_report_to(run, &mut buffer)?;
        document.content = Some(buffer);
        Ok(document)
    }

    /// Run a report writing the rendered bytes into `destination`
    ///
    /// `destination` is consumed; on the post-processing path it is dropped as
    /// soon as the processed bytes are written or the run fails.
    pub fn run_report_to<W: Write>(&self, run: RunParams, destination: W) -> Result<ReportOutputDocument> {
        let RunParams {
            report,
            template,
            output_type,
            params,
        } = run;

        let report = report.ok_or_else(|| self.reject(ErrorKind::InvalidInput("report")))?;
        self.observer.stage_changed(&report, ExecutionStage::Validating);
        let validated = template
            .ok_or(ReportingError::new(ErrorKind::InvalidInput("template")))
            .and_then(|template| report.validate().map(|()| template));
        let template = match validated {
            Ok(template) => template,
            Err(err) => {
                self.observer.input_rejected(&err);
                self.observer.stage_changed(&report, ExecutionStage::Failed);
                return Err(err);
            }
        };

        let output_type = output_type.unwrap_or_else(|| template.output_type.clone());

        match self.execute(&report, &template, &output_type, &params, destination) {
            Ok((resolved, document_name)) => {
                self.observer.stage_changed(&report, ExecutionStage::Completed);
                self.observer.report_finished(&report, &resolved, &document_name);
                Ok(ReportOutputDocument::new(report, document_name, output_type))
            }
            Err(err) if err.is_interrupted() => {
                self.observer.stage_changed(&report, ExecutionStage::Cancelled);
                self.observer.report_cancelled(&report, &params);
                Err(err)
            }
            Err(mut err) => {
                if err.is_annotated_kind() {
                    err.set_report_details(format!(" Report name [{}]", report.name));
                }
                self.observer.stage_changed(&report, ExecutionStage::Failed);
                self.observer.report_failed(&report, &params, &err);
                Err(err)
            }
        }
    }

    fn reject(&self, kind: ErrorKind) -> ReportingError {
        let err = ReportingError::new(kind);
        self.observer.input_rejected(&err);
        err
    }

    fn execute<W: Write>(
        &self,
        report: &Report,
        template: &ReportTemplate,
        output_type: &OutputType,
        params: &ParamMap,
        destination: W,
    ) -> Result<(ParamMap, String)> {
        let observer = self.observer.as_ref();

        observer.stage_changed(report, ExecutionStage::ResolvingParameters);
        let resolved = self.resolver.resolve(report, params)?;
        observer.report_started(report, &resolved);

        observer.stage_changed(report, ExecutionStage::ExtractingData);
        let extractor = self
            .data_extractor
            .as_ref()
            .ok_or(ReportingError::new(ErrorKind::MissingCollaborator("Data extractor")))?;
        let mut root = BandData::root().with_data(resolved.clone());
        root.add_report_field_formats(&report.field_formats);
        extractor.extract_data(report, &resolved, &mut root)?;
        let root = root;

        observer.stage_changed(report, ExecutionStage::Rendering);
        let job = RenderJob {
            report,
            template,
            output_type,
            params: &resolved,
            root_band: &root,
        };
        self.dispatcher.dispatch(&job, destination, || {
            observer.stage_changed(report, ExecutionStage::PostProcessing)
        })?;

        observer.stage_changed(report, ExecutionStage::NamingOutput);
        let document_name = naming::resolve_output_file_name(template, output_type, &root)?;

        Ok((resolved, document_name))
    }
}
