//! Post-processing of rendered documents
//!
//! Templates name their post-processor by identifier. Identifiers are looked up
//! in an [`ExtensionRegistry`] populated at configuration time; each entry is a
//! constructor, so every run gets a fresh instance.

use crate::band::BandData;
use crate::error::{BoxError, ErrorKind, ReportingError, Result};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Transforms rendered bytes
pub trait PostProcessor: Send + Sync {
    fn post_process_report(&self, bytes: Vec<u8>, root: &BandData) -> Result<Vec<u8>>;
}

impl<F> PostProcessor for F
where
    F: Fn(Vec<u8>, &BandData) -> Result<Vec<u8>> + Send + Sync,
{
    fn post_process_report(&self, bytes: Vec<u8>, root: &BandData) -> Result<Vec<u8>> {
        self(bytes, root)
    }
}

type Constructor =
    Arc<dyn Fn() -> std::result::Result<Box<dyn Any + Send>, BoxError> + Send + Sync>;

/// Identifier → constructor registry for pluggable components
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    constructors: BTreeMap<String, Constructor>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component with the post-processing capability
    pub fn register_post_processor<P, F>(&mut self, id: impl Into<String>, constructor: F) -> &mut Self
    where
        P: PostProcessor + 'static,
        F: Fn() -> std::result::Result<P, BoxError> + Send + Sync + 'static,
    {
        let constructor: Constructor = Arc::new(move || {
            let processor: Box<dyn PostProcessor> = Box::new(constructor()?);
            Ok(Box::new(processor) as Box<dyn Any + Send>)
        });
        self.constructors.insert(id.into(), constructor);
        self
    }

    /// Register a post-processor built with `Default`
    pub fn register_default_post_processor<P>(&mut self, id: impl Into<String>) -> &mut Self
    where
        P: PostProcessor + Default + 'static,
    {
        self.register_post_processor(id, || Ok(P::default()))
    }

    /// Register an arbitrary component without any capability
    pub fn register_component<T, F>(&mut self, id: impl Into<String>, constructor: F) -> &mut Self
    where
        T: Any + Send,
        F: Fn() -> std::result::Result<T, BoxError> + Send + Sync + 'static,
    {
        let constructor: Constructor =
            Arc::new(move || Ok(Box::new(constructor()?) as Box<dyn Any + Send>));
        self.constructors.insert(id.into(), constructor);
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.constructors.contains_key(id)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Instantiate the post-processor registered under `id`
    pub fn resolve_post_processor(&self, id: &str) -> Result<Box<dyn PostProcessor>> {
        let constructor = self
            .constructors
            .get(id)
            .ok_or_else(|| ReportingError::new(ErrorKind::PostProcessorNotFound(id.to_string())))?;

        let instance = constructor().map_err(|e| {
            ReportingError::new(ErrorKind::PostProcessorInstantiationFailed(id.to_string()))
                .with_source(e)
        })?;

        instance
            .downcast::<Box<dyn PostProcessor>>()
            .map(|processor| *processor)
            .map_err(|_| ReportingError::new(ErrorKind::InvalidPostProcessor(id.to_string())))
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.identifiers()).finish()
    }
}

/// Resolve `id` and run it over `bytes`
pub fn apply_post_processor(
    registry: &ExtensionRegistry,
    bytes: Vec<u8>,
    id: &str,
    root: &BandData,
) -> Result<Vec<u8>> {
    let processor = registry.resolve_post_processor(id).inspect_err(|e| {
        tracing::error!("Post processor [{}] could not be resolved: {}", id, e.chain_to_string());
    })?;

    let input_len = bytes.len();
    let output = processor.post_process_report(bytes, root)?;
    tracing::debug!(
        "Post processor [{}] transformed {} bytes into {} bytes",
        id,
        input_len,
        output.len()
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Uppercase;

    impl PostProcessor for Uppercase {
        fn post_process_report(&self, bytes: Vec<u8>, _root: &BandData) -> Result<Vec<u8>> {
            Ok(bytes.to_ascii_uppercase())
        }
    }

    #[test]
    fn test_apply_registered_post_processor() {
        let mut registry = ExtensionRegistry::new();
        registry.register_default_post_processor::<Uppercase>("com.acme.Uppercase");

        let output =
            apply_post_processor(&registry, b"hello".to_vec(), "com.acme.Uppercase", &BandData::root())
                .expect("post processing succeeds");
        assert_eq!(output, b"HELLO");
    }

    #[test]
    fn test_closure_post_processor_sees_root_band() {
        let mut registry = ExtensionRegistry::new();
        registry.register_post_processor("stamp", || {
            Ok(|mut bytes: Vec<u8>, root: &BandData| -> Result<Vec<u8>> {
                bytes.extend_from_slice(root.name().as_bytes());
                Ok(bytes)
            })
        });

        let output = apply_post_processor(&registry, b"by ".to_vec(), "stamp", &BandData::root()).unwrap();
        assert_eq!(output, b"by Root");
    }

    #[test]
    fn test_unknown_identifier() {
        let registry = ExtensionRegistry::new();
        let err = registry.resolve_post_processor("com.acme.Missing").err().unwrap();

        assert_eq!(err.kind(), &ErrorKind::PostProcessorNotFound("com.acme.Missing".into()));
        assert!(err.to_string().contains("registered"));
    }

    #[test]
    fn test_component_without_capability() {
        let mut registry = ExtensionRegistry::new();
        registry.register_component("com.acme.Uppercase", || Ok(Uppercase));

        let err = registry.resolve_post_processor("com.acme.Uppercase").err().unwrap();
        assert_eq!(err.kind(), &ErrorKind::InvalidPostProcessor("com.acme.Uppercase".into()));
    }

    #[test]
    fn test_constructor_failure() {
        let mut registry = ExtensionRegistry::new();
        registry.register_post_processor("flaky", || -> std::result::Result<Uppercase, BoxError> {
            Err("license file missing".into())
        });

        let err = registry.resolve_post_processor("flaky").err().unwrap();
        assert_eq!(err.kind(), &ErrorKind::PostProcessorInstantiationFailed("flaky".into()));
        assert!(err.chain_to_string().contains("license file missing"));
    }
}
