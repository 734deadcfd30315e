//! Data extraction
//!
//! A [`DataExtractor`] populates the root band of a run. The engine ships
//! [`DefaultDataExtractor`], which walks the report's band definitions and asks
//! a [`LoaderFactory`] for the loader each query needs. Concrete loaders
//! (SQL, JSON, scripts, ...) live outside this crate.

use crate::band::BandData;
use crate::error::{ErrorKind, ReportingError, Result};
use crate::structure::{BandDefinition, ParamMap, Report, ReportQuery};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Populates the root band with child bands
///
/// The root arrives seeded with the resolved parameters. Implementations
/// report cancellation with [`ReportingError::interrupted`].
pub trait DataExtractor: Send + Sync {
    fn extract_data(&self, report: &Report, params: &ParamMap, root: &mut BandData) -> Result<()>;
}

/// Loads the rows of one band
pub trait ReportDataLoader: Send + Sync {
    /// One map per produced band; `parent` is the band the rows will be attached to
    fn load_data(
        &self,
        query: &ReportQuery,
        parent: &BandData,
        params: &ParamMap,
    ) -> Result<Vec<ParamMap>>;
}

/// Resolves loader types to loaders
pub trait LoaderFactory: Send + Sync {
    fn create_loader(&self, loader_type: &str) -> Option<Arc<dyn ReportDataLoader>>;
}

/// Extractor driven by band definitions and a loader factory
#[derive(Clone)]
pub struct DefaultDataExtractor {
    loader_factory: Arc<dyn LoaderFactory>,
    put_empty_row_if_no_data: bool,
}

impl DefaultDataExtractor {
    pub fn new(loader_factory: Arc<dyn LoaderFactory>) -> Self {
        Self {
            loader_factory,
            put_empty_row_if_no_data: true,
        }
    }

    /// Create one empty band when a definition's loader returns no rows
    pub fn put_empty_row_if_no_data(mut self, enabled: bool) -> Self {
        self.put_empty_row_if_no_data = enabled;
        self
    }

    fn load_rows(
        &self,
        definition: &BandDefinition,
        parent: &BandData,
        params: &ParamMap,
    ) -> Result<Vec<ParamMap>> {
        let Some(query) = &definition.query else {
            return Ok(Vec::new());
        };

        let loader = self
            .loader_factory
            .create_loader(&query.loader_type)
            .ok_or_else(|| {
                ReportingError::new(ErrorKind::DataLoaderNotFound(query.loader_type.clone()))
            })?;

        tracing::debug!(
            "Loading band [{}] with query [{}] ({})",
            definition.name,
            query.name,
            query.loader_type
        );
        loader.load_data(query, parent, params)
    }

    fn create_bands(
        &self,
        report: &Report,
        definition: &BandDefinition,
        parent: &BandData,
        params: &ParamMap,
    ) -> Result<Vec<BandData>> {
        let mut rows = self.load_rows(definition, parent, params)?;
        if rows.is_empty() && self.put_empty_row_if_no_data {
            rows.push(ParamMap::new());
        }

        let mut bands = Vec::with_capacity(rows.len());
        for row in rows {
            let mut band = BandData::new(definition.name.clone()).with_data(row);
            band.add_report_field_formats(&report.field_formats);

            let mut children = Vec::new();
            for child in &definition.children {
                children.extend(self.create_bands(report, child, &band, params)?);
            }
            band.add_children(children);
            bands.push(band);
        }

        tracing::trace!("Band [{}] produced {} rows", definition.name, bands.len());
        Ok(bands)
    }
}

impl DataExtractor for DefaultDataExtractor {
    fn extract_data(&self, report: &Report, params: &ParamMap, root: &mut BandData) -> Result<()> {
        let first_level: BTreeSet<String> = report
            .root_band
            .children
            .iter()
            .map(|definition| definition.name.clone())
            .collect();
        root.set_first_level_band_definition_names(first_level);

        for definition in &report.root_band.children {
            let bands = self.create_bands(report, definition, root, params)?;
            root.add_children(bands);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::Value;
    use serde_json::json;
    use std::collections::HashMap;

    /// Loader returning canned rows keyed by script and the parent band's id
    struct CannedLoader {
        rows: HashMap<String, Vec<ParamMap>>,
    }

    impl ReportDataLoader for CannedLoader {
        fn load_data(
            &self,
            query: &ReportQuery,
            parent: &BandData,
            _params: &ParamMap,
        ) -> Result<Vec<ParamMap>> {
            let key = match parent.field_text("id") {
                Some(id) => format!("{}:{}", query.script, id),
                None => query.script.clone(),
            };
            Ok(self.rows.get(&key).cloned().unwrap_or_default())
        }
    }

    struct Factory(Arc<CannedLoader>);

    impl LoaderFactory for Factory {
        fn create_loader(&self, loader_type: &str) -> Option<Arc<dyn ReportDataLoader>> {
            (loader_type == "canned").then(|| self.0.clone() as Arc<dyn ReportDataLoader>)
        }
    }

    fn row(pairs: &[(&str, Value)]) -> ParamMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn extractor() -> DefaultDataExtractor {
        let mut rows = HashMap::new();
        rows.insert(
            "customers".to_string(),
            vec![row(&[("id", json!(1))]), row(&[("id", json!(2))])],
        );
        rows.insert("orders:1".to_string(), vec![row(&[("total", json!(10))])]);
        DefaultDataExtractor::new(Arc::new(Factory(Arc::new(CannedLoader { rows }))))
    }

    fn report() -> Report {
        Report::builder("Customers")
            .band(
                BandDefinition::new("Customer")
                    .with_query(ReportQuery::new("q1", "customers", "canned"))
                    .with_child(
                        BandDefinition::new("Order")
                            .with_query(ReportQuery::new("q2", "orders", "canned")),
                    ),
            )
            .band(BandDefinition::new("Summary"))
            .field_format(crate::structure::ReportFieldFormat::new("Order.total", "0.00"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_extracts_nested_bands() {
        let mut root = BandData::root();
        extractor()
            .extract_data(&report(), &ParamMap::new(), &mut root)
            .expect("extraction succeeds");

        let customers: Vec<&BandData> = root.children_named("Customer").collect();
        assert_eq!(customers.len(), 2);

        let first_orders: Vec<&BandData> = customers[0].children_named("Order").collect();
        assert_eq!(first_orders.len(), 1);
        assert_eq!(first_orders[0].field("total"), Some(&json!(10)));
        assert_eq!(first_orders[0].field_format("Order.total").unwrap().format, "0.00");

        assert!(root.first_level_band_definition_names().contains("Summary"));
    }

    #[test]
    fn test_empty_row_policy() {
        let mut root = BandData::root();
        extractor()
            .extract_data(&report(), &ParamMap::new(), &mut root)
            .unwrap();

        // Customer 2 has no orders, but still gets one empty Order band
        let second = root.children_named("Customer").nth(1).unwrap();
        let orders: Vec<&BandData> = second.children_named("Order").collect();
        assert_eq!(orders.len(), 1);
        assert!(orders[0].data().is_empty());

        let mut root = BandData::root();
        extractor()
            .put_empty_row_if_no_data(false)
            .extract_data(&report(), &ParamMap::new(), &mut root)
            .unwrap();
        let second = root.children_named("Customer").nth(1).unwrap();
        assert_eq!(second.children_named("Order").count(), 0);
        assert!(root.find_child("Summary").is_none());
    }

    #[test]
    fn test_unknown_loader_type() {
        let report = Report::builder("Broken")
            .band(BandDefinition::new("Rows").with_query(ReportQuery::new("q", "x", "sql")))
            .build()
            .unwrap();

        let mut root = BandData::root();
        let err = extractor()
            .extract_data(&report, &ParamMap::new(), &mut root)
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DataLoaderNotFound("sql".to_string()));
    }
}
