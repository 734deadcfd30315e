//! Band data tree
//!
//! A [`BandData`] is one node of the hierarchical data a report run produces:
//! a named record of field values plus ordered child bands. The root node is
//! named [`ROOT_BAND_NAME`] and holds the resolved parameters as its data.
//!
//! The tree is built mutably during extraction and only read afterwards;
//! rendering and naming receive `&BandData`.

use crate::structure::{ParamMap, ReportFieldFormat, Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Reserved name of the root band
pub const ROOT_BAND_NAME: &str = "Root";

/// A named node of the band tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandData {
    name: String,

    #[serde(default)]
    data: ParamMap,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<BandData>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    field_formats: BTreeMap<String, ReportFieldFormat>,

    /// Names of the band definitions directly under the root, including ones that produced no rows
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    first_level_band_definition_names: BTreeSet<String>,
}

impl BandData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: ParamMap::new(),
            children: Vec::new(),
            field_formats: BTreeMap::new(),
            first_level_band_definition_names: BTreeSet::new(),
        }
    }

    /// Empty root band
    pub fn root() -> Self {
        Self::new(ROOT_BAND_NAME)
    }

    pub fn with_data(mut self, data: ParamMap) -> Self {
        self.data = data;
        self
    }

    pub fn with_child(mut self, child: BandData) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_root(&self) -> bool {
        self.name == ROOT_BAND_NAME
    }

    pub fn data(&self) -> &ParamMap {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ParamMap {
        &mut self.data
    }

    pub fn set_data(&mut self, data: ParamMap) {
        self.data = data;
    }

    pub fn add_data(&mut self, field: impl Into<String>, value: Value) {
        self.data.insert(field.into(), value);
    }

    /// Field value, `None` when absent
    pub fn field(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// Textual form of a field, `None` when absent or null
    pub fn field_text(&self, field: &str) -> Option<String> {
        self.field(field).and_then(value_to_text)
    }

    pub fn children(&self) -> &[BandData] {
        &self.children
    }

    pub fn add_child(&mut self, child: BandData) {
        self.children.push(child);
    }

    pub fn add_children(&mut self, children: impl IntoIterator<Item = BandData>) {
        self.children.extend(children);
    }

    /// Direct children with the given name, in insertion order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a BandData> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// First direct child with the given name
    pub fn find_child(&self, name: &str) -> Option<&BandData> {
        self.children.iter().find(|child| child.name == name)
    }

    /// First band with the given name in pre-order depth-first traversal,
    /// starting with this band and following child insertion order
    pub fn find_band_recursively(&self, name: &str) -> Option<&BandData> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_band_recursively(name))
    }

    /// Every band of the subtree, pre-order
    pub fn iter(&self) -> BandIter<'_> {
        BandIter { stack: vec![self] }
    }

    pub fn field_formats(&self) -> &BTreeMap<String, ReportFieldFormat> {
        &self.field_formats
    }

    pub fn field_format(&self, field: &str) -> Option<&ReportFieldFormat> {
        self.field_formats.get(field)
    }

    pub fn add_report_field_formats<'a>(
        &mut self,
        formats: impl IntoIterator<Item = &'a ReportFieldFormat>,
    ) {
        for format in formats {
            self.field_formats
                .insert(format.name.clone(), format.clone());
        }
    }

    pub fn first_level_band_definition_names(&self) -> &BTreeSet<String> {
        &self.first_level_band_definition_names
    }

    pub fn set_first_level_band_definition_names(&mut self, names: BTreeSet<String>) {
        self.first_level_band_definition_names = names;
    }
}

/// Pre-order iterator over a band subtree
pub struct BandIter<'a> {
    stack: Vec<&'a BandData>,
}

impl<'a> Iterator for BandIter<'a> {
    type Item = &'a BandData;

    fn next(&mut self) -> Option<Self::Item> {
        let band = self.stack.pop()?;
        self.stack.extend(band.children.iter().rev());
        Some(band)
    }
}

/// Text used when a value is substituted into names or logs
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
