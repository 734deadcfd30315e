//! Output file naming
//!
//! Templates may carry a naming pattern such as `${Root.fileName}-summary`.
//! Only the first `${band.field}` placeholder is substituted; a pattern without
//! one is used as written.

use crate::band::{BandData, ROOT_BAND_NAME};
use crate::error::{ErrorKind, ReportingError, Result};
use crate::structure::{OutputType, ReportTemplate};
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\$\{([A-Za-z0-9_]+)\.([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid");
}

/// Compute the produced file name for `template` rendered as `output_type`
///
/// The tree is only read. Unless `output_type` is the custom type, whatever
/// follows the last `.` of the base name is replaced by the output extension.
pub fn resolve_output_file_name(
    template: &ReportTemplate,
    output_type: &OutputType,
    root: &BandData,
) -> Result<String> {
    let base = match template
        .output_name_pattern
        .as_deref()
        .filter(|pattern| !pattern.trim().is_empty())
    {
        Some(pattern) => expand_pattern(pattern, root)?,
        None => template.document_name.clone(),
    };

    if output_type.is_custom() {
        return Ok(base);
    }

    let stem = base.rsplit_once('.').map_or(base.as_str(), |(stem, _)| stem);
    Ok(format!("{}.{}", stem, output_type.extension()))
}

fn expand_pattern(pattern: &str, root: &BandData) -> Result<String> {
    let Some(captures) = PLACEHOLDER.captures(pattern) else {
        tracing::debug!("Output name pattern [{}] has no placeholder", pattern);
        return Ok(pattern.to_string());
    };

    let band_name = &captures[1];
    let field_name = &captures[2];

    let band = if band_name.eq_ignore_ascii_case(ROOT_BAND_NAME) {
        Some(root)
    } else {
        root.find_band_recursively(band_name)
    }
    .ok_or_else(|| ReportingError::new(ErrorKind::OutputNamingBandNotFound(band_name.to_string())))?;

    let value = band.field_text(field_name).ok_or_else(|| {
        ReportingError::new(ErrorKind::OutputNamingFieldNotFound {
            band: band_name.to_string(),
            field: field_name.to_string(),
        })
    })?;

    Ok(PLACEHOLDER.replace(pattern, NoExpand(&value)).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn root_with(field: &str, value: serde_json::Value) -> BandData {
        let mut root = BandData::root();
        root.add_data(field, value);
        root
    }

    fn template(pattern: Option<&str>) -> ReportTemplate {
        let template = ReportTemplate::new("template.xlsx", OutputType::XLSX);
        match pattern {
            Some(pattern) => template.with_output_name_pattern(pattern),
            None => template,
        }
    }

    #[test]
    fn test_root_placeholder() {
        let root = root_with("fileName", json!("invoice"));
        let name = resolve_output_file_name(&template(Some("${root.fileName}")), &OutputType::PDF, &root);
        assert_eq!(name.unwrap(), "invoice.pdf");

        let name = resolve_output_file_name(&template(Some("${Root.fileName}")), &OutputType::PDF, &root);
        assert_eq!(name.unwrap(), "invoice.pdf");
    }

    #[test]
    fn test_no_pattern_uses_document_name() {
        let name = resolve_output_file_name(&template(None), &OutputType::PDF, &BandData::root());
        assert_eq!(name.unwrap(), "template.pdf");

        let name = resolve_output_file_name(&template(Some("  ")), &OutputType::DOCX, &BandData::root());
        assert_eq!(name.unwrap(), "template.docx");
    }

    #[test]
    fn test_unknown_band() {
        let err = resolve_output_file_name(
            &template(Some("${Orders.number}")),
            &OutputType::PDF,
            &BandData::root(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::OutputNamingBandNotFound("Orders".into()));
    }

    #[test]
    fn test_missing_or_null_field() {
        let expected = ErrorKind::OutputNamingFieldNotFound {
            band: "Root".into(),
            field: "fileName".into(),
        };

        let err = resolve_output_file_name(&template(Some("${Root.fileName}")), &OutputType::PDF, &BandData::root())
            .unwrap_err();
        assert_eq!(err.kind(), &expected);

        let root = root_with("fileName", serde_json::Value::Null);
        let err = resolve_output_file_name(&template(Some("${Root.fileName}")), &OutputType::PDF, &root)
            .unwrap_err();
        assert_eq!(err.kind(), &expected);
    }

    #[test]
    fn test_custom_output_keeps_name() {
        let root = root_with("fileName", json!("export.v2.bin"));
        let name = resolve_output_file_name(&template(Some("${Root.fileName}")), &OutputType::CUSTOM, &root);
        assert_eq!(name.unwrap(), "export.v2.bin");
    }

    #[test]
    fn test_pattern_without_placeholder_is_verbatim() {
        let name = resolve_output_file_name(&template(Some("${broken")), &OutputType::CUSTOM, &BandData::root());
        assert_eq!(name.unwrap(), "${broken");

        let name = resolve_output_file_name(&template(Some("summary.txt")), &OutputType::CSV, &BandData::root());
        assert_eq!(name.unwrap(), "summary.csv");
    }

    #[test]
    fn test_only_first_placeholder_substituted() {
        let root = root_with("id", json!(42));
        let name = resolve_output_file_name(
            &template(Some("order-${Root.id}-${Root.id}")),
            &OutputType::CUSTOM,
            &root,
        );
        assert_eq!(name.unwrap(), "order-42-${Root.id}");
    }

    #[test]
    fn test_nested_band_uses_first_match() {
        let mut root = BandData::root();
        root.add_child(
            BandData::new("Header")
                .with_child(BandData::new("Line").with_data([("sku".to_string(), json!("A-1"))].into())),
        );
        root.add_child(BandData::new("Line").with_data([("sku".to_string(), json!("B-2"))].into()));

        let name = resolve_output_file_name(&template(Some("${Line.sku}")), &OutputType::PDF, &root);
        assert_eq!(name.unwrap(), "A-1.pdf");
    }

    #[test]
    fn test_replacement_text_is_literal() {
        let root = root_with("fileName", json!("cost$1"));
        let name = resolve_output_file_name(&template(Some("${Root.fileName}")), &OutputType::PDF, &root);
        assert_eq!(name.unwrap(), "cost$1.pdf");
    }
}
