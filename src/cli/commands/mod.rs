pub mod config;
pub mod name;
pub mod params;
pub mod version;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read a definition file: JSON for `.json`, YAML otherwise
pub fn load_definition<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
    } else {
        serde_yml::from_str(&content).with_context(|| format!("Invalid YAML in {}", path.display()))
    }
}
