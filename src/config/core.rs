use super::ReportingSettings;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Environment prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "BANDREPORT_";

pub struct ReportingConfig {
    figment: Figment,
}

impl ReportingConfig {
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    pub fn load_with_custom_config(custom_config: Option<&str>) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        // Working directory config, any supported format
        figment = figment
            .merge(Toml::file("bandreport.toml"))
            .merge(Json::file("bandreport.json"))
            .merge(Yaml::file("bandreport.yaml"))
            .merge(Yaml::file("bandreport.yml"));

        if let Some(custom_path) = custom_config {
            if !std::path::Path::new(custom_path).exists() {
                anyhow::bail!("Config file not found: {}", custom_path);
            }
            figment = match custom_path.rsplit_once('.').map(|(_, ext)| ext) {
                Some("json") => figment.merge(Json::file(custom_path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(custom_path)),
                _ => figment.merge(Toml::file(custom_path)),
            };
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Ok(ReportingConfig { figment })
    }

    /// Typed settings, validated
    pub fn settings(&self) -> Result<ReportingSettings> {
        let settings: ReportingSettings = self
            .figment
            .extract()
            .context("Failed to read bandreport settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Get a nested object/section as JSON
    pub fn get_section(&self, path: &str) -> Result<serde_json::Value> {
        self.figment
            .extract_inner(path)
            .with_context(|| format!("Config section '{}' not found", path))
    }

    /// Get the full merged configuration as a structured value
    pub fn get_full_config(&self) -> Result<serde_json::Value> {
        Ok(self.figment.extract()?)
    }
}
