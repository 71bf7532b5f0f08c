use crate::adapters::generator::GeneratorSettings;
use crate::core::render::RenderSettings;
use crate::core::sitemap::DEFAULT_SITE_URL;
use crate::domain::model::DEFAULT_CATEGORY;
use crate::utils::error::{IngestError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range, validate_url,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env placeholder pattern is valid"));

/// Full tool configuration. Every section is optional in the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub ingest: IngestSection,
    pub render: RenderSettings,
    pub site: SiteConfig,
    pub generator: GeneratorSettings,
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSection {
    pub input_dir: String,
    pub output_dir: String,
    pub include_catalog: bool,
    pub default_category: String,
}

impl Default for IngestSection {
    fn default() -> Self {
        Self {
            input_dir: "public_html".to_string(),
            output_dir: "content/services".to_string(),
            include_catalog: true,
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub public_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SITE_URL.to_string(),
            public_dir: "public".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub token: Option<String>,
}

impl IngestConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(IngestError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| IngestError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("ingest.input_dir", &self.ingest.input_dir)?;
        validate_path("ingest.output_dir", &self.ingest.output_dir)?;
        validate_non_empty_string("ingest.default_category", &self.ingest.default_category)?;
        validate_path("render.default_cover", &self.render.default_cover)?;
        validate_url("site.base_url", &self.site.base_url)?;
        validate_path("site.public_dir", &self.site.public_dir)?;
        validate_url("generator.base_url", &self.generator.base_url)?;
        validate_non_empty_string("generator.model", &self.generator.model)?;
        validate_range("generator.temperature", self.generator.temperature, 0.0, 2.0)?;
        validate_positive_number("generator.timeout_seconds", self.generator.timeout_seconds, 1)?;
        Ok(())
    }
}

impl Validate for IngestConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
