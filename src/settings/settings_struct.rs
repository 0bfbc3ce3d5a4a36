use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Missing required setting '{0}'")]
    Missing(&'static str),

    #[error("Invalid setting '{0}': {1}")]
    Invalid(&'static str, String),
}

/// Settings for one generation run
///
/// Every path the pipeline touches lives here, so the core stays free of
/// process-wide constants. Values come from the defaults below, an optional
/// settings file and finally the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base Clash configuration holding the `proxies` list (file or URL)
    pub base_config: String,
    /// Directive file with `ruleset=` and `custom_proxy_group=` lines (file or URL)
    pub directives: String,
    /// Where the generated configuration is written
    pub output: String,
    /// JSON Schema the generated configuration must satisfy
    pub schema: String,
    /// Timeout in seconds for each remote download
    pub timeout_secs: u64,
    /// User agent sent with every remote download
    pub user_agent: String,
    /// Proxy for ruleset downloads: empty or `SYSTEM` follows the environment,
    /// `NONE` connects directly, anything else is a proxy URL
    pub proxy_ruleset: String,
}

// Default value functions for serde
pub fn default_base_config() -> String {
    "clash_self.yaml".to_string()
}

pub fn default_directives() -> String {
    "self_config.ini".to_string()
}

pub fn default_output() -> String {
    "self_conf_new.yaml".to_string()
}

pub fn default_schema() -> String {
    "meta-json-schema.json".to_string()
}

pub fn default_timeout_secs() -> u64 {
    15
}

pub fn default_user_agent() -> String {
    "Clash Meta".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_config: default_base_config(),
            directives: default_directives(),
            output: default_output(),
            schema: default_schema(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            proxy_ruleset: String::new(),
        }
    }
}

impl Settings {
    /// Create a new settings instance with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from TOML or YAML content
    ///
    /// Missing keys keep their defaults.
    pub fn load_from_content(content: &str) -> Result<Self, SettingsError> {
        if toml::from_str::<toml::Table>(content).is_ok() {
            debug!("Parsing settings as TOML");
            return Ok(toml::from_str(content)?);
        }

        debug!("Parsing settings as YAML");
        let settings: Option<Settings> = serde_yaml::from_str(content)?;
        Ok(settings.unwrap_or_default())
    }

    /// Load settings from a local file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_content(&content)
    }

    /// Check that every required value is usable
    pub fn validate(&self) -> Result<(), SettingsError> {
        let required = [
            ("base_config", &self.base_config),
            ("directives", &self.directives),
            ("output", &self.output),
            ("schema", &self.schema),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(SettingsError::Missing(name));
            }
        }

        if self.timeout_secs == 0 {
            return Err(SettingsError::Invalid(
                "timeout_secs",
                "must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
