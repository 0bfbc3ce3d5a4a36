//! JSON Schema validation of generated configs
//!
//! The schema is compiled once when loaded. Validation runs on the in-memory
//! document, before anything is written to disk.

use std::path::Path;

use jsonschema::Validator;
use log::info;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Failed to read schema '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema '{path}' is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Schema '{path}' could not be compiled: {message}")]
    Compile { path: String, message: String },

    #[error("Config cannot be represented as JSON: {0}")]
    Convert(#[from] serde_json::Error),

    #[error("Config does not match schema:\n  {}", .errors.join("\n  "))]
    Invalid { errors: Vec<String> },
}

/// Compiled schema ready to check generated configs
pub struct SchemaValidator {
    validator: Validator,
}

impl SchemaValidator {
    /// Load and compile a schema from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|source| ValidationError::Read {
            path: display.clone(),
            source,
        })?;
        let schema: JsonValue =
            serde_json::from_str(&content).map_err(|source| ValidationError::Parse {
                path: display.clone(),
                source,
            })?;

        Self::from_value(&schema).map_err(|e| match e {
            ValidationError::Compile { message, .. } => ValidationError::Compile {
                path: display,
                message,
            },
            other => other,
        })
    }

    /// Compile an already parsed schema
    pub fn from_value(schema: &JsonValue) -> Result<Self, ValidationError> {
        let validator =
            jsonschema::validator_for(schema).map_err(|e| ValidationError::Compile {
                path: String::new(),
                message: e.to_string(),
            })?;
        Ok(SchemaValidator { validator })
    }

    /// Check a config against the schema, reporting every violation
    pub fn validate(&self, config: &YamlValue) -> Result<(), ValidationError> {
        let instance = serde_json::to_value(config)?;

        let errors: Vec<String> = self
            .validator
            .iter_errors(&instance)
            .map(|e| e.to_string())
            .collect();

        if !errors.is_empty() {
            return Err(ValidationError::Invalid { errors });
        }

        info!("Config matches schema");
        Ok(())
    }
}
