pub mod error;
pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod rulesets;
pub mod settings;
pub mod utils;
pub mod validator;

// Re-export the pipeline entry points for easier access
pub use error::{Error, Result};
pub use interfaces::{generate, render_config, GenerationReport};
pub use settings::Settings;
