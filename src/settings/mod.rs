//! Settings module for clashgen
//!
//! This module contains the run configuration and its loaders

pub mod settings_struct;

// Re-export settings struct and errors
pub use settings_struct::{Settings, SettingsError};
