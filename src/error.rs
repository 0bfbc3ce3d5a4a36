use thiserror::Error;

use crate::generator::config::group::GroupError;
use crate::settings::SettingsError;
use crate::utils::http::FetchError;
use crate::validator::ValidationError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to load {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: FetchError,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid base config: {0}")]
    InvalidBaseConfig(String),

    #[error("Invalid proxy group: {0}")]
    Group(#[from] GroupError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
