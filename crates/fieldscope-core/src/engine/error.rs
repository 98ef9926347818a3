use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::domain::DomainError;
use crate::core::models::scene::{SceneLoadError, SourceError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene object {index} could not be converted: {source}")]
    Source {
        index: usize,
        #[source]
        source: SourceError,
    },

    #[error("Invalid sampling domain: {0}")]
    Domain(#[from] DomainError),

    #[error(transparent)]
    SceneLoad(#[from] SceneLoadError),

    #[error("No sampling domain was provided by the scene or the command line")]
    MissingDomain,
}

impl From<(usize, SourceError)> for EngineError {
    fn from((index, source): (usize, SourceError)) -> Self {
        EngineError::Source { index, source }
    }
}
