use crate::utils::parser::ParseError;
use fieldscope::core::physics::layers::LayerError;
use fieldscope::engine::error::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    FieldScopeCore(#[from] EngineError),

    #[error("Invalid layer system: {0}")]
    Layers(#[from] LayerError),

    #[error("Invalid argument: {0}")]
    Parse(#[from] ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
