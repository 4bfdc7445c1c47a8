use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetaError {
    #[error("Extended attributes are not supported for {}", path.display())]
    Capability { path: PathBuf },

    #[error("Failed to encode metadata: {0}")]
    Encode(String),

    #[error("Failed to decode metadata: {0}")]
    Decode(String),

    #[error("Unknown metadata variant: {0}")]
    UnknownVariant(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MetaError>;
