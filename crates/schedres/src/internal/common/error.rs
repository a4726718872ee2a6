use thiserror::Error;

use crate::internal::common::resources::{InsufficientResources, QuantityError};

#[allow(clippy::enum_variant_names)]
#[derive(Debug, Error)]
pub enum SchedError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid quantity: {0}")]
    QuantityError(#[from] QuantityError),
    #[error(transparent)]
    InsufficientResources(#[from] InsufficientResources),
}

impl From<serde_json::error::Error> for SchedError {
    fn from(e: serde_json::error::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for SchedError {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}
