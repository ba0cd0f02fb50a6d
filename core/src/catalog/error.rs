//! Error types for catalog construction

use std::path::PathBuf;
use thiserror::Error;

/// Errors while building or loading an event catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("duplicate event id '{id}'")]
    DuplicateId { id: String },

    #[error("invalid event definition '{id}': {reason}")]
    InvalidDefinition { id: String, reason: String },

    #[error("catalog contains no events")]
    Empty,
}

impl CatalogError {
    pub(crate) fn invalid(id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
