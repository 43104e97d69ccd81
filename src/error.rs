//! Error taxonomy for alias registry and table rename operations.
//!
//! Library operations return [`AliasError`]; the command-line layer wraps these
//! in `anyhow` with file and column context.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AliasError {
    #[error("Alias registry is frozen and cannot be modified")]
    Frozen,

    #[error("Alias '{alias}' already mapped to '{existing}' (requested '{requested}')")]
    Conflict {
        alias: String,
        existing: String,
        requested: String,
    },

    #[error("Alias(es) {aliases:?} would overwrite existing canonical columns")]
    Collision { aliases: Vec<String> },

    #[error("No '{key}' rename record attached to the table; was it canonicalized with remember enabled?")]
    MissingRecord { key: String },

    #[error("Rename record under '{key}' is malformed: {source}")]
    InvalidRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Alias map serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AliasError>;
