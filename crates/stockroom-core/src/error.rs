//! Error type shared by every stockroom-core module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading records or loading datasets.
#[derive(Error, Debug)]
pub enum Error {
    #[error("record has no `id` field")]
    MissingId,

    #[error("record {id} has no field `{field}`")]
    MissingField { id: String, field: String },

    #[error("field `{field}` of record {id} cannot be searched as text")]
    NotStringifiable { id: String, field: String },

    #[error("failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("dataset entry {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("dataset is not a JSON array")]
    NotAnArray,

    #[error("unknown dataset `{0}`")]
    UnknownDataset(String),
}

pub type Result<T> = std::result::Result<T, Error>;
