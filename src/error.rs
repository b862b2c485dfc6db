use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML payload: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported quiz file extension: {0:?} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
    #[error("payload contains no questions")]
    Empty,
}
