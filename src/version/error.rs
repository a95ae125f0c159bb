use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to read directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list objects: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("invalid storage configuration: {0}")]
    Configuration(String),
}

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("failed to list entries: {0}")]
    Backend(#[from] BackendError),

    #[error("failed to parse version {version:?}: {source}")]
    Parse {
        version: String,
        #[source]
        source: semver::Error,
    },
}
