//! Local filesystem lister

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::version::error::BackendError;
use crate::version::lister::EntryLister;

/// Lister that reads `<base_path>/<module>/<artifact>` on the local filesystem.
///
/// Only regular entries directly inside the artifact directory are returned;
/// sub-directories are skipped.
pub struct LocalLister {
    base_path: PathBuf,
}

impl LocalLister {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

#[async_trait::async_trait]
impl EntryLister for LocalLister {
    async fn list_entry_names(
        &self,
        module_name: &str,
        artifact_name: &str,
    ) -> Result<Vec<String>, BackendError> {
        let path = self.base_path.join(module_name).join(artifact_name);
        let io_error = |source| BackendError::Io {
            path: path.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&path).await.map_err(io_error)?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
            if entry.file_type().await.map_err(io_error)?.is_dir() {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => warn!("Skipping non UTF-8 entry {:?} in {:?}", name, path),
            }
        }

        debug!("Found {} entries in {:?}", names.len(), path);
        Ok(names)
    }
}
