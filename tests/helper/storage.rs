//! Storage test utilities

use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use async_trait::async_trait;
use object_store::ObjectStore;
use object_store::memory::InMemory;
use object_store::path::Path;
use tempfile::TempDir;

use version_index::version::error::BackendError;
use version_index::version::lister::EntryLister;

/// Lister returning fixed entry names per `module/artifact`
pub struct StaticLister {
    entries: HashMap<(String, String), Vec<String>>,
}

impl StaticLister {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn with_entries(mut self, module: &str, artifact: &str, names: Vec<&str>) -> Self {
        self.entries.insert(
            (module.to_string(), artifact.to_string()),
            names.into_iter().map(|n| n.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl EntryLister for StaticLister {
    async fn list_entry_names(
        &self,
        module_name: &str,
        artifact_name: &str,
    ) -> Result<Vec<String>, BackendError> {
        Ok(self
            .entries
            .get(&(module_name.to_string(), artifact_name.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

/// Create a temp directory holding empty files under `<module>/<artifact>/`
pub fn create_artifact_dir(module: &str, artifact: &str, files: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join(module).join(artifact);
    fs::create_dir_all(&dir).unwrap();
    for file in files {
        fs::write(dir.join(file), b"").unwrap();
    }
    temp_dir
}

/// Create an in-memory object store holding empty objects at `keys`
pub async fn create_object_store(keys: &[&str]) -> Arc<dyn ObjectStore> {
    let store = InMemory::new();
    for key in keys {
        store
            .put(&Path::from(*key), Vec::<u8>::new().into())
            .await
            .unwrap();
    }
    Arc::new(store)
}
