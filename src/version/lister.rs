//! Lister trait for enumerating artifact entries in a storage backend

#[cfg(test)]
use mockall::automock;

use crate::version::error::BackendError;

/// Trait for listing the entries stored for an artifact
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait EntryLister: Send + Sync {
    /// Lists the entry names stored under `module_name/artifact_name`
    ///
    /// # Arguments
    /// * `module_name` - Namespace grouping the artifact (e.g., "fe")
    /// * `artifact_name` - Name of the artifact (e.g., "app1")
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Entry names relative to the artifact directory, in backend order
    /// * `Err(BackendError)` - If the listing fails
    async fn list_entry_names(
        &self,
        module_name: &str,
        artifact_name: &str,
    ) -> Result<Vec<String>, BackendError>;
}
