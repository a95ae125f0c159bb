//! Version lookups for a single repository
//!
//! Combines a storage lister with version extraction and semver ordering.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::version::error::VersionError;
use crate::version::extract::extract_version;
use crate::version::lister::EntryLister;
use crate::version::semver::find_latest;

pub struct VersionService {
    lister: Arc<dyn EntryLister>,
}

impl VersionService {
    pub fn new(lister: Arc<dyn EntryLister>) -> Self {
        Self { lister }
    }

    /// List every version stored for an artifact, in the order the backend returned them.
    ///
    /// Entries that do not follow the `<artifact>-<version>` naming are skipped.
    pub async fn list_versions(
        &self,
        module_name: &str,
        artifact_name: &str,
    ) -> Result<Vec<String>, VersionError> {
        let names = self
            .lister
            .list_entry_names(module_name, artifact_name)
            .await
            .inspect_err(|e| {
                error!(
                    "Failed to list entries for {}/{}: {}",
                    module_name, artifact_name, e
                )
            })?;

        let versions: Vec<String> = names
            .iter()
            .filter_map(|name| extract_version(name, artifact_name))
            .map(str::to_string)
            .collect();

        debug!(
            "Extracted {} versions from {} entries for {}/{}",
            versions.len(),
            names.len(),
            module_name,
            artifact_name
        );

        Ok(versions)
    }

    /// Resolve the highest version of an artifact by semver precedence.
    ///
    /// Returns `Ok(None)` when no version is stored. Fails if any stored version
    /// is not valid semver.
    pub async fn latest_version(
        &self,
        module_name: &str,
        artifact_name: &str,
    ) -> Result<Option<String>, VersionError> {
        let versions = self.list_versions(module_name, artifact_name).await?;

        if versions.is_empty() {
            info!("No versions found for {}/{}", module_name, artifact_name);
            return Ok(None);
        }

        find_latest(&versions).inspect_err(|e| {
            error!(
                "Failed to resolve latest version for {}/{}: {}",
                module_name, artifact_name, e
            )
        })
    }
}
