//! Object storage lister (S3 and anything else behind `object_store`)

use std::sync::Arc;

use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{ObjectMeta, ObjectStore};
use tracing::{debug, info};

use crate::config::S3ProviderConfig;
use crate::version::error::BackendError;
use crate::version::lister::EntryLister;

/// Lister that enumerates keys under the `<module>/<artifact>/` prefix.
///
/// The listing stream is drained across every page before any name is
/// returned. Keys nested deeper than the artifact prefix are skipped, mirroring
/// the filesystem lister ignoring sub-directories.
pub struct ObjectStoreLister {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreLister {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Build an S3 lister from provider configuration.
    ///
    /// Credentials missing from the configuration are picked up from the
    /// standard `AWS_*` environment variables.
    pub fn from_s3_config(config: &S3ProviderConfig) -> Result<Self, BackendError> {
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region);

        if let Some(endpoint) = &config.endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }
        if let Some(access_key) = &config.access_key {
            builder = builder.with_access_key_id(access_key);
        }
        if let Some(secret_key) = &config.secret_key {
            builder = builder.with_secret_access_key(secret_key);
        }

        let store = builder
            .build()
            .map_err(|e| BackendError::Configuration(e.to_string()))?;

        info!(
            "Initialized S3 client for bucket {} (endpoint: {}, region: {})",
            config.bucket,
            config.endpoint.as_deref().unwrap_or("default"),
            config.region
        );

        Ok(Self::new(Arc::new(store)))
    }
}

/// Strip the artifact prefix from a key, keeping only direct children
fn relative_name(meta: &ObjectMeta, key_prefix: &str) -> Option<String> {
    let name = meta.location.as_ref().strip_prefix(key_prefix)?;
    (!name.is_empty() && !name.contains('/')).then(|| name.to_string())
}

#[async_trait::async_trait]
impl EntryLister for ObjectStoreLister {
    async fn list_entry_names(
        &self,
        module_name: &str,
        artifact_name: &str,
    ) -> Result<Vec<String>, BackendError> {
        let prefix = Path::from(format!("{module_name}/{artifact_name}"));
        let key_prefix = format!("{prefix}/");

        let objects: Vec<ObjectMeta> = self.store.list(Some(&prefix)).try_collect().await?;

        debug!("Listed {} objects under {}", objects.len(), key_prefix);

        Ok(objects
            .iter()
            .filter_map(|meta| relative_name(meta, &key_prefix))
            .collect())
    }
}
