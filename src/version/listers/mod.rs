//! Storage lister implementations

pub mod local;
pub mod object_storage;

pub use local::LocalLister;
pub use object_storage::ObjectStoreLister;

use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::version::error::BackendError;
use crate::version::lister::EntryLister;

/// Create the lister backing a configured provider
pub fn create_lister(provider: &ProviderConfig) -> Result<Arc<dyn EntryLister>, BackendError> {
    match provider {
        ProviderConfig::Local(local) => Ok(Arc::new(LocalLister::new(&local.path))),
        ProviderConfig::S3(s3) => Ok(Arc::new(ObjectStoreLister::from_s3_config(s3)?)),
    }
}
