//! Version query handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use tracing::{info, warn};

use crate::names::is_path_safe;
use crate::server::error::ApiError;
use crate::version::service::VersionService;

fn validate_name(field: &'static str, value: &str) -> Result<(), ApiError> {
    if is_path_safe(value) {
        return Ok(());
    }

    warn!("Rejected {} name {:?}", field, value);
    Err(ApiError::InvalidName {
        field,
        value: value.to_string(),
    })
}

/// `GET /{module}/{artifact}/versions`
pub async fn get_versions(
    State(service): State<Arc<VersionService>>,
    Path((module_name, artifact_name)): Path<(String, String)>,
) -> Result<Json<Vec<String>>, ApiError> {
    validate_name("module", &module_name)?;
    validate_name("artifact", &artifact_name)?;

    info!(
        "Fetching versions for module: {}, artifact: {}",
        module_name, artifact_name
    );

    let versions = service
        .list_versions(&module_name, &artifact_name)
        .await
        .map_err(ApiError::Versions)?;

    Ok(Json(versions))
}

/// `GET /{module}/{artifact}/versions/latest`
///
/// Responds with an empty string when the artifact has no versions.
pub async fn get_latest_version(
    State(service): State<Arc<VersionService>>,
    Path((module_name, artifact_name)): Path<(String, String)>,
) -> Result<Json<String>, ApiError> {
    validate_name("module", &module_name)?;
    validate_name("artifact", &artifact_name)?;

    info!(
        "Fetching latest version for module: {}, artifact: {}",
        module_name, artifact_name
    );

    let latest = service
        .latest_version(&module_name, &artifact_name)
        .await
        .map_err(ApiError::LatestVersion)?;

    Ok(Json(latest.unwrap_or_default()))
}
