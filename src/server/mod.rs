//! HTTP query interface
//!
//! Every configured repository is mounted under `/api/<repository>` with:
//!
//! - `GET /{module}/{artifact}/versions`: all versions as a JSON array
//! - `GET /{module}/{artifact}/versions/latest`: the highest version as a JSON string
//!
//! # Modules
//!
//! - [`handlers`]: Request handlers for the version queries
//! - [`error`]: Mapping of failures to HTTP responses

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::version::error::BackendError;
use crate::version::listers::create_lister;
use crate::version::service::VersionService;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to set up provider for repository {repository:?}: {source}")]
    Provider {
        repository: String,
        #[source]
        source: BackendError,
    },

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Routes for a single repository, backed by its version service
fn repository_routes(service: Arc<VersionService>) -> Router {
    Router::new()
        .route("/{module}/{artifact}/versions", get(handlers::get_versions))
        .route(
            "/{module}/{artifact}/versions/latest",
            get(handlers::get_latest_version),
        )
        .with_state(service)
}

/// Build the application router from `(repository name, service)` pairs
pub fn build_router<I>(repositories: I) -> Router
where
    I: IntoIterator<Item = (String, Arc<VersionService>)>,
{
    repositories
        .into_iter()
        .fold(Router::new(), |router, (name, service)| {
            router.nest(&format!("/api/{name}"), repository_routes(service))
        })
        .layer(TraceLayer::new_for_http())
}

/// Create one version service per configured repository and mount them all
pub fn router_from_config(config: &Config) -> Result<Router, ServerError> {
    let mut repositories = Vec::with_capacity(config.repositories.len());

    for repository in &config.repositories {
        let provider_error = |source| ServerError::Provider {
            repository: repository.name.clone(),
            source,
        };

        let provider = config.providers.get(&repository.provider).ok_or_else(|| {
            provider_error(BackendError::Configuration(format!(
                "provider {:?} not found",
                repository.provider
            )))
        })?;
        let lister = create_lister(provider).map_err(provider_error)?;

        info!(
            "Serving repository {} from provider {} at /api/{}",
            repository.name, repository.provider, repository.name
        );
        repositories.push((
            repository.name.clone(),
            Arc::new(VersionService::new(lister)),
        ));
    }

    Ok(build_router(repositories))
}

/// Serve `router` on an already bound listener until `shutdown` resolves
pub async fn run<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: Config) -> Result<(), ServerError> {
    let router = router_from_config(&config)?;
    let listener = TcpListener::bind(config.bind_address()).await?;

    info!("Starting server on {}", listener.local_addr()?);

    run(listener, router, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        info!("Shutdown signal received");
    })
    .await?;

    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::lister::MockEntryLister;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn router_with_entries(entries: Vec<&'static str>) -> Router {
        let mut lister = MockEntryLister::new();
        lister
            .expect_list_entry_names()
            .returning(move |_, _| Ok(entries.iter().map(|s| s.to_string()).collect()));

        build_router([(
            "releases".to_string(),
            Arc::new(VersionService::new(Arc::new(lister))),
        )])
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };

        (status, json)
    }

    #[tokio::test]
    async fn get_versions_returns_json_array() {
        let router = router_with_entries(vec!["app1-1.0.0.txt", "app1-2.0.0.txt", "notes.md"]);

        let (status, json) = get_json(router, "/api/releases/fe/app1/versions").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!(["1.0.0", "2.0.0"]));
    }

    #[tokio::test]
    async fn get_latest_version_returns_json_string() {
        let router = router_with_entries(vec!["app1-1.0.0.txt", "app1-2.0.0.txt", "app1-1.5.0.txt"]);

        let (status, json) = get_json(router, "/api/releases/fe/app1/versions/latest").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, Value::String("2.0.0".to_string()));
    }

    #[tokio::test]
    async fn get_latest_version_returns_empty_string_when_nothing_found() {
        let router = router_with_entries(vec![]);

        let (status, json) = get_json(router, "/api/releases/fe/app1/versions/latest").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, Value::String(String::new()));
    }

    #[tokio::test]
    async fn get_latest_version_returns_500_for_invalid_version() {
        let router = router_with_entries(vec!["app1-2.0.0.txt", "app1-not-a-version.txt"]);

        let (status, json) = get_json(router, "/api/releases/fe/app1/versions/latest").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = json["error"].as_str().unwrap();
        assert!(message.starts_with("failed to get latest version: "), "{message}");
        assert!(message.contains("not-a-version"), "{message}");
    }

    #[tokio::test]
    async fn get_versions_returns_500_for_backend_error() {
        let mut lister = MockEntryLister::new();
        lister.expect_list_entry_names().returning(|_, _| {
            Err(BackendError::Configuration("bucket unreachable".to_string()))
        });
        let router = build_router([(
            "releases".to_string(),
            Arc::new(VersionService::new(Arc::new(lister))),
        )]);

        let (status, json) = get_json(router, "/api/releases/fe/app1/versions").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json["error"],
            "failed to get versions: failed to list entries: invalid storage configuration: bucket unreachable"
        );
    }

    #[tokio::test]
    async fn get_versions_rejects_path_traversal() {
        let mut lister = MockEntryLister::new();
        lister.expect_list_entry_names().never();
        let router = build_router([(
            "releases".to_string(),
            Arc::new(VersionService::new(Arc::new(lister))),
        )]);

        let (status, json) = get_json(router, "/api/releases/..%2F..%2Fetc/app1/versions").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], r#"invalid module name: "../../etc""#);
    }

    #[tokio::test]
    async fn unknown_repository_returns_404() {
        let router = router_with_entries(vec!["app1-1.0.0.txt"]);

        let (status, _) = get_json(router, "/api/snapshots/fe/app1/versions").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn router_from_config_serves_local_provider() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let artifact_dir = temp_dir.path().join("fe").join("app1");
        std::fs::create_dir_all(&artifact_dir).unwrap();
        for name in ["app1-0.1.0.txt", "app1-0.2.0.txt"] {
            std::fs::write(artifact_dir.join(name), b"").unwrap();
        }

        let config = Config::parse(
            &serde_json::json!({
                "repositories": [{ "name": "releases", "provider": "disk" }],
                "providers": { "disk": { "type": "local", "path": temp_dir.path() } }
            })
            .to_string(),
            crate::config::ConfigFormat::Json,
        )
        .unwrap();

        let router = router_from_config(&config).unwrap();
        let (status, json) = get_json(router, "/api/releases/fe/app1/versions/latest").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, "0.2.0");
    }
}
