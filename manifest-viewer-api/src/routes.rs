//! HTTP routes for the viewer API
//!
//! Every resource read goes through the shared [`ClusterSource`]; results are
//! passed back in upstream order, redacted unless `simplified=false`.
//!
//! [`ClusterSource`]: crate::kubernetes::ClusterSource

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware as axum_middleware,
    routing::get,
    Json, Router,
};
use manifest_viewer_common::{NamespaceSummary, PublicConfig, ResourceDocument, ResourceKind};
use serde::Deserialize;
use tower_http::services::{ServeDir, ServeFile};
use tracing::error;

use crate::error::ApiError;
use crate::health::{LivenessResponse, ReadinessResponse};
use crate::kubernetes::namespaces::filter_system_namespaces;
use crate::middleware::cors::{cors_middleware, CorsConfig};
use crate::state::AppState;

/// Query options shared by the resource endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub namespace: Option<String>,
    pub simplified: Option<String>,
}

impl ViewQuery {
    /// True unless the raw value is exactly `"false"`
    pub fn simplified(&self) -> bool {
        self.simplified.as_deref() != Some("false")
    }
}

/// Build the full application: API routes, CORS, and the static frontend as
/// fallback
pub fn router(state: Arc<AppState>) -> Router {
    let cors_config = CorsConfig::from(&state.config.cors);

    let static_dir = &state.config.server.static_dir;
    let serve_dir =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .merge(resource_routes())
        .merge(health_routes())
        .route("/api/config", get(public_config))
        .with_state(state)
        .layer(axum_middleware::from_fn(move |req, next| {
            cors_middleware(cors_config.clone(), req, next)
        }))
        .fallback_service(serve_dir)
}

// =============================================================================
// Route Builder Functions
// =============================================================================

/// Namespace and resource reads
fn resource_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/namespaces", get(list_namespaces))
        .route("/api/namespaces/:namespace/:kind", get(list_resources))
        .route("/api/namespaces/:namespace/:kind/:name", get(get_resource))
        .route("/api/:kind", get(list_default_namespace))
}

/// Liveness and readiness probes
fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/health/live", get(liveness_probe))
        .route("/api/health/ready", get(readiness_probe))
}

// =============================================================================
// Handlers
// =============================================================================

async fn list_namespaces(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<NamespaceSummary>>, ApiError> {
    let namespaces = state.cluster.list_namespaces().await.map_err(|e| {
        error!(error = %e, "Failed to list namespaces");
        ApiError::from(e)
    })?;

    if state.config.viewer.hide_system_namespaces {
        Ok(Json(filter_system_namespaces(namespaces)))
    } else {
        Ok(Json(namespaces))
    }
}

async fn list_resources(
    State(state): State<Arc<AppState>>,
    Path((namespace, kind)): Path<(String, String)>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<Vec<ResourceDocument>>, ApiError> {
    let kind: ResourceKind = kind.parse()?;
    list_kind(&state, kind, &namespace, query.simplified()).await
}

async fn list_default_namespace(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<Vec<ResourceDocument>>, ApiError> {
    let kind: ResourceKind = kind.parse()?;
    let namespace = query
        .namespace
        .clone()
        .unwrap_or_else(|| state.config.viewer.default_namespace.clone());

    list_kind(&state, kind, &namespace, query.simplified()).await
}

async fn list_kind(
    state: &AppState,
    kind: ResourceKind,
    namespace: &str,
    simplified: bool,
) -> Result<Json<Vec<ResourceDocument>>, ApiError> {
    let docs = state.cluster.list(kind, namespace).await.map_err(|e| {
        error!(namespace, kind = %kind, error = %e, "Failed to list resources");
        ApiError::from(e)
    })?;

    if simplified {
        Ok(Json(
            docs.into_iter()
                .map(|doc| state.redaction.apply_owned(doc))
                .collect(),
        ))
    } else {
        Ok(Json(docs))
    }
}

async fn get_resource(
    State(state): State<Arc<AppState>>,
    Path((namespace, kind, name)): Path<(String, String, String)>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ResourceDocument>, ApiError> {
    let kind: ResourceKind = kind.parse()?;

    let doc = state
        .cluster
        .get(kind, &namespace, &name)
        .await
        .map_err(|e| {
            error!(
                namespace = %namespace,
                kind = %kind,
                name = %name,
                error = %e,
                "Failed to get resource"
            );
            ApiError::from(e)
        })?;

    if query.simplified() {
        Ok(Json(state.redaction.apply_owned(doc)))
    } else {
        Ok(Json(doc))
    }
}

async fn public_config(State(state): State<Arc<AppState>>) -> Json<PublicConfig> {
    Json(state.config.public_config())
}

async fn health_check() -> &'static str {
    "OK"
}

/// Liveness probe for container orchestration
async fn liveness_probe(State(state): State<Arc<AppState>>) -> Json<LivenessResponse> {
    Json(state.health.liveness())
}

/// Readiness probe: the cluster API must answer
async fn readiness_probe(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let cluster = state.health.check_cluster(state.cluster.as_ref()).await;
    let response = state.health.readiness(vec![cluster]);

    if response.ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplified_defaults_to_true() {
        assert!(ViewQuery::default().simplified());
    }

    #[test]
    fn test_simplified_false_only_on_exact_value() {
        let query = |v: &str| ViewQuery {
            namespace: None,
            simplified: Some(v.to_string()),
        };

        assert!(!query("false").simplified());
        assert!(query("true").simplified());
        assert!(query("False").simplified());
        assert!(query("0").simplified());
        assert!(query("").simplified());
    }
}
