//! API client for communicating with the viewer backend
//!
//! The UI is served by the gateway itself, so every URL is relative.

use manifest_viewer_common::{
    ErrorResponse, NamespaceSummary, PublicConfig, ResourceDocument, ResourceKind,
};
use serde::de::DeserializeOwned;

/// Generic JSON fetch helper
pub async fn fetch_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = reqwasm::http::Request::get(path)
        .send()
        .await
        .map_err(|e| ApiError { message: e.to_string() })?;

    if response.ok() {
        response.json().await.map_err(|e| ApiError { message: e.to_string() })
    } else {
        let status = response.status();
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.message,
            Err(_) => format!("HTTP {}", status),
        };
        Err(ApiError { message })
    }
}

pub async fn get_config() -> Result<PublicConfig, ApiError> {
    fetch_json("/api/config").await
}

pub async fn get_namespaces() -> Result<Vec<NamespaceSummary>, ApiError> {
    fetch_json("/api/namespaces").await
}

pub async fn get_resources(
    namespace: &str,
    kind: ResourceKind,
    simplified: bool,
) -> Result<Vec<ResourceDocument>, ApiError> {
    fetch_json(&resources_path(namespace, kind, simplified)).await
}

pub fn resources_path(namespace: &str, kind: ResourceKind, simplified: bool) -> String {
    format!(
        "/api/namespaces/{}/{}?simplified={}",
        urlencoding::encode(namespace),
        kind.plural(),
        simplified
    )
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
