//! Common test utilities and helpers

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use manifest_viewer_api::{
    config::ViewerConfig,
    kubernetes::{error::ClusterError, error::ClusterResult, ClusterSource},
    router, AppState,
};
use manifest_viewer_common::{NamespaceSummary, ResourceDocument, ResourceKind};
use serde_json::{json, Value};
use tower::ServiceExt;

/// In-memory cluster keyed by (kind, namespace)
#[derive(Default)]
pub struct FakeCluster {
    pub namespaces: Vec<NamespaceSummary>,
    pub resources: HashMap<(ResourceKind, String), Vec<ResourceDocument>>,
    /// When set, every call fails with this message
    pub failure: Option<String>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn with_namespaces(mut self, names: &[&str]) -> Self {
        self.namespaces = names
            .iter()
            .map(|name| NamespaceSummary {
                name: name.to_string(),
                status: Some("Active".to_string()),
                creation_timestamp: Some("2024-01-01T00:00:00+00:00".to_string()),
            })
            .collect();
        self
    }

    pub fn with_resource(mut self, kind: ResourceKind, namespace: &str, doc: Value) -> Self {
        let doc = ResourceDocument::try_from(doc).expect("test document must be an object");
        self.resources
            .entry((kind, namespace.to_string()))
            .or_default()
            .push(doc);
        self
    }

    fn check(&self) -> ClusterResult<()> {
        match &self.failure {
            Some(message) => Err(ClusterError::Internal(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ClusterSource for FakeCluster {
    async fn list_namespaces(&self) -> ClusterResult<Vec<NamespaceSummary>> {
        self.check()?;
        Ok(self.namespaces.clone())
    }

    async fn list(
        &self,
        kind: ResourceKind,
        namespace: &str,
    ) -> ClusterResult<Vec<ResourceDocument>> {
        self.check()?;
        Ok(self
            .resources
            .get(&(kind, namespace.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn get(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> ClusterResult<ResourceDocument> {
        self.check()?;
        self.resources
            .get(&(kind, namespace.to_string()))
            .and_then(|docs| docs.iter().find(|d| d.name() == Some(name)))
            .cloned()
            .ok_or_else(|| {
                ClusterError::Internal(format!("{} \"{}\" not found", kind.kind(), name))
            })
    }
}

/// A pod as the API server would return it
pub fn sample_pod(name: &str, namespace: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": format!("uid-{}", name),
            "labels": {"app": "web"},
            "annotations": {
                "kubectl.kubernetes.io/last-applied-configuration": "{}",
                "team": "payments"
            },
            "managedFields": [{"manager": "kubectl", "operation": "Apply"}]
        },
        "spec": {"containers": [{"name": "web", "image": "nginx:1.25"}]},
        "status": {
            "phase": "Running",
            "conditions": [{"type": "Ready", "status": "True"}]
        }
    })
}

/// Test environment: the real router over a fake cluster
pub struct TestEnv {
    pub app: Router,
}

impl TestEnv {
    pub fn new(cluster: FakeCluster) -> Self {
        Self::with_config(cluster, ViewerConfig::default())
    }

    pub fn with_config(cluster: FakeCluster, config: ViewerConfig) -> Self {
        let state = Arc::new(AppState::new(config, Arc::new(cluster)));
        TestEnv { app: router(state) }
    }

    /// Issue a GET and return the status with the raw body
    pub async fn get_raw(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = self
            .app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    /// Issue a GET and parse the body as JSON
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get_raw(uri).await;
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }
}
