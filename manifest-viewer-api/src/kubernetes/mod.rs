//! Cluster access for the manifest viewer
//!
//! The gateway only talks to the cluster through [`ClusterSource`]. The
//! production implementation, [`KubeClusterSource`], is a thin pass-through
//! over kube-rs; tests substitute an in-memory source.

pub mod client;
pub mod error;
pub mod namespaces;
pub mod resources;

use async_trait::async_trait;
use manifest_viewer_common::{NamespaceSummary, ResourceDocument, ResourceKind};

use client::K8sClient;
use error::ClusterResult;

/// Read-only view of a cluster
#[async_trait]
pub trait ClusterSource: Send + Sync {
    /// All namespaces, unfiltered, in upstream order
    async fn list_namespaces(&self) -> ClusterResult<Vec<NamespaceSummary>>;

    /// All objects of `kind` in `namespace`, in upstream order
    async fn list(
        &self,
        kind: ResourceKind,
        namespace: &str,
    ) -> ClusterResult<Vec<ResourceDocument>>;

    /// One named object of `kind` in `namespace`
    async fn get(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> ClusterResult<ResourceDocument>;
}

/// [`ClusterSource`] backed by the Kubernetes API server
#[derive(Debug, Clone)]
pub struct KubeClusterSource {
    client: K8sClient,
}

impl KubeClusterSource {
    pub fn new(client: K8sClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterSource for KubeClusterSource {
    async fn list_namespaces(&self) -> ClusterResult<Vec<NamespaceSummary>> {
        namespaces::list_namespaces(&self.client).await
    }

    async fn list(
        &self,
        kind: ResourceKind,
        namespace: &str,
    ) -> ClusterResult<Vec<ResourceDocument>> {
        resources::list_resources(&self.client, kind, namespace).await
    }

    async fn get(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> ClusterResult<ResourceDocument> {
        resources::get_resource(&self.client, kind, namespace, name).await
    }
}
