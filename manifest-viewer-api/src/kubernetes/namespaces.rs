//! Namespace operations

use manifest_viewer_common::NamespaceSummary;

use crate::kubernetes::client::K8sClient;
#[cfg(not(feature = "kubernetes"))]
use crate::kubernetes::error::ClusterError;
use crate::kubernetes::error::ClusterResult;

/// List all namespaces
#[cfg(feature = "kubernetes")]
pub async fn list_namespaces(client: &K8sClient) -> ClusterResult<Vec<NamespaceSummary>> {
    use k8s_openapi::api::core::v1::Namespace;
    use kube::api::{Api, ListParams};

    let namespaces: Api<Namespace> = Api::all(client.inner().clone());
    let list = namespaces.list(&ListParams::default()).await?;

    tracing::debug!("Listed {} namespace(s)", list.items.len());
    Ok(list.items.into_iter().map(namespace_to_summary).collect())
}

#[cfg(feature = "kubernetes")]
fn namespace_to_summary(ns: k8s_openapi::api::core::v1::Namespace) -> NamespaceSummary {
    let metadata = ns.metadata;

    NamespaceSummary {
        name: metadata.name.unwrap_or_default(),
        status: ns.status.and_then(|s| s.phase),
        creation_timestamp: metadata.creation_timestamp.map(|t| t.0.to_rfc3339()),
    }
}

/// Whether a namespace is hidden as a system namespace
///
/// Exactly three rules: a `kube-` prefix, an `openshift-` prefix, or the name
/// `default`.
pub fn is_system_namespace(name: &str) -> bool {
    name.starts_with("kube-") || name.starts_with("openshift-") || name == "default"
}

/// Drop system namespaces, keeping the upstream order of the rest
pub fn filter_system_namespaces(namespaces: Vec<NamespaceSummary>) -> Vec<NamespaceSummary> {
    namespaces
        .into_iter()
        .filter(|ns| !is_system_namespace(&ns.name))
        .collect()
}

// Stubs
#[cfg(not(feature = "kubernetes"))]
pub async fn list_namespaces(_client: &K8sClient) -> ClusterResult<Vec<NamespaceSummary>> {
    Err(ClusterError::Internal("Kubernetes feature not enabled".to_string()))
}
