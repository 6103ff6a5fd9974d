//! Namespaced resource listing
//!
//! Pods, deployments and services go through their typed k8s-openapi APIs.
//! Routes are an OpenShift custom resource and go through `DynamicObject`.
//! Every object is handed back as a [`ResourceDocument`] in upstream order.

use manifest_viewer_common::{ResourceDocument, ResourceKind};

use crate::kubernetes::client::K8sClient;
#[cfg(not(feature = "kubernetes"))]
use crate::kubernetes::error::ClusterError;
use crate::kubernetes::error::ClusterResult;

/// List every object of `kind` in `namespace`
#[cfg(feature = "kubernetes")]
pub async fn list_resources(
    client: &K8sClient,
    kind: ResourceKind,
    namespace: &str,
) -> ClusterResult<Vec<ResourceDocument>> {
    use k8s_openapi::api::apps::v1::Deployment;
    use k8s_openapi::api::core::v1::{Pod, Service};

    let docs = match kind {
        ResourceKind::Pods => list_typed::<Pod>(client, namespace).await?,
        ResourceKind::Deployments => list_typed::<Deployment>(client, namespace).await?,
        ResourceKind::Services => list_typed::<Service>(client, namespace).await?,
        ResourceKind::Routes => list_dynamic(client, kind, namespace).await?,
    };

    tracing::debug!(
        kind = %kind,
        namespace = namespace,
        count = docs.len(),
        "Listed resources"
    );
    Ok(docs)
}

/// Get one named object of `kind` in `namespace`
#[cfg(feature = "kubernetes")]
pub async fn get_resource(
    client: &K8sClient,
    kind: ResourceKind,
    namespace: &str,
    name: &str,
) -> ClusterResult<ResourceDocument> {
    use k8s_openapi::api::apps::v1::Deployment;
    use k8s_openapi::api::core::v1::{Pod, Service};
    use kube::api::{Api, DynamicObject};

    let inner = client.inner().clone();

    match kind {
        ResourceKind::Pods => {
            to_document(&Api::<Pod>::namespaced(inner, namespace).get(name).await?)
        }
        ResourceKind::Deployments => {
            to_document(&Api::<Deployment>::namespaced(inner, namespace).get(name).await?)
        }
        ResourceKind::Services => {
            to_document(&Api::<Service>::namespaced(inner, namespace).get(name).await?)
        }
        ResourceKind::Routes => {
            let api: Api<DynamicObject> =
                Api::namespaced_with(inner, namespace, &api_resource(kind));
            to_document(&api.get(name).await?)
        }
    }
}

#[cfg(feature = "kubernetes")]
async fn list_typed<K>(client: &K8sClient, namespace: &str) -> ClusterResult<Vec<ResourceDocument>>
where
    K: kube::Resource<Scope = k8s_openapi::NamespaceResourceScope>
        + Clone
        + std::fmt::Debug
        + serde::de::DeserializeOwned
        + serde::Serialize,
    <K as kube::Resource>::DynamicType: Default,
{
    use kube::api::{Api, ListParams};

    let api: Api<K> = Api::namespaced(client.inner().clone(), namespace);
    let list = api.list(&ListParams::default()).await?;

    list.items.iter().map(to_document).collect()
}

#[cfg(feature = "kubernetes")]
async fn list_dynamic(
    client: &K8sClient,
    kind: ResourceKind,
    namespace: &str,
) -> ClusterResult<Vec<ResourceDocument>> {
    use kube::api::{Api, DynamicObject, ListParams};

    let api: Api<DynamicObject> =
        Api::namespaced_with(client.inner().clone(), namespace, &api_resource(kind));
    let list = api.list(&ListParams::default()).await?;

    list.items.iter().map(to_document).collect()
}

/// API coordinates for kinds served through `DynamicObject`
#[cfg(feature = "kubernetes")]
fn api_resource(kind: ResourceKind) -> kube::api::ApiResource {
    use kube::api::{ApiResource, GroupVersionKind};

    let gvk = GroupVersionKind::gvk(kind.group(), kind.version(), kind.kind());
    ApiResource::from_gvk_with_plural(&gvk, kind.plural())
}

#[cfg(feature = "kubernetes")]
fn to_document<T: serde::Serialize>(object: &T) -> ClusterResult<ResourceDocument> {
    let value = serde_json::to_value(object)?;
    Ok(ResourceDocument::try_from(value)?)
}

// Stub implementations when kubernetes feature is disabled
#[cfg(not(feature = "kubernetes"))]
pub async fn list_resources(
    _client: &K8sClient,
    _kind: ResourceKind,
    _namespace: &str,
) -> ClusterResult<Vec<ResourceDocument>> {
    Err(ClusterError::Internal("Kubernetes feature not enabled".to_string()))
}

#[cfg(not(feature = "kubernetes"))]
pub async fn get_resource(
    _client: &K8sClient,
    _kind: ResourceKind,
    _namespace: &str,
    _name: &str,
) -> ClusterResult<ResourceDocument> {
    Err(ClusterError::Internal("Kubernetes feature not enabled".to_string()))
}

#[cfg(all(test, feature = "kubernetes"))]
mod tests {
    use super::*;

    #[test]
    fn test_route_api_resource() {
        let ar = api_resource(ResourceKind::Routes);
        assert_eq!(ar.group, "route.openshift.io");
        assert_eq!(ar.version, "v1");
        assert_eq!(ar.api_version, "route.openshift.io/v1");
        assert_eq!(ar.kind, "Route");
        assert_eq!(ar.plural, "routes");
    }

    #[test]
    fn test_typed_object_becomes_document() {
        use k8s_openapi::api::core::v1::Pod;
        use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

        let pod = Pod {
            metadata: ObjectMeta {
                name: Some("web-0".to_string()),
                namespace: Some("team-a".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let doc = to_document(&pod).unwrap();
        assert_eq!(doc.name(), Some("web-0"));
        assert_eq!(doc.namespace(), Some("team-a"));
        assert_eq!(doc.get("kind").and_then(|v| v.as_str()), Some("Pod"));
    }
}
