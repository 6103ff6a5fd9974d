//! Kubernetes client wrapper
//!
//! Wraps the kube-rs Client built from the ambient credentials: in-cluster
//! service account, an explicit kubeconfig path, or the default kubeconfig
//! lookup.

#[cfg(feature = "kubernetes")]
use kube::{Client, Config};

#[cfg(not(feature = "kubernetes"))]
use super::error::ClusterError;
use super::error::ClusterResult;
use crate::config::KubernetesConfig;

/// Wrapper around kube-rs Client
#[derive(Clone)]
pub struct K8sClient {
    #[cfg(feature = "kubernetes")]
    inner: Client,
    api_server: String,
}

impl K8sClient {
    /// Build a client from the configured credential source
    #[cfg(feature = "kubernetes")]
    pub async fn connect(settings: &KubernetesConfig) -> ClusterResult<Self> {
        let config = Self::load_config(settings).await?;
        let api_server = config.cluster_url.to_string();

        let client = Client::try_from(config).map_err(|e| {
            super::error::ClusterError::InvalidKubeconfig(format!("Failed to create client: {}", e))
        })?;

        tracing::info!(api_server = %api_server, "Kubernetes client created");

        Ok(Self {
            inner: client,
            api_server,
        })
    }

    #[cfg(feature = "kubernetes")]
    async fn load_config(settings: &KubernetesConfig) -> ClusterResult<Config> {
        use super::error::ClusterError;
        use kube::config::{KubeConfigOptions, Kubeconfig};

        if settings.in_cluster {
            tracing::info!("Using in-cluster Kubernetes configuration");
            return Config::incluster().map_err(|e| {
                ClusterError::InvalidKubeconfig(format!("Failed to get in-cluster config: {}", e))
            });
        }

        let options = KubeConfigOptions {
            context: settings.context.clone(),
            ..Default::default()
        };

        match &settings.kubeconfig_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Using kubeconfig file");
                let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                    ClusterError::InvalidKubeconfig(format!(
                        "Failed to read {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .map_err(|e| {
                        ClusterError::InvalidKubeconfig(format!("Failed to create config: {}", e))
                    })
            }
            None if settings.context.is_some() => Config::from_kubeconfig(&options)
                .await
                .map_err(|e| {
                    ClusterError::InvalidKubeconfig(format!("Failed to create config: {}", e))
                }),
            None => {
                tracing::info!("Using default Kubernetes configuration");
                Config::infer().await.map_err(|e| {
                    ClusterError::InvalidKubeconfig(format!("Failed to infer config: {}", e))
                })
            }
        }
    }

    /// Get the inner kube-rs Client
    #[cfg(feature = "kubernetes")]
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// Get API server URL
    pub fn api_server(&self) -> &str {
        &self.api_server
    }

    /// Get the server version string, e.g. `v1.30.2`
    #[cfg(feature = "kubernetes")]
    pub async fn get_version(&self) -> ClusterResult<String> {
        let version = self.inner.apiserver_version().await?;
        Ok(version.git_version)
    }

    // Stub implementations when kubernetes feature is not enabled
    #[cfg(not(feature = "kubernetes"))]
    pub async fn connect(_settings: &KubernetesConfig) -> ClusterResult<Self> {
        Err(ClusterError::Internal(
            "Kubernetes feature not enabled".to_string(),
        ))
    }

    #[cfg(not(feature = "kubernetes"))]
    pub async fn get_version(&self) -> ClusterResult<String> {
        Err(ClusterError::Internal(
            "Kubernetes feature not enabled".to_string(),
        ))
    }
}

impl std::fmt::Debug for K8sClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("K8sClient")
            .field("api_server", &self.api_server)
            .finish()
    }
}
