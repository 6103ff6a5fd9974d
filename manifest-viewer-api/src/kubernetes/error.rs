//! Cluster error types and ApiError mapping
//!
//! Every failure of the cluster client counts as "upstream call failed" and is
//! surfaced to HTTP callers as a single error kind.

use crate::error::ApiError;
use thiserror::Error;

/// Errors from the cluster API client
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Error from kube-rs client
    #[cfg(feature = "kubernetes")]
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    /// Invalid kubeconfig or client configuration
    #[error("Invalid kubeconfig: {0}")]
    InvalidKubeconfig(String),

    /// Upstream returned something that is not a resource document
    #[error("Malformed resource: {0}")]
    MalformedResource(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ClusterError {
    fn from(err: serde_json::Error) -> Self {
        ClusterError::MalformedResource(err.to_string())
    }
}

impl From<manifest_viewer_common::Error> for ClusterError {
    fn from(err: manifest_viewer_common::Error) -> Self {
        ClusterError::MalformedResource(err.to_string())
    }
}

impl From<ClusterError> for ApiError {
    fn from(err: ClusterError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

/// Result type alias for cluster operations
pub type ClusterResult<T> = std::result::Result<T, ClusterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cluster_error_is_upstream() {
        let errors = vec![
            ClusterError::InvalidKubeconfig("no context".to_string()),
            ClusterError::MalformedResource("not an object".to_string()),
            ClusterError::Internal("boom".to_string()),
        ];

        for err in errors {
            let message = err.to_string();
            let response = ApiError::from(err).to_error_response();
            assert_eq!(response.status, 500);
            assert_eq!(response.error, "UPSTREAM_ERROR");
            assert_eq!(response.message, message);
        }
    }

    #[test]
    fn test_malformed_json_maps_to_malformed_resource() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ClusterError = json_err.into();
        assert!(matches!(err, ClusterError::MalformedResource(_)));
    }
}
