//! Common types and utilities shared between manifest-viewer-api and manifest-viewer-ui

pub mod document;
pub mod export;
pub mod redact;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use document::ResourceDocument;
pub use redact::RedactionPolicy;

/// Namespaced resource kinds the viewer can list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Pods,
    Deployments,
    Services,
    /// OpenShift route (`route.openshift.io/v1`), a custom resource
    Routes,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Pods,
        ResourceKind::Deployments,
        ResourceKind::Services,
        ResourceKind::Routes,
    ];

    /// Plural name, as used in URL paths and by the cluster API
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Pods => "pods",
            ResourceKind::Deployments => "deployments",
            ResourceKind::Services => "services",
            ResourceKind::Routes => "routes",
        }
    }

    /// Singular `kind` field value
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceKind::Pods => "Pod",
            ResourceKind::Deployments => "Deployment",
            ResourceKind::Services => "Service",
            ResourceKind::Routes => "Route",
        }
    }

    /// API group (empty for the core group)
    pub fn group(&self) -> &'static str {
        match self {
            ResourceKind::Pods | ResourceKind::Services => "",
            ResourceKind::Deployments => "apps",
            ResourceKind::Routes => "route.openshift.io",
        }
    }

    pub fn version(&self) -> &'static str {
        "v1"
    }

    /// Human readable heading
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::Pods => "Pods",
            ResourceKind::Deployments => "Deployments",
            ResourceKind::Services => "Services",
            ResourceKind::Routes => "Routes",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.plural() == s)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

/// Namespace entry returned by `GET /api/namespaces`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSummary {
    pub name: String,
    /// Namespace phase (`Active`, `Terminating`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<String>,
}

/// Application identity shown by the frontend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppInfo {
    pub name: String,
    pub description: String,
    pub version: String,
}

/// Configuration subset exposed to the frontend by `GET /api/config`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicConfig {
    pub app: AppInfo,
    pub default_namespace: String,
    pub hide_system_namespaces: bool,
    pub kinds: Vec<ResourceKind>,
}

/// Standard API error response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,

    /// Error code for programmatic handling
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional detailed error information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Timestamp when error occurred
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Errors raised by shared document handling
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown resource kind: {0}")]
    UnknownKind(String),

    #[error("Resource document must be a JSON object, got {0}")]
    NotAnObject(String),

    #[error("YAML rendering failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
