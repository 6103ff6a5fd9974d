//! Health check and readiness probes
//!
//! Liveness only says the process is serving. Readiness lists namespaces
//! through the configured cluster source, so a pod without cluster access is
//! taken out of rotation.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::kubernetes::ClusterSource;

/// Overall system health status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All components healthy
    Healthy,
    /// System is unhealthy
    Unhealthy,
}

/// Individual component health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    pub message: Option<String>,
    pub latency_ms: Option<u64>,
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub alive: bool,
    pub timestamp: i64,
}

/// Readiness probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub reason: Option<String>,
    pub timestamp: i64,
    pub components: Vec<ComponentHealth>,
}

/// Health checker for the gateway
#[derive(Debug, Default)]
pub struct HealthChecker;

impl HealthChecker {
    pub fn new() -> Self {
        Self
    }

    /// Simple liveness check - is the service running?
    pub fn liveness(&self) -> LivenessResponse {
        LivenessResponse {
            alive: true,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Check that the cluster API answers a namespace listing
    pub async fn check_cluster(&self, source: &dyn ClusterSource) -> ComponentHealth {
        let start = Instant::now();

        match source.list_namespaces().await {
            Ok(namespaces) => ComponentHealth {
                name: "cluster".to_string(),
                status: HealthStatus::Healthy,
                message: Some(format!("{} namespace(s) visible", namespaces.len())),
                latency_ms: Some(start.elapsed().as_millis() as u64),
            },
            Err(e) => ComponentHealth {
                name: "cluster".to_string(),
                status: HealthStatus::Unhealthy,
                message: Some(format!("Cluster API unreachable: {}", e)),
                latency_ms: Some(start.elapsed().as_millis() as u64),
            },
        }
    }

    /// Ready when no component is unhealthy
    pub fn readiness(&self, components: Vec<ComponentHealth>) -> ReadinessResponse {
        let reason = components
            .iter()
            .find(|c| c.status == HealthStatus::Unhealthy)
            .map(|c| {
                c.message
                    .clone()
                    .unwrap_or_else(|| format!("{} not ready", c.name))
            });

        ReadinessResponse {
            ready: reason.is_none(),
            reason,
            timestamp: chrono::Utc::now().timestamp(),
            components,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(name: &str, status: HealthStatus) -> ComponentHealth {
        ComponentHealth {
            name: name.to_string(),
            status,
            message: None,
            latency_ms: Some(5),
        }
    }

    #[test]
    fn test_readiness() {
        let checker = HealthChecker::new();

        let ready = checker.readiness(vec![component("cluster", HealthStatus::Healthy)]);
        assert!(ready.ready);
        assert!(ready.reason.is_none());

        let not_ready = checker.readiness(vec![component("cluster", HealthStatus::Unhealthy)]);
        assert!(!not_ready.ready);
        assert_eq!(not_ready.reason.as_deref(), Some("cluster not ready"));
    }

    #[test]
    fn test_liveness() {
        let checker = HealthChecker::new();
        let response = checker.liveness();

        assert!(response.alive);
        assert!(response.timestamp > 0);
    }
}
