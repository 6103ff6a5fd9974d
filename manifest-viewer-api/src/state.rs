//! Application State
//!
//! Shared state for the viewer API server. Built once at startup and never
//! mutated afterwards.

use std::sync::Arc;

use manifest_viewer_common::RedactionPolicy;

use crate::config::ViewerConfig;
use crate::health::HealthChecker;
use crate::kubernetes::ClusterSource;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ViewerConfig>,
    pub cluster: Arc<dyn ClusterSource>,
    pub redaction: RedactionPolicy,
    pub health: Arc<HealthChecker>,
}

impl AppState {
    pub fn new(config: ViewerConfig, cluster: Arc<dyn ClusterSource>) -> Self {
        let redaction = config.redaction_policy();
        let health = HealthChecker::new();

        Self {
            config: Arc::new(config),
            cluster,
            redaction,
            health: Arc::new(health),
        }
    }
}
