//! Manifest Viewer API Library
//!
//! Read-only gateway over a Kubernetes/OpenShift cluster. Exposed as a library
//! so integration tests can drive the router against an in-memory cluster.

// Core modules
pub mod config;
pub mod error;

// Application state
pub mod state;
pub use state::AppState;

// HTTP surface
pub mod middleware;
pub mod routes;
pub use routes::router;

// Cluster access
pub mod kubernetes;

// Logging configuration
pub mod logging;

// Health checks and readiness probes
pub mod health;

// Graceful shutdown handling
pub mod shutdown;
