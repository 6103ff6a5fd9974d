use std::sync::Arc;

use manifest_viewer_api::{
    config::ViewerConfig,
    kubernetes::{client::K8sClient, KubeClusterSource},
    logging, router, shutdown, AppState,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--sample-config") {
        print!("{}", ViewerConfig::generate_sample());
        return Ok(());
    }

    // Load configuration; events raised meanwhile go to a stderr subscriber
    let config = tracing::subscriber::with_default(logging::bootstrap(), ViewerConfig::load)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    // Initialize tracing; the guard flushes the log file on exit
    let _log_guard = logging::init(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        return Err(anyhow::anyhow!("Invalid configuration: {}", e));
    }
    info!("Configuration loaded successfully");

    // Connect to the cluster
    let client = K8sClient::connect(&config.kubernetes).await?;
    match client.get_version().await {
        Ok(version) => info!(api_server = %client.api_server(), "Kubernetes version: {}", version),
        Err(e) => warn!("Failed to get Kubernetes version: {}", e),
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let static_dir = config.server.static_dir.clone();

    let state = Arc::new(AppState::new(
        config,
        Arc::new(KubeClusterSource::new(client)),
    ));

    let app = router(state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    // Set up graceful shutdown
    let shutdown_coordinator = shutdown::ShutdownCoordinator::new();
    let signal_coordinator = shutdown_coordinator.clone();
    tokio::spawn(async move { signal_coordinator.wait_for_signal().await });

    let listener = TcpListener::bind(&addr).await?;
    info!(static_dir = %static_dir.display(), "Manifest viewer listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_coordinator.signal())
        .await?;

    info!("Server stopped");

    Ok(())
}
