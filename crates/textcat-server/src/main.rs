//! TextCat Server
//!
//! HTTP serving surface for text classification. Artifacts trained
//! offline (classifier, vectorizer, label decoder) are loaded lazily,
//! cached, and hot-swappable via the admin reload endpoint.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

use textcat_server::config::{Cli, ServerConfig};
use textcat_server::routes;
use textcat_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting TextCat server");

    // Load configuration
    let config = ServerConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!(classifier = %config.artifacts.classifier.display(),
          vectorizer = %config.artifacts.vectorizer.display(),
          labels = %config.artifacts.labels.display(),
          "artifact locations resolved");

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Initialize application state (pipeline resources, lifecycle manager)
    let state = AppState::new(config.clone(), metrics_handle)?;

    // Optional warm-up: trigger the first artifact load before serving.
    // A failure here is cached and reported per request; the server still
    // starts so operators can fix artifacts and reload.
    if config.warm_up {
        match state.manager.ensure_loaded().await {
            Ok(_) => info!("warm-up load complete"),
            Err(e) => warn!(error = %e, "warm-up load failed; serving will report model unavailable"),
        }
    }

    let addr: SocketAddr = format!("{}:{}", config.listen, config.port).parse()?;
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    warn!("Shutdown signal received, stopping server...");
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("textcat=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("textcat=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "textcat_requests_total",
        "Total number of prediction requests received"
    );
    metrics::describe_counter!(
        "textcat_predictions_total",
        "Total number of successful predictions"
    );
    metrics::describe_counter!("textcat_errors_total", "Total number of failed requests");
    metrics::describe_histogram!(
        "textcat_predict_latency_us",
        metrics::Unit::Microseconds,
        "Prediction latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
