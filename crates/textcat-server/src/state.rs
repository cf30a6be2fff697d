//! Shared application state

use crate::config::ServerConfig;
use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use textcat_model::{ArtifactManager, PredictionService, TextPipeline};
use tracing::info;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Artifact lifecycle manager
    pub manager: ArtifactManager,

    /// Prediction service
    pub service: Arc<PredictionService>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Initialize application state from configuration.
    ///
    /// Linguistic resources are built here, once per process; artifacts
    /// stay unloaded until the first request or an explicit warm-up.
    pub fn new(config: ServerConfig, metrics_handle: PrometheusHandle) -> Result<Self> {
        info!(language = %config.preprocess.language, "building preprocessing pipeline");
        let pipeline = TextPipeline::new(config.preprocess.clone())?;

        let manager = ArtifactManager::from_paths(config.artifact_paths());
        let service = Arc::new(PredictionService::new(pipeline, manager.clone()));

        Ok(Self {
            config: Arc::new(config),
            manager,
            service,
            metrics_handle,
        })
    }
}
