//! HTTP API application wiring (Axum router + shared state).
//!
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use ecotrace_advice::SuggestionConfig;
use ecotrace_pipeline::FootprintPipeline;

use crate::middleware;
use crate::settings::Settings;

pub mod dto;
pub mod errors;
pub mod routes;

/// Read-only state shared by every handler.
#[derive(Debug)]
pub struct AppState {
    pub pipeline: FootprintPipeline,
    pub config: SuggestionConfig,
    /// Upper bound on a single estimation, applied at the call site.
    pub inference_timeout: Duration,
}

impl AppState {
    pub fn new(
        pipeline: FootprintPipeline,
        config: SuggestionConfig,
        inference_timeout: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            pipeline,
            config,
            inference_timeout,
        })
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Arc<Self>> {
        let (pipeline, config) = settings.build_pipeline()?;
        Ok(Self::new(pipeline, config, settings.inference_timeout))
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .route("/ready", get(routes::system::ready))
        .nest("/api/v1", routes::router())
        .layer(Extension(state))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::request_context)))
}
