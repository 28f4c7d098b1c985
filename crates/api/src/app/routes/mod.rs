use axum::{
    routing::{get, post},
    Router,
};

pub mod footprint;
pub mod system;

/// Router for the versioned API (mounted under `/api/v1`).
pub fn router() -> Router {
    Router::new()
        .route("/footprint", post(footprint::estimate))
        .route("/config", get(footprint::config))
}
