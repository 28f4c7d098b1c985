use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::AppState;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Ready only when a model is loaded; the process itself stays up either way.
pub async fn ready(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    let status = if state.pipeline.is_model_available() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(serde_json::json!({
            "model_available": state.pipeline.is_model_available(),
            "model": state.pipeline.model_name(),
        })),
    )
}
