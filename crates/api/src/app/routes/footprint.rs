use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{info, warn};

use ecotrace_core::Submission;

use crate::app::{dto, errors, AppState};
use crate::context::RequestContext;

pub async fn estimate(
    Extension(state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    body: Result<Json<Submission>, JsonRejection>,
) -> axum::response::Response {
    let Json(submission) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "malformed_request",
                rejection.body_text(),
            );
        }
    };

    // Inference is synchronous; keep it off the async workers and bound it.
    let pipeline = state.pipeline.clone();
    let task = tokio::task::spawn_blocking(move || pipeline.estimate_submission(&submission));

    let outcome = match tokio::time::timeout(state.inference_timeout, task).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(join_err)) => {
            warn!(error = %join_err, "estimation task failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "estimation task failed",
            );
        }
        Err(_) => {
            warn!(timeout_ms = state.inference_timeout.as_millis() as u64, "estimation timed out");
            return errors::json_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "estimation_unavailable",
                errors::UNAVAILABLE_MESSAGE,
            );
        }
    };

    match outcome {
        Ok(result) => {
            info!(
                footprint_kgco2 = result.footprint_kgco2(),
                suggestions = result.suggestions().len(),
                "footprint estimated"
            );
            let model = state.pipeline.model_name().map(str::to_string);
            Json(dto::FootprintResponse::new(ctx.request_id(), model, result)).into_response()
        }
        Err(err) => errors::estimation_error_to_response(err),
    }
}

pub async fn config(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    Json(dto::ConfigResponse {
        model_available: state.pipeline.is_model_available(),
        config: &state.config,
    })
    .into_response()
}
