use axum::{
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{info_span, Instrument};

use crate::context::RequestContext;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Assign a request id, run the handler inside a span carrying it, and echo
/// it back in the `x-request-id` response header.
pub async fn request_context(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let ctx = RequestContext::new();
    let span = info_span!(
        "request",
        request_id = %ctx.request_id(),
        method = %req.method(),
        path = %req.uri().path(),
    );

    req.extensions_mut().insert(ctx);

    let mut response = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&ctx.request_id().to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
