//! Middleware for request timing

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info_span, Instrument};

/// Threshold for slow request warnings in milliseconds
const SLOW_REQUEST_THRESHOLD_MS: u128 = 1000;

/// Log each request's method, path, status and elapsed time
pub async fn request_timer(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let span = info_span!("request", method = %method, path = %path);

    async move {
        let response = next.run(req).await;
        let elapsed_ms = start.elapsed().as_millis();
        let status = response.status();

        if elapsed_ms > SLOW_REQUEST_THRESHOLD_MS {
            tracing::warn!(status = %status, elapsed_ms, "Slow request");
        } else {
            tracing::info!(status = %status, elapsed_ms, "Request completed");
        }

        response
    }
    .instrument(span)
    .await
}
