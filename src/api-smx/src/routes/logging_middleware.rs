use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;

/// Middleware that logs each route access with its status and duration,
/// at a level picked by the status class.
pub async fn log_route_access(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(method = %method, path = %path, status = status.as_u16(), duration_ms);
    } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
        tracing::warn!(method = %method, path = %path, status = status.as_u16(), duration_ms);
    } else {
        tracing::info!(method = %method, path = %path, status = status.as_u16(), duration_ms);
    }

    response
}
