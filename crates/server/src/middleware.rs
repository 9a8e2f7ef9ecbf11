use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

/// Log every request once it has been answered.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::warn!(%method, %uri, %status, duration_ms, "Request completed");
    } else {
        tracing::info!(%method, %uri, %status, duration_ms, "Request completed");
    }
    response
}
