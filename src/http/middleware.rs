use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::Instrument;

pub(crate) async fn request_tracing_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request.uri().path().to_string();
    let started_at = Instant::now();

    let span = tracing::info_span!(target: "http", "http.request", method = %method, route = %route);

    let response = next.run(request).instrument(span).await;
    let status = response.status();
    let elapsed_ms = started_at.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::warn!(target: "http", %method, %route, status = status.as_u16(), elapsed_ms, "Request failed");
    } else {
        tracing::debug!(target: "http", %method, %route, status = status.as_u16(), elapsed_ms, "Request handled");
    }

    response
}
