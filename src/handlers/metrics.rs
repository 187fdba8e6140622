use axum::{http::{StatusCode, header}, response::IntoResponse};
use prometheus::{Encoder, TextEncoder};
use tracing::warn;

pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!("Failed to encode metrics: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, [(header::CONTENT_TYPE, "text/plain")], Vec::new());
    }

    (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain; version=0.0.4")], buffer)
}
