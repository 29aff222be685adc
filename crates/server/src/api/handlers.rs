use axum::{http::header, response::IntoResponse, Json};
use serde::Serialize;

use crate::metrics;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Prometheus text exposition of all registered metrics.
pub async fn get_metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::encode_metrics(),
    )
}
