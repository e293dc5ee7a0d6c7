use axum::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Prometheus text exposition of all registered counters.
pub async fn metrics() -> String {
    common::metrics::gather()
}
