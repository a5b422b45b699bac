use axum::Json;
use serde_json::{json, Value};

/// Liveness probe; always succeeds with an empty payload
pub async fn health_check() -> Json<Value> {
    Json(json!({}))
}
