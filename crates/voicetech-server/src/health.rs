use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
    model_loaded: bool,
    device: String,
}

/// Health check handler
///
/// Stays healthy when the model failed to load; `model_loaded` reports it.
pub async fn health_handler(State(server): State<Arc<tts::Server>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        model_loaded: server.model_loaded(),
        device: server.device().to_string(),
    })
}
