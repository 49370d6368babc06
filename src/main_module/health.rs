//! Liveness probe backed by a round trip to the task store

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use log::warn;
use serde::Serialize;
use std::sync::Arc;

use crate::core::shared::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub database: bool,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthReport>) {
    let database = match state.tasks.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Health probe could not reach the store: {}", e);
            false
        }
    };

    let (code, status) = if database {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthReport {
            status,
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}
