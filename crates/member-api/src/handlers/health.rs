use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::error;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    let Some(pool) = state.db.as_ref() else {
        return StatusCode::OK;
    };

    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            error!("Readiness check failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
