//! Health Handler

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::GetHealth;
use crate::infrastructure::http::dto::HealthResponse;
use crate::infrastructure::http::state::AppState;

/// 健康检查，进程存活即返回 200
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let report = state.health_handler.handle(GetHealth).await;
    Json(report.into())
}
