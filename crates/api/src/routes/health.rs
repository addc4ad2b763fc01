use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, HealthResponse};

/// 健康检查，存储不可达时返回 503
#[utoipa::path(
    get,
    path = "/health",
    tag = "系统 (System)",
    responses(
        (status = 200, description = "服务正常", body = ApiResponse<HealthResponse>),
        (status = 503, description = "目录存储不可用")
    )
)]
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    state.catalog.health().await?;
    Ok(Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
    })))
}
