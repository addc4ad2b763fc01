//! # API 统一错误处理
//!
//! 将目录服务的错误类型统一映射到 HTTP 状态码与 JSON 响应体。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nedan_core::catalog::error::CatalogError;
use thiserror::Error;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 资源未找到 (404)
    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 请求参数错误 (400)
    #[error("请求参数错误: {0}")]
    BadRequest(String),

    /// 存储不可用 (503)
    #[error("服务暂不可用: {0}")]
    ServiceUnavailable(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::ServiceUnavailable(msg) => {
                // 存储细节只记录日志，不向客户端透传
                tracing::error!("存储不可用: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "目录存储暂不可用".to_string())
            }
        };

        let body = Json(ApiErrorResponse::from_msg(message));
        (status, body).into_response()
    }
}

/// 从 `CatalogError` 转换
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidQuery(msg) => ApiError::BadRequest(msg),
            CatalogError::NotFound(msg) => ApiError::NotFound(msg),
            CatalogError::StoreUnavailable(e) => ApiError::ServiceUnavailable(e.to_string()),
        }
    }
}
