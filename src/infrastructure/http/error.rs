//! HTTP Error Handling

use axum::{
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// 内部错误对外展示的信息，完整错误只写日志
const REDACTED_DETAIL: &str = "Internal server error";

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    PayloadTooLarge(String),
    /// 推理引擎失败，详情透传给调用方
    Internal(String),
    /// 内部故障，详情不透传
    Redacted(String),
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) | ApiError::Redacted(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// 附在错误响应扩展里的完整错误信息
///
/// 由 `error_logging_middleware` 统一记录，每个失败请求只记一条日志
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub kind: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (kind, message, detail) = match self {
            ApiError::BadRequest(msg) => ("bad_request", msg.clone(), msg),
            ApiError::NotFound(msg) => ("not_found", msg.clone(), msg),
            ApiError::PayloadTooLarge(msg) => ("payload_too_large", msg.clone(), msg),
            ApiError::Internal(msg) => ("synthesis_failed", msg.clone(), msg),
            ApiError::Redacted(msg) => ("internal", msg, REDACTED_DETAIL.to_string()),
            ApiError::ServiceUnavailable(msg) => ("unavailable", msg.clone(), msg),
        };

        let mut response = (status, Json(ErrorResponse::new(detail))).into_response();
        response
            .extensions_mut()
            .insert(ErrorReport { kind, message });
        response
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::MissingText
            | ApplicationError::InvalidVoiceName(_)
            | ApplicationError::InvalidAudio(_)
            | ApplicationError::BuiltinProtected(_) => ApiError::BadRequest(e.to_string()),
            ApplicationError::VoiceNotFound(_) => ApiError::NotFound(e.to_string()),
            ApplicationError::AdapterUnavailable | ApplicationError::AdapterLoadFailed(_) => {
                ApiError::ServiceUnavailable(e.to_string())
            }
            ApplicationError::AdapterFailure(_)
            | ApplicationError::EmptyAudio
            | ApplicationError::Timeout(_) => ApiError::Internal(e.to_string()),
            ApplicationError::StorageError(_) | ApplicationError::InternalError(_) => {
                ApiError::Redacted(e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(e.body_text())
        } else {
            ApiError::BadRequest(format!("Failed to read multipart field: {}", e.body_text()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_error_status_mapping() {
        let cases = [
            (ApplicationError::MissingText, StatusCode::BAD_REQUEST),
            (
                ApplicationError::InvalidVoiceName("###".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApplicationError::BuiltinProtected("female_1".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApplicationError::VoiceNotFound("ghost".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                ApplicationError::AdapterUnavailable,
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApplicationError::AdapterLoadFailed("no weights".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApplicationError::AdapterFailure("cuda oom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApplicationError::Timeout(120), StatusCode::INTERNAL_SERVER_ERROR),
            (
                ApplicationError::internal("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[tokio::test]
    async fn test_internal_detail_redacted() {
        let response = ApiError::from(ApplicationError::internal("disk path /secret")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["detail"], "Internal server error");
    }

    #[test]
    fn test_redacted_error_keeps_full_message_for_logging() {
        let response = ApiError::from(ApplicationError::internal("disk path /secret")).into_response();
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.kind, "internal");
        assert!(report.message.contains("/secret"));
    }

    #[tokio::test]
    async fn test_adapter_failure_detail_passed_through() {
        let response =
            ApiError::from(ApplicationError::AdapterFailure("cuda oom".into())).into_response();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["detail"], "cuda oom");
    }
}
