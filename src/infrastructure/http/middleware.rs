//! HTTP Middleware
//!
//! 失败请求日志中间件

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::infrastructure::http::error::ErrorReport;

/// 失败请求日志中间件
///
/// 4xx 记 warn，5xx 记 error，每个请求至多一条。
/// `ApiError` 产生的响应带有 `ErrorReport`，日志里附上完整错误信息（含对外隐藏的部分）；
/// 框架直接返回的错误（未匹配路由、方法不允许、请求体超限）只有状态码
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let route = route_of(&request);

    let response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let latency_ms = started.elapsed().as_millis() as u64;
    let report = response.extensions().get::<ErrorReport>();
    let kind = report.map(|r| r.kind);
    let error = report.map(|r| r.message.as_str());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            route = %route,
            status = status.as_u16(),
            latency_ms,
            kind,
            error,
            "HTTP request failed"
        );
    } else {
        tracing::warn!(
            method = %method,
            route = %route,
            status = status.as_u16(),
            latency_ms,
            kind,
            error,
            "HTTP request rejected"
        );
    }

    response
}

/// 路由模板（如 `/voices/:voice_id`），未匹配时退回请求路径
fn route_of(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}
