//! 请求日志中间件
//!
//! 每个请求一条开始记录、一条完成记录，字段挂在 `http_request` span 上，
//! 处理器内部的日志会自动带上 request_id。

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use http::StatusCode;
use tracing::Instrument;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// 请求日志中间件
///
/// 4xx/5xx 以 WARN 记录，其余为 INFO。
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = header_str(&req, REQUEST_ID_HEADER)
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    // 路由模板 (/api/order/{id})，未匹配时退回原始路径
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %req.method(),
        route = %route,
    );

    async move {
        tracing::info!(
            user_agent = header_str(&req, "user-agent").unwrap_or("unknown"),
            "Request started"
        );

        let response = next.run(req).await;
        log_completion(response.status(), start.elapsed().as_millis());
        response
    }
    .instrument(span)
    .await
}

fn header_str<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

fn log_completion(status: StatusCode, latency_ms: u128) {
    let code = status.as_u16();
    if status.is_client_error() || status.is_server_error() {
        tracing::warn!(status = code, latency_ms = %latency_ms, "Request failed");
    } else {
        tracing::info!(status = code, latency_ms = %latency_ms, "Request completed");
    }
}
