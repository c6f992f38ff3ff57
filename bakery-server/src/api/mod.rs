//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册、登录、会话
//! - [`menu`] - 菜单管理接口
//! - [`orders`] - 下单、订单查询、发票
//! - [`sales`] - 月度销售统计和报表
//! - [`qrcode`] - 支付二维码

pub mod auth;
pub mod health;
pub mod menu;
pub mod orders;
pub mod qrcode;
pub mod sales;

use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use axum::response::{IntoResponse, Response};
use http::{HeaderName, HeaderValue, header};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::middleware;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health API - public route
        .merge(health::router())
        // Auth API - register/login public, session optional
        .merge(auth::router())
        // Menu API - reads public, writes require a token
        .merge(menu::router())
        // Orders API - token optional (owner attribution)
        .merge(orders::router())
        // Sales API - token optional (owner scoping)
        .merge(sales::router())
        // QR API - public route
        .merge(qrcode::router())
}

/// Build a fully configured application with all middleware
///
/// Used by both the HTTP server and in-process tests
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // Timeout - abort handlers that run too long
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.config.request_timeout_ms,
        )))
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Request logging
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // ========== Application Middleware ==========
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}

/// PDF download response (`Content-Disposition: attachment`)
pub(crate) fn pdf_attachment(filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Run CPU-bound document rendering off the async workers
pub(crate) async fn render_blocking<F>(render: F) -> AppResult<Vec<u8>>
where
    F: FnOnce() -> AppResult<Vec<u8>> + Send + 'static,
{
    tokio::task::spawn_blocking(render)
        .await
        .map_err(|e| AppError::internal(format!("Render task failed: {}", e)))?
}
