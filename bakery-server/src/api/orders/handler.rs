//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};

use crate::api::{pdf_attachment, render_blocking};
use crate::auth::OptionalUser;
use crate::core::ServerState;
use crate::printing::InvoiceRenderer;
use crate::utils::AppResult;
use shared::models::{CreateOrderRequest, CreateOrderResponse, Order};

/// POST /api/order - 结账下单
///
/// 价格一律取自服务端菜单；携带有效令牌时订单归属该用户。
pub async fn create(
    State(state): State<ServerState>,
    user: OptionalUser,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<Json<CreateOrderResponse>> {
    let created = state.orders.create(&req, user.owner_id()).await?;
    Ok(Json(created))
}

/// GET /api/order/:id - 获取订单 (含明细)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get(id).await?;
    Ok(Json(order))
}

/// GET /api/order/:id/invoice - 下载 PDF 发票
pub async fn invoice(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Response> {
    let order = state.orders.get(id).await?;
    let renderer = state.invoice_renderer();

    let bytes = render_blocking(move || renderer.render(&order)).await?;
    tracing::info!(order_id = id, bytes = bytes.len(), "Invoice rendered");

    Ok(pdf_attachment(&InvoiceRenderer::filename(id), bytes))
}
