//! Sales API Handlers
//!
//! 携带令牌时只统计该用户的订单；无令牌时统计全部订单。

use axum::{
    Json,
    extract::{Query, State},
    response::Response,
};

use crate::api::{pdf_attachment, render_blocking};
use crate::auth::OptionalUser;
use crate::core::ServerState;
use crate::printing::SalesReportRenderer;
use crate::sales;
use crate::utils::AppResult;
use shared::models::{SalesQuery, SalesSummary};

/// GET /api/sales?month=YYYY-MM - 月度销售汇总
pub async fn summary(
    State(state): State<ServerState>,
    user: OptionalUser,
    Query(query): Query<SalesQuery>,
) -> AppResult<Json<SalesSummary>> {
    let month = sales::parse_month(query.month.as_deref())?;
    let summary = sales::monthly_summary(state.pool(), month, user.owner_id()).await?;
    Ok(Json(summary))
}

/// GET /api/sales/pdf?month=YYYY-MM - 月度销售报表 PDF
pub async fn report_pdf(
    State(state): State<ServerState>,
    user: OptionalUser,
    Query(query): Query<SalesQuery>,
) -> AppResult<Response> {
    let month = sales::parse_month(query.month.as_deref())?;
    let report = sales::monthly_report(state.pool(), month, user.owner_id()).await?;
    let renderer = state.sales_report_renderer();

    let bytes = render_blocking(move || renderer.render(&report)).await?;
    tracing::info!(month = %month, bytes = bytes.len(), "Sales report rendered");

    Ok(pdf_attachment(
        &SalesReportRenderer::filename(&month.to_string()),
        bytes,
    ))
}
