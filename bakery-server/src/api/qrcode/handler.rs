//! Payment QR Handlers

use axum::{Json, extract::Query};

use crate::payment;
use crate::utils::AppResult;
use shared::models::{QrCodeQuery, QrCodeResponse};

/// GET /api/qrcode?amount=&label= - 生成支付二维码
pub async fn generate(Query(query): Query<QrCodeQuery>) -> AppResult<Json<QrCodeResponse>> {
    let amount = shared::payment::parse_amount(query.amount.as_deref())?;
    let text = shared::payment::payment_text(query.label.as_deref(), amount);
    let data_url = payment::qr_data_url(&text)?;
    Ok(Json(QrCodeResponse { data_url }))
}
