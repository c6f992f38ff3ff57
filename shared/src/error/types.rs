//! `AppError` and the JSON error body

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error carried from a handler (or the client) to the caller
///
/// `code` decides the HTTP status, `message` is shown to the cashier and
/// `details` holds the offending values (item id, raw month, ...).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach one detail entry
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ---- general ----

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Storage failure (SQLite, migrations)
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    // ---- auth ----

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    // ---- orders, sales, documents ----

    /// Checkout attempted with no lines
    pub fn empty_cart() -> Self {
        Self::new(ErrorCode::EmptyCart)
    }

    /// A cart line carries a quantity outside `1..=max`
    pub fn invalid_quantity(item_id: i64, quantity: i64) -> Self {
        Self::with_message(
            ErrorCode::InvalidQuantity,
            format!("Invalid quantity {} for item {}", quantity, item_id),
        )
        .with_detail("item_id", item_id)
        .with_detail("quantity", quantity)
    }

    /// A cart line carries a weight above the maximum or finer than grams
    pub fn invalid_weight(item_id: i64, weight: f64) -> Self {
        Self::with_message(
            ErrorCode::InvalidWeight,
            format!("Invalid weight {} for item {}", weight, item_id),
        )
        .with_detail("item_id", item_id)
        .with_detail("weight", weight)
    }

    /// `price × quantity × weight` overflowed
    pub fn line_amount_out_of_range(item_id: i64) -> Self {
        Self::new(ErrorCode::LineAmountOutOfRange).with_detail("item_id", item_id)
    }

    pub fn unknown_order(order_id: i64) -> Self {
        Self::with_message(
            ErrorCode::OrderNotFound,
            format!("Order {} not found", order_id),
        )
        .with_detail("order_id", order_id)
    }

    /// Month parameter could not be parsed
    pub fn invalid_month(raw: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidMonth).with_detail("month", raw.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::RenderFailed, msg)
    }
}

/// Error body returned with every non-2xx response
///
/// Success bodies are the bare payload; this envelope only wraps failures
/// (and is generic so the client can decode either shape).
///
/// ```json
/// { "code": 4002, "message": "Cart is empty" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// 0 on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: Some(ErrorCode::Success.code()),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }

    /// Decode an error body back into an [`AppError`]; `None` for success.
    ///
    /// Codes this build does not know map to [`ErrorCode::Unknown`].
    pub fn into_error(self) -> Option<AppError> {
        let code = self.code.filter(|c| *c != ErrorCode::Success.code())?;
        Some(AppError {
            code: ErrorCode::try_from(code).unwrap_or(ErrorCode::Unknown),
            message: self.message,
            details: self.details,
        })
    }
}

impl ApiResponse<()> {
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "Request failed with system error");
        }
        (self.http_status(), axum::Json(ApiResponse::<()>::error(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_message_comes_from_code() {
        let err = AppError::new(ErrorCode::EmptyCart);
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(err.message, "Cart is empty");
        assert!(err.details.is_none());
    }

    #[test]
    fn details_accumulate() {
        let err = AppError::validation("Missing name")
            .with_detail("field", "name")
            .with_detail("max", 200);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "name");
        assert_eq!(details.len(), 2);
    }

    #[test]
    fn domain_constructors() {
        let err = AppError::invalid_quantity(7, 0);
        assert_eq!(err.code, ErrorCode::InvalidQuantity);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.details.as_ref().unwrap().get("quantity").unwrap(), 0);

        let err = AppError::unknown_order(42);
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.message, "Order 42 not found");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);

        let err = AppError::invalid_month("2024-13");
        assert_eq!(err.code, ErrorCode::InvalidMonth);
        assert_eq!(
            err.details.as_ref().unwrap().get("month").unwrap(),
            "2024-13"
        );
    }

    #[test]
    fn error_body_carries_code_and_details() {
        let response = ApiResponse::<()>::error(&AppError::unknown_order(9));
        assert_eq!(response.code, Some(4001));
        assert_eq!(response.message, "Order 9 not found");
        assert!(response.data.is_none());
        assert!(response.details.is_some());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("data").is_none());
    }

    #[test]
    fn error_body_decodes_back() {
        let json = r#"{"code":4002,"message":"Cart is empty"}"#;
        let response: ApiResponse<()> = serde_json::from_str(json).unwrap();
        let err = response.into_error().unwrap();
        assert_eq!(err.code, ErrorCode::EmptyCart);

        let future: ApiResponse<()> =
            serde_json::from_str(r#"{"code":4999,"message":"?"}"#).unwrap();
        assert_eq!(future.into_error().unwrap().code, ErrorCode::Unknown);

        assert!(ApiResponse::success(1).into_error().is_none());
    }
}
