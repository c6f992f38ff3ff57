//! Order Model

use serde::{Deserialize, Serialize};

/// One requested cart entry submitted at checkout
///
/// Only the item reference travels; prices are always taken from the
/// server-side menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemRequest {
    /// Menu item reference
    pub id: i64,
    /// Quantity, 1 when absent
    #[serde(default)]
    pub qty: Option<i64>,
    /// Weight multiplier, 1 when absent or not positive
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Checkout payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

/// Priced, persisted snapshot of one order line (immutable once written)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub item_id: i64,
    /// Item name at the time of purchase
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub weight: f64,
    pub line_subtotal: f64,
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Creation time (Unix millis, UTC)
    pub created_at: i64,
    /// Authoritative total, equal to the sum of line subtotals
    pub total: f64,
    /// User who placed the order, if signed in
    pub owner_id: Option<i64>,

    // -- Relations (populated by application code, skipped by FromRow) --
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub lines: Vec<OrderLine>,
}

/// Lightweight order row used by sales queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub id: i64,
    pub total: f64,
    pub created_at: i64,
}

/// Checkout response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: i64,
    pub total: f64,
    pub items: Vec<OrderLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_item_request_defaults() {
        let req: CreateOrderRequest =
            serde_json::from_str(r#"{"items":[{"id":3},{"id":4,"qty":2,"weight":1.5}]}"#)
                .unwrap();
        assert_eq!(req.items[0].qty, None);
        assert_eq!(req.items[0].weight, None);
        assert_eq!(req.items[1].qty, Some(2));
        assert_eq!(req.items[1].weight, Some(1.5));
    }

    #[test]
    fn fractional_quantity_is_rejected() {
        let res = serde_json::from_str::<OrderItemRequest>(r#"{"id":1,"qty":1.5}"#);
        assert!(res.is_err());
    }

    #[test]
    fn create_order_response_uses_camel_case() {
        let resp = CreateOrderResponse {
            order_id: 7,
            total: 12.5,
            items: vec![],
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"orderId\":7"));
    }
}
