//! Sales Model

use super::OrderSummary;
use serde::{Deserialize, Serialize};

/// Month sales query (`?month=YYYY-MM`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesQuery {
    pub month: Option<String>,
}

/// Aggregated sales for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// `YYYY-MM`
    pub month: String,
    pub total: f64,
    /// Number of orders in the month
    pub orders: i64,
}

/// Summary plus the orders it was computed from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReport {
    pub summary: SalesSummary,
    pub orders: Vec<OrderSummary>,
}
