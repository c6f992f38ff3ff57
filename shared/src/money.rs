//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` for storage/serialization.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
pub const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per menu item
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per cart line
pub const MAX_QUANTITY: i64 = 9999;
/// Maximum weight factor per cart line (kg)
pub const MAX_WEIGHT: f64 = 100.0;
/// Weights are accepted with at most this many decimals (grams)
pub const WEIGHT_DECIMAL_PLACES: u32 = 3;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert f64 to Decimal, `None` when the value is non-finite or outside
/// the `Decimal` range. Pricing uses this so that no input is silently zeroed.
#[inline]
pub fn try_to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}

/// Round to currency precision
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Format an amount with exactly two decimals (`12.5` → `"12.50"`)
pub fn format_amount(value: f64) -> String {
    let mut rounded = round_money(to_decimal(value));
    rounded.rescale(DECIMAL_PLACES);
    rounded.to_string()
}

/// Format an amount with a currency symbol prefix (`"Rs.12.50"`)
pub fn format_currency(symbol: &str, value: f64) -> String {
    format!("{}{}", symbol, format_amount(value))
}

/// Validate a menu price: finite, non-negative, below [`MAX_PRICE`]
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && (0.0..=MAX_PRICE).contains(&price)
}
