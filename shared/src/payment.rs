//! Payment text encoded into the checkout QR code

use crate::error::{AppError, AppResult, ErrorCode};
use crate::money;

/// Build the QR payload: `"<label> - Pay <amount>"`, or `"Pay <amount>"`
/// when the label is absent or blank. Amounts are printed with two decimals.
pub fn payment_text(label: Option<&str>, amount: f64) -> String {
    let amount = money::format_amount(amount);
    match label.map(str::trim).filter(|l| !l.is_empty()) {
        Some(label) => format!("{} - Pay {}", label, amount),
        None => format!("Pay {}", amount),
    }
}

/// Parse the `amount` query value; absent means 0.
pub fn parse_amount(raw: Option<&str>) -> AppResult<f64> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(0.0);
    };
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(AppError::new(ErrorCode::InvalidAmount).with_detail("amount", raw)),
    }
}
