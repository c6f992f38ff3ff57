//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::AppError;
use shared::error::ErrorCode;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu items, categories, usernames
pub const MAX_NAME_LEN: usize = 200;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 4;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a menu price: finite, non-negative and below the price ceiling.
pub fn validate_price(price: f64) -> Result<(), AppError> {
    if !shared::money::is_valid_price(price) {
        return Err(AppError::new(ErrorCode::MenuItemInvalidPrice).with_detail("price", price));
    }
    Ok(())
}

/// Validate a new password.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password is too long (max {MAX_PASSWORD_LEN})"
        )));
    }
    Ok(())
}
