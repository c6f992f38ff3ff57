//! Unified error codes for the bakery services
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Menu errors
//! - 7xxx: Sales errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the server, the client
/// crate and any browser front end agree on a compact wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Password too short
    PasswordTooShort = 1010,
    /// Username already taken
    UsernameExists = 1011,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Cart has no lines
    EmptyCart = 4002,
    /// Quantity is zero, negative or above the allowed maximum
    InvalidQuantity = 4003,
    /// Weight above the maximum or with more than three decimals
    InvalidWeight = 4004,
    /// Line amount does not fit the decimal range
    LineAmountOutOfRange = 4005,

    // ==================== 5xxx: Payment ====================
    /// Payment amount is not a valid number
    InvalidAmount = 5001,
    /// QR code could not be produced
    QrCodeFailed = 5002,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item has invalid price
    MenuItemInvalidPrice = 6002,

    // ==================== 7xxx: Sales ====================
    /// Month parameter is not `YYYY-MM`
    InvalidMonth = 7001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Document rendering failed
    RenderFailed = 9202,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::PasswordTooShort => "Password must be at least 4 characters",
            ErrorCode::UsernameExists => "User already exists",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::EmptyCart => "Cart is empty",
            ErrorCode::InvalidQuantity => "Invalid quantity",
            ErrorCode::InvalidWeight => "Invalid weight",
            ErrorCode::LineAmountOutOfRange => "Line amount is out of range",

            // Payment
            ErrorCode::InvalidAmount => "Invalid payment amount",
            ErrorCode::QrCodeFailed => "Failed to generate QR code",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemInvalidPrice => "Menu item has invalid price",

            // Sales
            ErrorCode::InvalidMonth => "Month must be formatted as YYYY-MM",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::RenderFailed => "Failed to render document",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1010 => Ok(ErrorCode::PasswordTooShort),
            1011 => Ok(ErrorCode::UsernameExists),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::EmptyCart),
            4003 => Ok(ErrorCode::InvalidQuantity),
            4004 => Ok(ErrorCode::InvalidWeight),
            4005 => Ok(ErrorCode::LineAmountOutOfRange),

            // Payment
            5001 => Ok(ErrorCode::InvalidAmount),
            5002 => Ok(ErrorCode::QrCodeFailed),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6002 => Ok(ErrorCode::MenuItemInvalidPrice),

            // Sales
            7001 => Ok(ErrorCode::InvalidMonth),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9202 => Ok(ErrorCode::RenderFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::EmptyCart.code(), 4002);
        assert_eq!(ErrorCode::InvalidQuantity.code(), 4003);
        assert_eq!(ErrorCode::InvalidMonth.code(), 7001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_u16() {
        assert_eq!(ErrorCode::try_from(4002), Ok(ErrorCode::EmptyCart));
        assert_eq!(ErrorCode::try_from(7001), Ok(ErrorCode::InvalidMonth));
        assert_eq!(ErrorCode::try_from(4004), Ok(ErrorCode::InvalidWeight));
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::InvalidQuantity).unwrap();
        assert_eq!(json, "4003");

        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::OrderNotFound);

        assert!(serde_json::from_str::<ErrorCode>("4999").is_err());
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::EmptyCart.is_success());
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }
}
