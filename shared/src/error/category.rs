//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Ranges without a category of their own are reserved and classified
/// as system errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Order errors (4xxx)
    Order,
    /// Payment errors (5xxx)
    Payment,
    /// Menu errors (6xxx)
    Menu,
    /// Sales errors (7xxx)
    Sales,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            4000..5000 => Self::Order,
            5000..6000 => Self::Payment,
            6000..7000 => Self::Menu,
            7000..8000 => Self::Sales,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Order => "order",
            Self::Payment => "payment",
            Self::Menu => "menu",
            Self::Sales => "sales",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Order);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Payment);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Menu);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::Sales);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::EmptyCart.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::InvalidMonth.category(), ErrorCategory::Sales);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
        assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Auth);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Sales).unwrap();
        assert_eq!(json, "\"sales\"");
        let category: ErrorCategory = serde_json::from_str("\"menu\"").unwrap();
        assert_eq!(category, ErrorCategory::Menu);
    }
}
