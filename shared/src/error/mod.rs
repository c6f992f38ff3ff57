//! Unified error system for the bakery services
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::EmptyCart);
//! let err = AppError::validation("Missing required field")
//!     .with_detail("field", "name");
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(2));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
