//! Bakery Client - HTTP client and cart state for the bakery server
//!
//! - [`HttpClient`]: typed calls to the server API
//! - [`CartController`]: the shopping cart, persisted locally through a
//!   [`CartStore`] and submitted at checkout

pub mod cart;
pub mod config;
pub mod error;
pub mod http;

pub use cart::{CartController, CartStore, CheckoutApi, DisplayLine};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::error::{ApiResponse, AppError, ErrorCode};
pub use shared::models::{
    CartKey, CartLine, CreateOrderResponse, LoginResponse, MeResponse, MenuItem, Order,
    SalesSummary, UserInfo,
};
