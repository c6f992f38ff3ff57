//! Data models
//!
//! Shared between bakery-server and bakery-client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).
//! Money is `f64` in currency unit; calculations go through [`crate::money`].

pub mod cart;
pub mod common;
pub mod menu;
pub mod order;
pub mod payment;
pub mod sales;
pub mod user;

// Re-exports
pub use cart::*;
pub use common::*;
pub use menu::*;
pub use order::*;
pub use payment::*;
pub use sales::*;
pub use user::*;
