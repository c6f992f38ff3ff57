//! Shared types for the bakery point-of-sale services
//!
//! Data model, error types, response structures, and the pure business
//! rules (pricing, month windows, payment text) used by both the server
//! and the client.

pub mod error;
pub mod models;
pub mod money;
pub mod month;
pub mod payment;
pub mod pricing;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
