//! 认证模块
//!
//! 提供 JWT 认证和密码哈希：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文 (必须登录)
//! - [`OptionalUser`] - 可选登录 (订单归属、销售统计范围)
//! - [`password`] - Argon2 密码哈希

pub mod extractor;
pub mod jwt;
pub mod password;

pub use extractor::OptionalUser;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
