//! Auth API 模块
//!
//! | 路径 | 方法 | 认证 |
//! |------|------|------|
//! | /api/auth/register | POST | 无 |
//! | /api/auth/login | POST | 无 |
//! | /api/auth/me | GET | 可选 |
//! | /api/auth/logout | POST | 可选 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/me", get(handler::me))
        .route("/logout", post(handler::logout))
}
