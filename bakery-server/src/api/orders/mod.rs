//! Order API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/order", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/invoice", get(handler::invoice))
}
