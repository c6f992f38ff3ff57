//! Sales API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sales", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::summary))
        .route("/pdf", get(handler::report_pdf))
}
