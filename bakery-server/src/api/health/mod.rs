//! 健康检查
//!
//! | 路径 | 说明 |
//! |------|------|
//! | GET /health | 存活探针，不访问数据库 |
//! | GET /health/detailed | 数据库往返、菜单与订单计数、运行时长 |

use std::sync::OnceLock;
use std::time::Instant;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 首次探测时记录
static STARTED_AT: OnceLock<Instant> = OnceLock::new();

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/detailed", get(detailed_health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
pub struct DetailedHealthResponse {
    /// ok | degraded
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
    database: DatabaseCheck,
}

#[derive(Serialize)]
pub struct DatabaseCheck {
    status: &'static str,
    latency_ms: Option<u64>,
    menu_items: Option<i64>,
    orders: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

pub async fn health() -> Json<HealthResponse> {
    STARTED_AT.get_or_init(Instant::now);
    Json(HealthResponse {
        status: "ok",
        version: VERSION,
    })
}

pub async fn detailed_health(State(state): State<ServerState>) -> Json<DetailedHealthResponse> {
    let database = check_database(&state).await;
    Json(DetailedHealthResponse {
        status: if database.status == "ok" { "ok" } else { "degraded" },
        version: VERSION,
        uptime_seconds: STARTED_AT.get_or_init(Instant::now).elapsed().as_secs(),
        database,
    })
}

async fn check_database(state: &ServerState) -> DatabaseCheck {
    let start = Instant::now();
    let counts = sqlx::query_as::<_, (i64, i64)>(
        "SELECT (SELECT COUNT(*) FROM menu_item), (SELECT COUNT(*) FROM orders)",
    )
    .fetch_one(state.pool())
    .await;

    match counts {
        Ok((menu_items, orders)) => DatabaseCheck {
            status: "ok",
            latency_ms: Some(start.elapsed().as_millis() as u64),
            menu_items: Some(menu_items),
            orders: Some(orders),
            message: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check database query failed");
            DatabaseCheck {
                status: "error",
                latency_ms: None,
                menu_items: None,
                orders: None,
                message: Some(e.to_string()),
            }
        }
    }
}
