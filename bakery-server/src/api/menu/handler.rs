//! Menu API Handlers
//!
//! 读取公开；增删改需要登录 ([`CurrentUser`] 提取器)。

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate, OkResponse};

/// GET /api/menu - 获取菜单 (按分类、名称排序)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let menu = state.catalog.snapshot().await?;
    Ok(Json(menu.as_ref().clone()))
}

/// POST /api/menu - 新增菜品
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    let item = state.catalog.create(payload).await?;
    tracing::info!(
        item_id = item.id,
        name = %item.name,
        operator = %current_user.username,
        "Menu item created"
    );
    Ok(Json(item))
}

/// PUT /api/menu/:id - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let item = state.catalog.update(id, payload).await?;
    tracing::info!(item_id = id, operator = %current_user.username, "Menu item updated");
    Ok(Json(item))
}

/// DELETE /api/menu/:id - 删除菜品
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<OkResponse>> {
    state.catalog.delete(id).await?;
    tracing::info!(item_id = id, operator = %current_user.username, "Menu item deleted");
    Ok(Json(OkResponse::ok()))
}
