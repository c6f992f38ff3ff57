//! 订单服务
//!
//! 结账流程: 菜单快照 → 定价 → 单事务落库。
//! 客户端从不提交金额，所有价格都取自服务端菜单。

use sqlx::SqlitePool;

use crate::catalog::MenuCatalog;
use crate::db::repository::order;
use crate::utils::AppResult;
use shared::error::AppError;
use shared::models::{CreateOrderRequest, CreateOrderResponse, Order};
use shared::pricing;

/// 订单服务
#[derive(Clone, Debug)]
pub struct OrderService {
    pool: SqlitePool,
    catalog: MenuCatalog,
}

impl OrderService {
    pub fn new(pool: SqlitePool, catalog: MenuCatalog) -> Self {
        Self { pool, catalog }
    }

    /// 创建订单
    ///
    /// 空购物车或非法数量时不会写入任何数据。
    pub async fn create(
        &self,
        request: &CreateOrderRequest,
        owner_id: Option<i64>,
    ) -> AppResult<CreateOrderResponse> {
        let menu = self.catalog.snapshot().await?;
        let priced = pricing::price_order(&request.items, menu.as_slice())?;

        let created_at = shared::util::now_millis();
        let order_id =
            order::create(&self.pool, &priced.lines, priced.total, owner_id, created_at).await?;

        tracing::info!(
            order_id,
            total = priced.total,
            lines = priced.lines.len(),
            owner_id = ?owner_id,
            "Order created"
        );

        Ok(CreateOrderResponse {
            order_id,
            total: priced.total,
            items: priced.lines,
        })
    }

    /// 按 ID 获取订单 (含明细)
    pub async fn get(&self, order_id: i64) -> AppResult<Order> {
        order::find_by_id(&self.pool, order_id)
            .await?
            .ok_or_else(|| AppError::unknown_order(order_id))
    }
}
