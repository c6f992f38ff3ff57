//! Order Repository
//!
//! Orders are written once, inside a single transaction together with their
//! lines, and never updated afterwards.

use super::RepoResult;
use shared::models::{Order, OrderLine, OrderSummary};
use sqlx::SqlitePool;

/// Persist an order and its lines atomically, returning the new order id.
///
/// Ids come from `AUTOINCREMENT` and therefore strictly increase. If any
/// insert fails the transaction is rolled back and no partial order remains.
pub async fn create(
    pool: &SqlitePool,
    lines: &[OrderLine],
    total: f64,
    owner_id: Option<i64>,
    created_at: i64,
) -> RepoResult<i64> {
    let mut tx = pool.begin().await?;

    let order_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (created_at, total, owner_id) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(created_at)
    .bind(total)
    .bind(owner_id)
    .fetch_one(&mut *tx)
    .await?;

    for (position, line) in lines.iter().enumerate() {
        sqlx::query(
            "INSERT INTO order_line (order_id, position, item_id, name, unit_price, quantity, weight, line_subtotal) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(order_id)
        .bind(position as i64)
        .bind(line.item_id)
        .bind(&line.name)
        .bind(line.unit_price)
        .bind(line.quantity)
        .bind(line.weight)
        .bind(line.line_subtotal)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(order_id)
}

/// Load an order with its lines in insertion order.
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, created_at, total, owner_id FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(mut order) = order else {
        return Ok(None);
    };

    order.lines = sqlx::query_as::<_, OrderLine>(
        "SELECT item_id, name, unit_price, quantity, weight, line_subtotal FROM order_line WHERE order_id = ? ORDER BY position",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(order))
}

/// Orders with `from <= created_at < to`, oldest first, optionally
/// restricted to one owner.
pub async fn find_in_range(
    pool: &SqlitePool,
    from: i64,
    to: i64,
    owner_id: Option<i64>,
) -> RepoResult<Vec<OrderSummary>> {
    let orders = sqlx::query_as::<_, OrderSummary>(
        "SELECT id, total, created_at FROM orders WHERE created_at >= ?1 AND created_at < ?2 AND (?3 IS NULL OR owner_id = ?3) ORDER BY created_at, id",
    )
    .bind(from)
    .bind(to)
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}
