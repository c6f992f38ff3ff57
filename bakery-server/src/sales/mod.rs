//! Sales aggregation
//!
//! Monthly totals over `[first instant of month, first instant of next
//! month)` in UTC, optionally restricted to the orders of one owner.

use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::db::repository::order;
use crate::utils::AppResult;
use shared::error::{AppError, ErrorCode};
use shared::models::{OrderSummary, SalesReport, SalesSummary};
use shared::money;
use shared::month::YearMonth;

/// Parse the `month` query parameter; it is required.
pub fn parse_month(raw: Option<&str>) -> AppResult<YearMonth> {
    match raw.map(str::trim).filter(|m| !m.is_empty()) {
        Some(raw) => YearMonth::parse(raw),
        None => Err(AppError::with_message(
            ErrorCode::InvalidMonth,
            "month=YYYY-MM required",
        )),
    }
}

/// Sum of order totals in the month
pub async fn monthly_summary(
    pool: &SqlitePool,
    month: YearMonth,
    owner_id: Option<i64>,
) -> AppResult<SalesSummary> {
    Ok(monthly_report(pool, month, owner_id).await?.summary)
}

/// Summary plus the order rows it was computed from
pub async fn monthly_report(
    pool: &SqlitePool,
    month: YearMonth,
    owner_id: Option<i64>,
) -> AppResult<SalesReport> {
    let orders =
        order::find_in_range(pool, month.start_millis(), month.end_millis(), owner_id).await?;
    let summary = summarize(month, &orders);

    tracing::debug!(
        month = %month,
        owner_id = ?owner_id,
        orders = summary.orders,
        total = summary.total,
        "Sales aggregated"
    );

    Ok(SalesReport { summary, orders })
}

fn summarize(month: YearMonth, orders: &[OrderSummary]) -> SalesSummary {
    let total: Decimal = orders.iter().map(|o| money::to_decimal(o.total)).sum();
    SalesSummary {
        month: month.to_string(),
        total: money::to_f64(total),
        orders: orders.len() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::user;
    use shared::models::OrderLine;

    const JAN_2024: i64 = 1_704_067_200_000;
    const FEB_2024: i64 = 1_706_745_600_000;

    async fn place(pool: &SqlitePool, total: f64, at: i64, owner: Option<i64>) -> i64 {
        let lines = vec![OrderLine {
            item_id: 1,
            name: "Puff - Veg".into(),
            unit_price: total,
            quantity: 1,
            weight: 1.0,
            line_subtotal: total,
        }];
        order::create(pool, &lines, total, owner, at).await.unwrap()
    }

    #[test]
    fn month_is_required() {
        let err = parse_month(None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidMonth);
        assert_eq!(err.message, "month=YYYY-MM required");
        assert!(parse_month(Some("")).is_err());
        assert!(parse_month(Some("2024-13")).is_err());
        assert_eq!(parse_month(Some("2024-01")).unwrap().to_string(), "2024-01");
    }

    #[tokio::test]
    async fn empty_month_is_zero() {
        let db = DbService::open_in_memory().await.unwrap();
        let month = YearMonth::parse("2024-01").unwrap();
        let summary = monthly_summary(&db.pool, month, None).await.unwrap();
        assert_eq!(summary.month, "2024-01");
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.orders, 0);
    }

    #[tokio::test]
    async fn first_instant_of_next_month_is_excluded() {
        let db = DbService::open_in_memory().await.unwrap();
        place(&db.pool, 100.0, JAN_2024, None).await;
        place(&db.pool, 50.5, FEB_2024 - 1, None).await;
        place(&db.pool, 999.0, FEB_2024, None).await;
        place(&db.pool, 999.0, JAN_2024 - 1, None).await;

        let month = YearMonth::parse("2024-01").unwrap();
        let summary = monthly_summary(&db.pool, month, None).await.unwrap();
        assert_eq!(summary.orders, 2);
        assert_eq!(summary.total, 150.5);

        let feb = monthly_summary(&db.pool, month.next(), None).await.unwrap();
        assert_eq!(feb.orders, 1);
        assert_eq!(feb.total, 999.0);
    }

    #[tokio::test]
    async fn totals_are_summed_exactly() {
        let db = DbService::open_in_memory().await.unwrap();
        for _ in 0..3 {
            place(&db.pool, 0.1, JAN_2024 + 1000, None).await;
        }
        let month = YearMonth::parse("2024-01").unwrap();
        let summary = monthly_summary(&db.pool, month, None).await.unwrap();
        assert_eq!(summary.total, 0.3);
    }

    #[tokio::test]
    async fn owner_scoping() {
        let db = DbService::open_in_memory().await.unwrap();
        let baker = user::create(&db.pool, "baker", "hash", "Baker").await.unwrap();
        place(&db.pool, 100.0, JAN_2024 + 1, Some(baker.id)).await;
        place(&db.pool, 40.0, JAN_2024 + 2, None).await;

        let month = YearMonth::parse("2024-01").unwrap();
        let mine = monthly_report(&db.pool, month, Some(baker.id)).await.unwrap();
        assert_eq!(mine.summary.orders, 1);
        assert_eq!(mine.summary.total, 100.0);
        assert_eq!(mine.orders.len(), 1);

        let all = monthly_summary(&db.pool, month, None).await.unwrap();
        assert_eq!(all.orders, 2);
        assert_eq!(all.total, 140.0);
    }
}
