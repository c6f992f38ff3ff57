//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, category, price, image FROM menu_item ORDER BY category, name",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let item = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, category, price, image FROM menu_item WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menu_item")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO menu_item (name, category, price, image) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.category)
    .bind(data.price)
    .bind(data.image.unwrap_or_default())
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
    let rows = sqlx::query(
        "UPDATE menu_item SET name = COALESCE(?1, name), category = COALESCE(?2, category), price = COALESCE(?3, price), image = COALESCE(?4, image) WHERE id = ?5",
    )
    .bind(data.name)
    .bind(data.category)
    .bind(data.price)
    .bind(data.image)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Delete a menu item; persisted orders keep their own snapshot of it.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn item(name: &str, category: &str, price: f64) -> MenuItemCreate {
        MenuItemCreate {
            name: name.into(),
            category: category.into(),
            price,
            image: None,
        }
    }

    #[tokio::test]
    async fn create_and_list_ordered_by_category_then_name() {
        let db = DbService::open_in_memory().await.unwrap();
        create(&db.pool, item("Veg Puff", "Puff", 30.0)).await.unwrap();
        create(&db.pool, item("Black Forest", "Cake", 450.0)).await.unwrap();
        create(&db.pool, item("Egg Puff", "Puff", 35.0)).await.unwrap();

        let names: Vec<String> = find_all(&db.pool)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Black Forest", "Egg Puff", "Veg Puff"]);
        assert_eq!(count(&db.pool).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn image_defaults_to_empty() {
        let db = DbService::open_in_memory().await.unwrap();
        let created = create(&db.pool, item("Chips", "Chips", 40.0)).await.unwrap();
        assert_eq!(created.image, "");
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let db = DbService::open_in_memory().await.unwrap();
        let created = create(&db.pool, item("Veg Puff", "Puff", 30.0)).await.unwrap();

        let updated = update(
            &db.pool,
            created.id,
            MenuItemUpdate {
                price: Some(32.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Veg Puff");
        assert_eq!(updated.category, "Puff");
        assert_eq!(updated.price, 32.5);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let db = DbService::open_in_memory().await.unwrap();
        let err = update(&db.pool, 42, MenuItemUpdate::default()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let db = DbService::open_in_memory().await.unwrap();
        let created = create(&db.pool, item("Veg Puff", "Puff", 30.0)).await.unwrap();
        assert!(delete(&db.pool, created.id).await.unwrap());
        assert!(!delete(&db.pool, created.id).await.unwrap());
        assert!(find_by_id(&db.pool, created.id).await.unwrap().is_none());
    }
}
