//! User Repository

use super::{RepoError, RepoResult};
use shared::models::User;
use sqlx::SqlitePool;

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, display_name FROM app_user WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, display_name FROM app_user WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM app_user")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert a user; the password must already be hashed.
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    display_name: &str,
) -> RepoResult<User> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO app_user (username, password_hash, display_name) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(username)
    .bind(password_hash)
    .bind(display_name)
    .fetch_one(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!("Username {username}")),
        other => other,
    })?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn create_and_find() {
        let db = DbService::open_in_memory().await.unwrap();
        let user = create(&db.pool, "baker", "$argon2id$hash", "Head Baker")
            .await
            .unwrap();

        let found = find_by_username(&db.pool, "baker").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.password_hash, "$argon2id$hash");
        assert_eq!(found.display_name, "Head Baker");
        assert!(find_by_username(&db.pool, "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let db = DbService::open_in_memory().await.unwrap();
        create(&db.pool, "baker", "h1", "Baker").await.unwrap();
        let err = create(&db.pool, "baker", "h2", "Other").await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }
}
