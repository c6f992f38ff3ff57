//! Menu Catalog - menu management with an in-memory cache
//!
//! The cache holds the whole menu as one snapshot. Every create, update or
//! delete goes through [`MenuCatalog`] and invalidates it, so pricing never
//! reads a menu older than the last committed change.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use sqlx::SqlitePool;

use crate::db::repository::menu;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text, validate_price, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::error::ErrorCode;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

/// Menu catalog service
#[derive(Clone)]
pub struct MenuCatalog {
    pool: SqlitePool,
    /// Current menu snapshot, `None` until loaded or after invalidation
    cache: Arc<RwLock<Option<Arc<Vec<MenuItem>>>>>,
    /// Bumped on every invalidation; a load only fills the cache if no
    /// invalidation happened while it was reading
    generation: Arc<AtomicU64>,
}

impl std::fmt::Debug for MenuCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self.cache.read().as_ref().map(|items| items.len());
        f.debug_struct("MenuCatalog")
            .field("cached_items", &cached)
            .field("generation", &self.generation.load(Ordering::Acquire))
            .finish()
    }
}

impl MenuCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            cache: Arc::new(RwLock::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current menu, ordered by category then name
    pub async fn snapshot(&self) -> AppResult<Arc<Vec<MenuItem>>> {
        let cached = self.cache.read().clone();
        if let Some(items) = cached {
            return Ok(items);
        }

        let generation = self.generation.load(Ordering::Acquire);
        let items = Arc::new(menu::find_all(&self.pool).await?);

        let mut cache = self.cache.write();
        if self.generation.load(Ordering::Acquire) == generation {
            *cache = Some(items.clone());
            tracing::debug!(items = items.len(), "Menu cache loaded");
        }
        Ok(items)
    }

    /// Drop the cached snapshot
    pub fn invalidate(&self) {
        let mut cache = self.cache.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        *cache = None;
    }

    pub async fn create(&self, data: MenuItemCreate) -> AppResult<MenuItem> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&data.category, "category", MAX_NAME_LEN)?;
        validate_optional_text(&data.image, "image", MAX_URL_LEN)?;
        validate_price(data.price)?;

        let item = menu::create(&self.pool, data).await?;
        self.invalidate();
        tracing::debug!(id = item.id, "Menu cache invalidated after create");
        Ok(item)
    }

    pub async fn update(&self, id: i64, data: MenuItemUpdate) -> AppResult<MenuItem> {
        if let Some(name) = &data.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(category) = &data.category {
            validate_required_text(category, "category", MAX_NAME_LEN)?;
        }
        validate_optional_text(&data.image, "image", MAX_URL_LEN)?;
        if let Some(price) = data.price {
            validate_price(price)?;
        }

        let item = menu::update(&self.pool, id, data)
            .await
            .map_err(|e| match AppError::from(e) {
                err if err.code == ErrorCode::NotFound => menu_item_not_found(id),
                err => err,
            })?;
        self.invalidate();
        tracing::debug!(id, "Menu cache invalidated after update");
        Ok(item)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !menu::delete(&self.pool, id).await? {
            return Err(menu_item_not_found(id));
        }
        self.invalidate();
        tracing::debug!(id, "Menu cache invalidated after delete");
        Ok(())
    }
}

fn menu_item_not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::MenuItemNotFound,
        format!("Menu item {} not found", id),
    )
    .with_detail("item_id", id)
}
