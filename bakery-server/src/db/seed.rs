//! First-start data
//!
//! Seeds the default menu and the `admin` account when their tables are
//! empty. Running it again on a populated database changes nothing.

use sqlx::SqlitePool;

use crate::auth::password;
use crate::db::repository::{menu, user};
use crate::utils::{AppError, AppResult};
use shared::models::MenuItemCreate;

/// Default administrator (change the password after first login)
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "password";
const DEFAULT_ADMIN_DISPLAY_NAME: &str = "Administrator";

const IMG: &str = "https://images.unsplash.com";

/// (name, category, price, image path)
const DEFAULT_MENU: [(&str, &str, f64, &str); 15] = [
    ("Puff - Chicken", "Puff", 60.0, "photo-1604908177522-1a2d1b3f7c89"),
    ("Puff - Egg", "Puff", 50.0, "photo-1542831371-d531d36971e6"),
    ("Puff - Mushroom", "Puff", 65.0, "photo-1517248135467-4c7edcad34c4"),
    ("Puff - Veg", "Puff", 45.0, "photo-1508739773434-c26b3d09e071"),
    ("Mixture", "Snacks", 30.0, "photo-1543353071-873f17a7a088"),
    ("Cake - Blackforest", "Cake", 900.0, "photo-1544378736-9b6e0b0ef2d2"),
    ("Cake - Blueberry", "Cake", 850.0, "photo-1505250469679-203ad9ced0cb"),
    ("Cake - Honey", "Cake", 800.0, "photo-1532634896-26909d0d2186"),
    ("Cake - Vanilla", "Cake", 750.0, "photo-1542224566-3a4d6baf7d9d"),
    ("Cake - Chocolate", "Cake", 950.0, "photo-1542826438-1c15e7afc1f0"),
    ("Potato Chips", "Chips", 40.0, "photo-1584270354949-4b8f2d2e4f2a"),
    ("Wheel Chips", "Chips", 45.0, "photo-1604908177522-1a2d1b3f7c89"),
    ("Fried Rice - Chicken", "FriedRice", 120.0, "photo-1604908177522-1a2d1b3f7c89"),
    ("Fried Rice - Egg", "FriedRice", 100.0, "photo-1546069901-ba9599a7e63c"),
    ("Fried Rice - Veg", "FriedRice", 90.0, "photo-1543353071-873f17a7a088"),
];

/// Insert the default menu when `menu_item` is empty; returns rows inserted.
pub async fn seed_menu(pool: &SqlitePool) -> AppResult<usize> {
    if menu::count(pool).await? > 0 {
        return Ok(0);
    }

    for (name, category, price, photo) in DEFAULT_MENU {
        menu::create(
            pool,
            MenuItemCreate {
                name: name.to_string(),
                category: category.to_string(),
                price,
                image: Some(format!("{IMG}/{photo}?auto=format&fit=crop&w=800&q=60")),
            },
        )
        .await?;
    }

    tracing::info!(items = DEFAULT_MENU.len(), "Seeded default menu");
    Ok(DEFAULT_MENU.len())
}

/// Create the `admin` account when no user exists; returns whether it was created.
pub async fn seed_admin(pool: &SqlitePool) -> AppResult<bool> {
    if user::count(pool).await? > 0 {
        return Ok(false);
    }

    let hash = password::hash_password(DEFAULT_ADMIN_PASSWORD)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    user::create(
        pool,
        DEFAULT_ADMIN_USERNAME,
        &hash,
        DEFAULT_ADMIN_DISPLAY_NAME,
    )
    .await?;

    tracing::warn!(
        username = DEFAULT_ADMIN_USERNAME,
        "Seeded default admin user, change its password"
    );
    Ok(true)
}
