//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    /// Unit price in currency unit (per kg for weighted items)
    pub price: f64,
    /// Image URL, empty when none
    pub image: String,
}

impl MenuItem {
    /// Items sold by weight offer the weight picker on the client
    pub fn is_weighted(&self) -> bool {
        self.category.eq_ignore_ascii_case("cake") || self.name.to_lowercase().contains("mixture")
    }
}

/// Weight options offered for weighted items (kg)
pub const WEIGHT_OPTIONS: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub image: Option<String>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: &str) -> MenuItem {
        MenuItem {
            id: 1,
            name: name.to_string(),
            category: category.to_string(),
            price: 10.0,
            image: String::new(),
        }
    }

    #[test]
    fn weighted_items() {
        assert!(item("Black Forest", "Cake").is_weighted());
        assert!(item("Kerala Mixture", "Snacks").is_weighted());
        assert!(!item("Veg Puff", "Puff").is_weighted());
    }
}
