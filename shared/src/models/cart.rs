//! Cart Model (client-side, persisted locally)

use serde::{Deserialize, Serialize};

/// Identity of a cart line: the item together with its weight factor.
///
/// Two lines for the same item but different weights are distinct lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartKey {
    pub item_id: i64,
    pub weight: f64,
}

impl CartKey {
    pub fn new(item_id: i64, weight: Option<f64>) -> Self {
        Self {
            item_id,
            weight: crate::pricing::normalize_weight(weight),
        }
    }
}

/// One line of the shopping cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: i64,
    /// Always ≥ 1; a line reaching 0 is removed
    pub quantity: i64,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl CartLine {
    pub fn key(&self) -> CartKey {
        CartKey {
            item_id: self.item_id,
            weight: self.weight,
        }
    }

    pub fn matches(&self, key: &CartKey) -> bool {
        self.key() == *key
    }
}

impl From<&CartLine> for super::OrderItemRequest {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.item_id,
            qty: Some(line.quantity),
            weight: Some(line.weight),
        }
    }
}
