//! Cart Controller
//!
//! Client-side cart state. Lines are identified by the full
//! `(item_id, weight)` pair ([`CartKey`]); quantities are always at least 1
//! and a line that would drop to 0 is removed. Every mutation is saved to
//! the [`CartStore`] before returning.
//!
//! Totals shown here are advisory. The server prices every checkout from
//! its own menu.

mod store;

pub use store::{CART_FILE, CartStore};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{ClientResult, HttpClient};
use shared::error::AppError;
use shared::models::{
    CartKey, CartLine, CreateOrderRequest, CreateOrderResponse, MenuItem, OrderItemRequest,
};
use shared::money;
use shared::pricing::{self, CatalogLookup, UNKNOWN_ITEM_NAME, line_amount};

/// Order submission used at checkout
#[async_trait]
pub trait CheckoutApi: Send + Sync {
    async fn submit_order(&self, request: &CreateOrderRequest) -> ClientResult<CreateOrderResponse>;
}

#[async_trait]
impl CheckoutApi for HttpClient {
    async fn submit_order(&self, request: &CreateOrderRequest) -> ClientResult<CreateOrderResponse> {
        self.create_order(request).await
    }
}

/// One cart line resolved against the menu for display
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayLine {
    pub key: CartKey,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub weight: f64,
    pub subtotal: f64,
}

/// Shopping cart with local persistence
#[derive(Debug)]
pub struct CartController {
    store: CartStore,
    lines: Vec<CartLine>,
    last_order_id: Option<i64>,
}

impl CartController {
    /// Open the cart saved in `store` (empty if none)
    pub fn open(store: CartStore) -> Self {
        let lines = store.load();
        tracing::debug!(lines = lines.len(), path = %store.path().display(), "Cart loaded");
        Self {
            store,
            lines,
            last_order_id: None,
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Id of the last order placed through [`checkout`](Self::checkout)
    pub fn last_order_id(&self) -> Option<i64> {
        self.last_order_id
    }

    pub fn line(&self, key: &CartKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(key))
    }

    // ========== Mutations ==========

    /// Add one unit of `item_id` at `weight` (1 when absent). A weight the
    /// server would reject is refused here and the cart is left unchanged.
    pub fn add(&mut self, item_id: i64, weight: Option<f64>) -> ClientResult<CartKey> {
        let weight = pricing::validate_weight(item_id, weight)?;
        let key = CartKey::new(item_id, Some(weight));
        match self.lines.iter_mut().find(|l| l.matches(&key)) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                item_id: key.item_id,
                quantity: 1,
                weight: key.weight,
            }),
        }
        self.persist()?;
        Ok(key)
    }

    /// Change the quantity of the line with `key` by `delta`; the line is
    /// removed when the result is 0 or below. Unknown keys are ignored.
    pub fn change_quantity(&mut self, key: &CartKey, delta: i64) -> ClientResult<()> {
        let Some(index) = self.lines.iter().position(|l| l.matches(key)) else {
            return Ok(());
        };

        let quantity = self.lines[index].quantity.saturating_add(delta);
        if quantity <= 0 {
            self.lines.remove(index);
        } else {
            self.lines[index].quantity = quantity;
        }
        self.persist()
    }

    /// Remove the line with `key`
    pub fn remove(&mut self, key: &CartKey) -> ClientResult<()> {
        self.lines.retain(|l| !l.matches(key));
        self.persist()
    }

    /// Empty the cart
    pub fn clear(&mut self) -> ClientResult<()> {
        self.lines.clear();
        self.persist()
    }

    fn persist(&self) -> ClientResult<()> {
        self.store.save(&self.lines)
    }

    // ========== Display ==========

    /// Lines priced against `menu`; items missing from the menu show as
    /// "Unknown" at price 0
    pub fn display_lines(&self, menu: &[MenuItem]) -> ClientResult<Vec<DisplayLine>> {
        self.lines
            .iter()
            .map(|line| {
                let (name, unit_price) = match menu.lookup(line.item_id) {
                    Some(entry) => (entry.name, entry.price),
                    None => (UNKNOWN_ITEM_NAME.to_string(), 0.0),
                };
                let amount = line_amount(line.item_id, unit_price, line.quantity, line.weight)?;
                Ok(DisplayLine {
                    key: line.key(),
                    name,
                    unit_price,
                    quantity: line.quantity,
                    weight: line.weight,
                    subtotal: money::to_f64(amount),
                })
            })
            .collect()
    }

    /// Cart total against `menu`, rounded once
    pub fn display_total(&self, menu: &[MenuItem]) -> ClientResult<f64> {
        let mut total = Decimal::ZERO;
        for line in &self.lines {
            let price = menu.lookup(line.item_id).map_or(0.0, |e| e.price);
            let amount = line_amount(line.item_id, price, line.quantity, line.weight)?;
            total = total
                .checked_add(amount)
                .ok_or_else(|| AppError::line_amount_out_of_range(line.item_id))?;
        }
        Ok(money::to_f64(total))
    }

    // ========== Checkout ==========

    /// Checkout payload: item references only, never prices
    pub fn order_request(&self) -> CreateOrderRequest {
        CreateOrderRequest {
            items: self.lines.iter().map(OrderItemRequest::from).collect(),
        }
    }

    /// Submit the cart. On success the cart is cleared and the order id
    /// remembered; on failure the cart is left untouched.
    pub async fn checkout<A>(&mut self, api: &A) -> ClientResult<CreateOrderResponse>
    where
        A: CheckoutApi + ?Sized,
    {
        if self.lines.is_empty() {
            return Err(AppError::empty_cart().into());
        }

        let response = api.submit_order(&self.order_request()).await?;
        tracing::info!(order_id = response.order_id, total = response.total, "Order placed");

        self.last_order_id = Some(response.order_id);
        self.clear()?;
        Ok(response)
    }
}
