//! Order pricing
//!
//! Turns requested cart entries into priced [`OrderLine`]s using catalogue
//! prices only. Line amounts are `price × quantity × weight`, computed in
//! `Decimal`. The order total is the unrounded sum rounded once; persisted
//! line subtotals are rounded to cents with the largest-remainder method so
//! that they always add up to the total exactly.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{MenuItem, OrderItemRequest, OrderLine};
use crate::money::{self, MAX_QUANTITY, MAX_WEIGHT, WEIGHT_DECIMAL_PLACES};
use rust_decimal::prelude::*;
use std::collections::HashMap;

/// Name recorded for lines whose item is not in the catalogue
pub const UNKNOWN_ITEM_NAME: &str = "Unknown";

/// Catalogue data needed to price a line
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub price: f64,
}

/// Read access to current catalogue prices
pub trait CatalogLookup {
    fn lookup(&self, item_id: i64) -> Option<CatalogEntry>;
}

impl CatalogLookup for HashMap<i64, CatalogEntry> {
    fn lookup(&self, item_id: i64) -> Option<CatalogEntry> {
        self.get(&item_id).cloned()
    }
}

impl CatalogLookup for [MenuItem] {
    fn lookup(&self, item_id: i64) -> Option<CatalogEntry> {
        self.iter().find(|m| m.id == item_id).map(|m| CatalogEntry {
            name: m.name.clone(),
            price: m.price,
        })
    }
}

impl CatalogLookup for Vec<MenuItem> {
    fn lookup(&self, item_id: i64) -> Option<CatalogEntry> {
        self.as_slice().lookup(item_id)
    }
}

/// Priced order, ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct PricedOrder {
    pub lines: Vec<OrderLine>,
    pub total: f64,
}

/// Weight factor with defaults applied: absent, NaN or non-positive → 1
pub fn normalize_weight(weight: Option<f64>) -> f64 {
    match weight {
        Some(w) if w > 0.0 => w,
        _ => 1.0,
    }
}

/// Weight with defaults applied; rejects anything above [`MAX_WEIGHT`] or
/// with more than [`WEIGHT_DECIMAL_PLACES`] decimals, so the priced weight is
/// exactly the one printed on the invoice.
pub fn validate_weight(item_id: i64, weight: Option<f64>) -> AppResult<f64> {
    let weight = normalize_weight(weight);
    if weight > MAX_WEIGHT {
        return Err(AppError::invalid_weight(item_id, weight));
    }
    let scale = 10_f64.powi(WEIGHT_DECIMAL_PLACES as i32);
    let scaled = weight * scale;
    if (scaled - scaled.round()).abs() > 1e-6 {
        return Err(AppError::invalid_weight(item_id, weight));
    }
    Ok(scaled.round() / scale)
}

/// Quantity with defaults applied; rejects `≤ 0` and anything above [`MAX_QUANTITY`]
pub fn normalize_quantity(item_id: i64, quantity: Option<i64>) -> AppResult<i64> {
    match quantity {
        None => Ok(1),
        Some(q) if (1..=MAX_QUANTITY).contains(&q) => Ok(q),
        Some(q) => Err(AppError::invalid_quantity(item_id, q)),
    }
}

/// Unrounded amount of one line; errors instead of overflowing
pub fn line_amount(
    item_id: i64,
    unit_price: f64,
    quantity: i64,
    weight: f64,
) -> AppResult<Decimal> {
    let out_of_range = || AppError::line_amount_out_of_range(item_id);
    let price = money::try_to_decimal(unit_price).ok_or_else(out_of_range)?;
    let weight = money::try_to_decimal(weight).ok_or_else(out_of_range)?;
    price
        .checked_mul(Decimal::from(quantity))
        .and_then(|v| v.checked_mul(weight))
        .ok_or_else(out_of_range)
}

/// Price a checkout request against the catalogue.
///
/// Unknown items are recorded at price 0 under [`UNKNOWN_ITEM_NAME`].
pub fn price_order<C>(items: &[OrderItemRequest], catalog: &C) -> AppResult<PricedOrder>
where
    C: CatalogLookup + ?Sized,
{
    if items.is_empty() {
        return Err(AppError::empty_cart());
    }

    let mut lines = Vec::with_capacity(items.len());
    let mut exact = Vec::with_capacity(items.len());

    for item in items {
        let quantity = normalize_quantity(item.id, item.qty)?;
        let weight = validate_weight(item.id, item.weight)?;
        let (name, unit_price) = match catalog.lookup(item.id) {
            Some(entry) => (entry.name, entry.price),
            None => {
                tracing::warn!(item_id = item.id, "Unknown menu item priced at zero");
                (UNKNOWN_ITEM_NAME.to_string(), 0.0)
            }
        };

        exact.push(line_amount(item.id, unit_price, quantity, weight)?);
        lines.push(OrderLine {
            item_id: item.id,
            name,
            unit_price,
            quantity,
            weight,
            line_subtotal: 0.0,
        });
    }

    let total = exact
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
        .ok_or_else(|| AppError::new(ErrorCode::LineAmountOutOfRange))?;
    let total = money::round_money(total);
    let subtotals = allocate_cents(&exact, total);
    for (line, subtotal) in lines.iter_mut().zip(subtotals) {
        line.line_subtotal = money::to_f64(subtotal);
    }

    Ok(PricedOrder {
        lines,
        total: money::to_f64(total),
    })
}

/// Round each amount down to cents, then hand the remaining cents of
/// `total` to the amounts with the largest truncated remainder (earlier
/// lines win ties).
fn allocate_cents(exact: &[Decimal], total: Decimal) -> Vec<Decimal> {
    let cent = Decimal::new(1, money::DECIMAL_PLACES);
    let mut floors: Vec<Decimal> = exact
        .iter()
        .map(|v| v.round_dp_with_strategy(money::DECIMAL_PLACES, RoundingStrategy::ToZero))
        .collect();

    let floor_sum: Decimal = floors.iter().copied().sum();
    let residual = ((total - floor_sum) / cent).round().to_i64().unwrap_or(0);
    if residual <= 0 {
        return floors;
    }

    let mut order: Vec<usize> = (0..exact.len()).collect();
    order.sort_by(|&a, &b| (exact[b] - floors[b]).cmp(&(exact[a] - floors[a])).then(a.cmp(&b)));
    for &idx in order.iter().take(residual as usize) {
        floors[idx] += cent;
    }
    floors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::to_decimal;

    fn catalog() -> HashMap<i64, CatalogEntry> {
        let mut map = HashMap::new();
        map.insert(
            1,
            CatalogEntry {
                name: "A".into(),
                price: 100.0,
            },
        );
        map.insert(
            2,
            CatalogEntry {
                name: "Black Forest".into(),
                price: 0.1,
            },
        );
        map.insert(
            3,
            CatalogEntry {
                name: "Kerala Mixture".into(),
                price: 16.125,
            },
        );
        map
    }

    fn req(id: i64, qty: Option<i64>, weight: Option<f64>) -> OrderItemRequest {
        OrderItemRequest { id, qty, weight }
    }

    fn line_sum(order: &PricedOrder) -> Decimal {
        order
            .lines
            .iter()
            .map(|l| money::round_money(to_decimal(l.line_subtotal)))
            .sum()
    }

    fn total_of(order: &PricedOrder) -> Decimal {
        money::round_money(to_decimal(order.total))
    }

    #[test]
    fn weighted_line_example() {
        let order = price_order(&[req(1, Some(2), Some(1.5))], &catalog()).unwrap();
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].line_subtotal, 300.0);
        assert_eq!(order.total, 300.0);
    }

    #[test]
    fn same_item_different_weights_are_separate_lines() {
        let order = price_order(
            &[req(1, Some(3), None), req(1, Some(1), Some(2.0))],
            &catalog(),
        )
        .unwrap();
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[0].line_subtotal, 300.0);
        assert_eq!(order.lines[1].line_subtotal, 200.0);
        assert_eq!(order.total, 500.0);
    }

    #[test]
    fn defaults_for_missing_quantity_and_weight() {
        let order = price_order(&[req(1, None, None)], &catalog()).unwrap();
        assert_eq!(order.lines[0].quantity, 1);
        assert_eq!(order.lines[0].weight, 1.0);
        assert_eq!(order.total, 100.0);
    }

    #[test]
    fn non_positive_weight_defaults_to_one() {
        let order = price_order(
            &[req(1, Some(1), Some(0.0)), req(1, Some(1), Some(-2.0))],
            &catalog(),
        )
        .unwrap();
        assert!(order.lines.iter().all(|l| l.weight == 1.0));
        assert_eq!(order.total, 200.0);
    }

    #[test]
    fn oversized_weight_is_rejected_before_pricing() {
        for weight in [1e25, 1e30, f64::INFINITY, MAX_WEIGHT + 0.001] {
            let err = price_order(&[req(1, Some(MAX_QUANTITY), Some(weight))], &catalog())
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidWeight, "weight = {}", weight);
        }

        let order = price_order(&[req(1, Some(1), Some(MAX_WEIGHT))], &catalog()).unwrap();
        assert_eq!(order.total, 10_000.0);
    }

    #[test]
    fn weight_finer_than_grams_is_rejected() {
        for weight in [0.0004, 1.2345] {
            let err = price_order(&[req(1, None, Some(weight))], &catalog()).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidWeight, "weight = {}", weight);
        }
        assert_eq!(validate_weight(1, Some(0.333)).unwrap(), 0.333);
        assert_eq!(validate_weight(1, Some(1.25)).unwrap(), 1.25);
    }

    #[test]
    fn line_amount_reports_overflow() {
        let err = line_amount(7, 1e20, MAX_QUANTITY, 1e8).unwrap_err();
        assert_eq!(err.code, ErrorCode::LineAmountOutOfRange);

        let err = line_amount(7, 1e30, 1, 1.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::LineAmountOutOfRange);

        assert_eq!(line_amount(7, 100.0, 2, 1.5).unwrap(), Decimal::from(300));
    }

    #[test]
    fn empty_cart_is_rejected() {
        let err = price_order(&[], &catalog()).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
    }

    #[test]
    fn invalid_quantities_are_rejected() {
        for qty in [0, -1, MAX_QUANTITY + 1] {
            let err = price_order(&[req(1, Some(qty), None)], &catalog()).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidQuantity);
        }
    }

    #[test]
    fn unknown_item_is_recorded_at_zero() {
        let order = price_order(&[req(99, Some(2), None), req(1, None, None)], &catalog()).unwrap();
        assert_eq!(order.lines[0].name, UNKNOWN_ITEM_NAME);
        assert_eq!(order.lines[0].unit_price, 0.0);
        assert_eq!(order.lines[0].line_subtotal, 0.0);
        assert_eq!(order.total, 100.0);
    }

    #[test]
    fn float_noise_does_not_leak_into_total() {
        // 0.1 × 3 in f64 is 0.30000000000000004
        let order = price_order(&[req(2, Some(3), None)], &catalog()).unwrap();
        assert_eq!(order.total, 0.3);
    }

    #[test]
    fn line_subtotals_sum_to_total() {
        // three lines of 16.125: exact sum 48.375 rounds once to 48.38
        let items = vec![req(3, None, None), req(3, None, None), req(3, None, None)];
        let order = price_order(&items, &catalog()).unwrap();
        assert_eq!(order.total, 48.38);
        assert_eq!(line_sum(&order), total_of(&order));
        let cents: Vec<f64> = order.lines.iter().map(|l| l.line_subtotal).collect();
        assert_eq!(cents, vec![16.13, 16.13, 16.12]);
    }

    #[test]
    fn line_subtotals_sum_to_total_for_many_shapes() {
        let weights = [None, Some(0.5), Some(1.5), Some(2.0), Some(0.25)];
        for n in 1..12_i64 {
            let items: Vec<_> = (0..n)
                .map(|i| req(1 + (i % 3), Some(1 + i % 4), weights[(i % 5) as usize]))
                .collect();
            let order = price_order(&items, &catalog()).unwrap();
            assert_eq!(line_sum(&order), total_of(&order), "n = {}", n);
        }
    }

    #[test]
    fn menu_slice_lookup() {
        let menu = vec![MenuItem {
            id: 4,
            name: "Veg Puff".into(),
            category: "Puff".into(),
            price: 30.0,
            image: String::new(),
        }];
        let order = price_order(&[req(4, Some(2), None)], &menu).unwrap();
        assert_eq!(order.lines[0].name, "Veg Puff");
        assert_eq!(order.total, 60.0);
    }
}
