//! Cart controller and file persistence

use bakery_client::{CartController, CartKey, CartStore, ErrorCode, MenuItem};
use tempfile::TempDir;

fn menu() -> Vec<MenuItem> {
    vec![
        MenuItem {
            id: 1,
            name: "Veg Puff".into(),
            category: "Puff".into(),
            price: 15.0,
            image: String::new(),
        },
        MenuItem {
            id: 2,
            name: "Black Forest".into(),
            category: "Cake".into(),
            price: 100.0,
            image: String::new(),
        },
    ]
}

fn open(dir: &TempDir) -> CartController {
    CartController::open(CartStore::new(dir.path()))
}

#[test]
fn missing_file_is_an_empty_cart() {
    let dir = TempDir::new().unwrap();
    let cart = open(&dir);
    assert!(cart.is_empty());
}

#[test]
fn corrupt_file_is_an_empty_cart() {
    let dir = TempDir::new().unwrap();
    let store = CartStore::new(dir.path());
    std::fs::write(store.path(), "{not json").unwrap();

    let cart = CartController::open(store);
    assert!(cart.is_empty());
}

#[test]
fn same_item_and_weight_merges_into_one_line() {
    let dir = TempDir::new().unwrap();
    let mut cart = open(&dir);

    cart.add(1, None).unwrap();
    cart.add(1, Some(1.0)).unwrap();

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
}

#[test]
fn different_weights_are_separate_lines() {
    let dir = TempDir::new().unwrap();
    let mut cart = open(&dir);

    let half = cart.add(2, Some(0.5)).unwrap();
    let whole = cart.add(2, Some(1.0)).unwrap();

    assert_eq!(cart.lines().len(), 2);
    assert_ne!(half, whole);
    assert_eq!(cart.line(&half).unwrap().quantity, 1);
}

#[test]
fn change_quantity_uses_full_key() {
    let dir = TempDir::new().unwrap();
    let mut cart = open(&dir);
    let half = cart.add(2, Some(0.5)).unwrap();
    let whole = cart.add(2, None).unwrap();

    cart.change_quantity(&half, 3).unwrap();

    assert_eq!(cart.line(&half).unwrap().quantity, 4);
    assert_eq!(cart.line(&whole).unwrap().quantity, 1);
}

#[test]
fn quantity_reaching_zero_removes_line() {
    let dir = TempDir::new().unwrap();
    let mut cart = open(&dir);
    let key = cart.add(1, None).unwrap();
    cart.add(1, None).unwrap();

    cart.change_quantity(&key, -1).unwrap();
    assert_eq!(cart.line(&key).unwrap().quantity, 1);

    cart.change_quantity(&key, -5).unwrap();
    assert!(cart.line(&key).is_none());
    assert!(cart.lines().iter().all(|l| l.quantity > 0));
}

#[test]
fn unknown_key_is_ignored() {
    let dir = TempDir::new().unwrap();
    let mut cart = open(&dir);
    cart.add(1, None).unwrap();

    cart.change_quantity(&CartKey::new(99, None), 1).unwrap();
    assert_eq!(cart.lines().len(), 1);
}

#[test]
fn remove_and_clear() {
    let dir = TempDir::new().unwrap();
    let mut cart = open(&dir);
    let puff = cart.add(1, None).unwrap();
    cart.add(2, Some(1.5)).unwrap();

    cart.remove(&puff).unwrap();
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].item_id, 2);

    cart.clear().unwrap();
    assert!(cart.is_empty());
}

#[test]
fn every_mutation_is_persisted() {
    let dir = TempDir::new().unwrap();
    {
        let mut cart = open(&dir);
        cart.add(1, None).unwrap();
        cart.add(1, None).unwrap();
        cart.add(2, Some(1.5)).unwrap();
    }

    let reopened = open(&dir);
    assert_eq!(reopened.lines().len(), 2);
    assert_eq!(reopened.line(&CartKey::new(1, None)).unwrap().quantity, 2);
    assert_eq!(reopened.line(&CartKey::new(2, Some(1.5))).unwrap().quantity, 1);
    assert_eq!(reopened.item_count(), 3);
}

#[test]
fn display_prices_from_menu() {
    let dir = TempDir::new().unwrap();
    let mut cart = open(&dir);
    let cake = cart.add(2, Some(1.5)).unwrap();
    cart.change_quantity(&cake, 1).unwrap();
    cart.add(1, None).unwrap();
    cart.add(42, None).unwrap();

    let lines = cart.display_lines(&menu()).unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].name, "Black Forest");
    assert_eq!(lines[0].subtotal, 300.0);
    assert_eq!(lines[1].subtotal, 15.0);
    assert_eq!(lines[2].name, "Unknown");
    assert_eq!(lines[2].unit_price, 0.0);

    assert_eq!(cart.display_total(&menu()).unwrap(), 315.0);
}

#[test]
fn invalid_weight_is_refused_and_cart_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut cart = open(&dir);

    for weight in [1e25, 1e30, 100.5, 1.2345, 0.0004] {
        let err = cart.add(2, Some(weight)).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::InvalidWeight), "weight {}", weight);
    }
    assert!(cart.is_empty());
    assert!(!CartStore::new(dir.path()).exists());

    let key = cart.add(2, Some(0.25)).unwrap();
    assert_eq!(key, CartKey::new(2, Some(0.25)));
    assert_eq!(cart.display_total(&menu()).unwrap(), 25.0);
}

#[test]
fn saved_lines_with_invalid_weight_are_dropped_on_load() {
    let dir = TempDir::new().unwrap();
    let store = CartStore::new(dir.path());
    std::fs::write(
        store.path(),
        r#"[
            {"item_id": 1, "quantity": 2, "weight": 1.0},
            {"item_id": 2, "quantity": 9999, "weight": 1e25},
            {"item_id": 2, "quantity": 1, "weight": 1.2345}
        ]"#,
    )
    .unwrap();

    let cart = CartController::open(store);
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.display_total(&menu()).unwrap(), 30.0);
}

#[test]
fn order_request_carries_item_references_only() {
    let dir = TempDir::new().unwrap();
    let mut cart = open(&dir);
    cart.add(2, Some(1.5)).unwrap();
    cart.add(2, Some(1.5)).unwrap();

    let request = cart.order_request();
    assert_eq!(request.items.len(), 1);
    assert_eq!(request.items[0].id, 2);
    assert_eq!(request.items[0].qty, Some(2));
    assert_eq!(request.items[0].weight, Some(1.5));
}
