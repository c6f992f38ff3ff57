//! Checkout against a stub order API

use std::sync::Mutex;

use async_trait::async_trait;
use bakery_client::{
    AppError, CartController, CartStore, CheckoutApi, ClientError, ClientResult,
    CreateOrderResponse, ErrorCode,
};
use shared::models::CreateOrderRequest;
use tempfile::TempDir;

/// Records submitted requests and answers with a fixed result
struct StubApi {
    fail_with: Option<ErrorCode>,
    submitted: Mutex<Vec<CreateOrderRequest>>,
}

impl StubApi {
    fn ok() -> Self {
        Self {
            fail_with: None,
            submitted: Mutex::new(Vec::new()),
        }
    }

    fn failing(code: ErrorCode) -> Self {
        Self {
            fail_with: Some(code),
            submitted: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

#[async_trait]
impl CheckoutApi for StubApi {
    async fn submit_order(&self, request: &CreateOrderRequest) -> ClientResult<CreateOrderResponse> {
        self.submitted.lock().unwrap().push(request.clone());
        match self.fail_with {
            Some(code) => Err(AppError::new(code).into()),
            None => Ok(CreateOrderResponse {
                order_id: 7,
                total: 300.0,
                items: vec![],
            }),
        }
    }
}

#[tokio::test]
async fn successful_checkout_clears_cart() {
    let dir = TempDir::new().unwrap();
    let store = CartStore::new(dir.path());
    let mut cart = CartController::open(store.clone());
    cart.add(2, Some(1.5)).unwrap();
    cart.add(2, Some(1.5)).unwrap();

    let api = StubApi::ok();
    let response = cart.checkout(&api).await.unwrap();

    assert_eq!(response.order_id, 7);
    assert_eq!(cart.last_order_id(), Some(7));
    assert!(cart.is_empty());
    assert!(store.load().is_empty());

    let submitted = api.submitted.lock().unwrap();
    assert_eq!(submitted[0].items[0].qty, Some(2));
}

#[tokio::test]
async fn failed_checkout_keeps_cart() {
    let dir = TempDir::new().unwrap();
    let store = CartStore::new(dir.path());
    let mut cart = CartController::open(store.clone());
    cart.add(1, None).unwrap();

    let api = StubApi::failing(ErrorCode::DatabaseError);
    let err = cart.checkout(&api).await.unwrap_err();

    assert_eq!(err.code(), Some(ErrorCode::DatabaseError));
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.last_order_id(), None);
    assert_eq!(store.load().len(), 1);
}

#[tokio::test]
async fn empty_cart_is_not_submitted() {
    let dir = TempDir::new().unwrap();
    let mut cart = CartController::open(CartStore::new(dir.path()));

    let api = StubApi::ok();
    let err = cart.checkout(&api).await.unwrap_err();

    assert!(matches!(err, ClientError::Api(ref e) if e.code == ErrorCode::EmptyCart));
    assert_eq!(api.calls(), 0);
}
