//! Test utilities for cart loading tests
//!
//! Provides an in-memory [`MockCatalog`] with scripted answers, call
//! recording and gates that hold a product response back until released.

#![allow(dead_code)]

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::future;
use gpui_cart::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Route crate logs to the test output once per process.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// What the mock answers for one id.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Respond(CatalogResponse<T>),
    Fail(CatalogError),
    /// Never answers.
    Hang,
}

/// Scripted catalog client.
#[derive(Default)]
pub struct MockCatalog {
    carts: Mutex<HashMap<i64, Reply<CartRecord>>>,
    products: Mutex<HashMap<i64, Reply<ProductRecord>>>,
    gates: Mutex<HashMap<i64, oneshot::Receiver<()>>>,
    cart_calls: Mutex<Vec<i64>>,
    product_calls: Mutex<Vec<i64>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cart 2 with products 1, 2, 3 and cart 5 with product 4, all answering.
    pub fn standard() -> Arc<Self> {
        let catalog = Self::new();
        catalog.set_cart(2, cart(2, &[1, 2, 3]));
        catalog.set_cart(5, cart(5, &[4]));
        for (id, title) in [
            (1, "Fjallraven Backpack"),
            (2, "Mens Casual T-Shirt"),
            (3, "Mens Cotton Jacket"),
            (4, "Slim Fit Shirt"),
        ] {
            catalog.set_product(id, product(id, title));
        }
        Arc::new(catalog)
    }

    pub fn set_cart(&self, id: i64, record: CartRecord) {
        self.set_cart_reply(id, Reply::Respond(CatalogResponse::ok(record)));
    }

    pub fn set_cart_reply(&self, id: i64, reply: Reply<CartRecord>) {
        self.carts.lock().unwrap().insert(id, reply);
    }

    pub fn set_product(&self, id: i64, record: ProductRecord) {
        self.set_product_reply(id, Reply::Respond(CatalogResponse::ok(record)));
    }

    pub fn set_product_reply(&self, id: i64, reply: Reply<ProductRecord>) {
        self.products.lock().unwrap().insert(id, reply);
    }

    /// Hold the next answer for `product_id` until the sender fires.
    pub fn gate_product(&self, product_id: i64) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(product_id, rx);
        tx
    }

    pub fn cart_calls(&self) -> Vec<i64> {
        self.cart_calls.lock().unwrap().clone()
    }

    pub fn product_calls(&self) -> Vec<i64> {
        self.product_calls.lock().unwrap().clone()
    }
}

async fn answer<T>(reply: Option<Reply<T>>) -> Result<CatalogResponse<T>, CatalogError> {
    match reply {
        Some(Reply::Respond(response)) => Ok(response),
        Some(Reply::Fail(err)) => Err(err),
        Some(Reply::Hang) => future::pending().await,
        None => Ok(CatalogResponse::empty(404)),
    }
}

#[async_trait]
impl CatalogClient for MockCatalog {
    async fn fetch_cart(&self, cart_id: i64) -> Result<CatalogResponse<CartRecord>, CatalogError> {
        self.cart_calls.lock().unwrap().push(cart_id);
        let reply = self.carts.lock().unwrap().get(&cart_id).cloned();
        answer(reply).await
    }

    async fn fetch_product(
        &self,
        product_id: i64,
    ) -> Result<CatalogResponse<ProductRecord>, CatalogError> {
        self.product_calls.lock().unwrap().push(product_id);
        let gate = self.gates.lock().unwrap().remove(&product_id);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let reply = self.products.lock().unwrap().get(&product_id).cloned();
        answer(reply).await
    }
}

/// A cart referencing `product_ids`, one line each.
pub fn cart(id: i64, product_ids: &[i64]) -> CartRecord {
    CartRecord {
        id,
        user_id: 1,
        date: "2020-03-02T00:00:00.000Z".to_string(),
        products: product_ids
            .iter()
            .map(|&product_id| CartLine {
                product_id,
                quantity: 1,
            })
            .collect(),
    }
}

/// A product with fixed price and rating.
pub fn product(id: i64, title: &str) -> ProductRecord {
    ProductRecord {
        id,
        title: title.to_string(),
        price: 10.5,
        description: String::new(),
        category: "clothing".to_string(),
        image: format!("https://example.test/{}.jpg", id),
        rating: Rating {
            rate: 3.9,
            count: 120,
        },
    }
}

/// Ids of items in display order.
pub fn ids(items: &[&DisplayItem]) -> Vec<i64> {
    items.iter().map(|item| item.id).collect()
}
