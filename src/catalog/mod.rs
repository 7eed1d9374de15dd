//! Catalog service records and the client seam.
//!
//! The cart view talks to the remote catalog only through [`CatalogClient`].
//! [`HttpCatalog`](http::HttpCatalog) is the production implementation; tests
//! plug in their own.

#[cfg(feature = "http")]
pub mod http;

use crate::error::CatalogError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// HTTP status the catalog answers with on success.
pub const STATUS_OK: u16 = 200;

// ============================================================================
// Records
// ============================================================================

/// A product reference inside a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    pub quantity: i64,
}

/// Cart as returned by the catalog service.
///
/// `products` may reference the same product more than once; that is a valid
/// response and is collapsed when the cart is displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRecord {
    pub id: i64,
    pub user_id: i64,
    pub date: String,
    pub products: Vec<CartLine>,
}

/// Product rating summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: i64,
}

/// Catalog entry for a purchasable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub image: String,
    pub rating: Rating,
}

/// The part of a [`ProductRecord`] the cart grid renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub price: f64,
    pub rating: Rating,
}

impl From<&ProductRecord> for DisplayItem {
    fn from(product: &ProductRecord) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            image: product.image.clone(),
            price: product.price,
            rating: product.rating,
        }
    }
}

// ============================================================================
// Client seam
// ============================================================================

/// Status code plus optional payload, mirroring what the catalog sent back.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogResponse<T> {
    pub status: u16,
    pub data: Option<T>,
}

impl<T> CatalogResponse<T> {
    /// A 200 response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            status: STATUS_OK,
            data: Some(data),
        }
    }

    /// A response with the given status and no payload.
    pub fn empty(status: u16) -> Self {
        Self { status, data: None }
    }

    /// `true` for status 200.
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Access to the remote catalog.
///
/// Implementations report transport failures as `Err`; any answer from the
/// service, whatever its status, is `Ok`.
#[async_trait]
pub trait CatalogClient: Send + Sync + 'static {
    /// `GET <carts>/{cart_id}`
    async fn fetch_cart(&self, cart_id: i64) -> Result<CatalogResponse<CartRecord>, CatalogError>;

    /// `GET <products>/{product_id}`
    async fn fetch_product(
        &self,
        product_id: i64,
    ) -> Result<CatalogResponse<ProductRecord>, CatalogError>;
}

/// Decode a response body, treating an empty or `null` body as no payload.
pub fn decode_payload<T>(body: &[u8]) -> Result<Option<T>, CatalogError>
where
    T: serde::de::DeserializeOwned,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(serde_json::from_slice::<Option<T>>(body)?)
}

// ============================================================================
// Tests
// ============================================================================
