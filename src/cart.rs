//! Cart assembly.
//!
//! Turning a cart id into a list of displayed products happens in three
//! steps:
//!
//! 1. [`CartAssembler::load`] fetches the cart, then fetches every referenced
//!    product concurrently. Results come out as a stream of [`CartEvent`]s in
//!    completion order; nothing waits for the whole set.
//! 2. The owning view appends each item to a [`CartAccumulator`] under the
//!    [`LoadTicket`] it got when the load began. Appends carrying an older
//!    ticket are dropped, so a slow response for a previous cart never shows
//!    up in the current one.
//! 3. At render time [`CartAccumulator::visible`] removes duplicate ids (first
//!    occurrence wins) and applies the search filter. The accumulator itself
//!    is never deduplicated.
//!
//! Any failure (transport, non-200 status, empty product payload) ends the
//! stream with a single [`CartEvent::Failed`]. Items that arrived before it
//! stay appended; the view is expected to redirect away anyway.

use crate::catalog::{
    CartLine, CartRecord, CatalogClient, CatalogResponse, DisplayItem, ProductRecord,
};
use crate::error::CatalogError;
use crate::{debug_log, info_log, trace_log, warn_log};
use futures::future;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;

/// Cart loaded when the route carries no usable id.
pub const DEFAULT_CART_ID: i64 = 2;

/// Parse the `id` route parameter.
///
/// Missing, non-numeric and zero ids all fall back to [`DEFAULT_CART_ID`].
///
/// ```
/// use gpui_cart::cart::{resolve_cart_id, DEFAULT_CART_ID};
///
/// assert_eq!(resolve_cart_id(Some("5")), 5);
/// assert_eq!(resolve_cart_id(Some("0")), DEFAULT_CART_ID);
/// assert_eq!(resolve_cart_id(None), DEFAULT_CART_ID);
/// ```
pub fn resolve_cart_id(param: Option<&str>) -> i64 {
    param
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|id| *id != 0)
        .unwrap_or(DEFAULT_CART_ID)
}

// ============================================================================
// Events
// ============================================================================

/// Progress of a single cart load.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// The cart answered; product fetches are now in flight.
    CartLoaded { cart_id: i64, lines: usize },
    /// One product arrived.
    Item(DisplayItem),
    /// The load failed. Always the last event.
    Failed(CatalogError),
}

impl CartEvent {
    /// `true` for [`CartEvent::Failed`].
    pub fn is_failure(&self) -> bool {
        matches!(self, CartEvent::Failed(_))
    }
}

// ============================================================================
// CartAssembler
// ============================================================================

/// Fetches carts and their products from a [`CatalogClient`].
#[derive(Clone)]
pub struct CartAssembler {
    client: Arc<dyn CatalogClient>,
}

impl CartAssembler {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self { client }
    }

    /// Load the cart named by a raw route parameter.
    pub fn load(&self, cart_id: Option<&str>) -> BoxStream<'static, CartEvent> {
        self.load_id(resolve_cart_id(cart_id))
    }

    /// Load a cart by id.
    ///
    /// The stream is lazy: nothing is requested until it is polled.
    pub fn load_id(&self, cart_id: i64) -> BoxStream<'static, CartEvent> {
        let client = Arc::clone(&self.client);

        stream::once(async move {
            info_log!("Fetching cart {}", cart_id);
            let response = client.fetch_cart(cart_id).await;
            (client, check_cart(cart_id, response))
        })
        .flat_map(move |(client, cart)| match cart {
            Ok(cart) => {
                let loaded = CartEvent::CartLoaded {
                    cart_id,
                    lines: cart.products.len(),
                };
                stream::once(future::ready(loaded))
                    .chain(fetch_products(client, &cart.products))
                    .boxed()
            }
            Err(err) => stream::once(future::ready(CartEvent::Failed(err))).boxed(),
        })
        .scan(false, |failed, event| {
            if *failed {
                return future::ready(None);
            }
            *failed = event.is_failure();
            future::ready(Some(event))
        })
        .boxed()
    }
}

fn fetch_products(
    client: Arc<dyn CatalogClient>,
    lines: &[CartLine],
) -> impl Stream<Item = CartEvent> + Send + 'static {
    debug_log!("Fetching {} cart lines", lines.len());
    let product_ids: Vec<i64> = lines.iter().map(|line| line.product_id).collect();
    // Every line in flight at once; results come out in completion order.
    let in_flight = product_ids.len().max(1);
    stream::iter(product_ids)
        .map(move |product_id| {
            let client = Arc::clone(&client);
            async move { check_product(product_id, client.fetch_product(product_id).await) }
        })
        .buffer_unordered(in_flight)
}

fn check_cart(
    cart_id: i64,
    response: Result<CatalogResponse<CartRecord>, CatalogError>,
) -> Result<CartRecord, CatalogError> {
    let response = response.inspect_err(|err| {
        warn_log!("Cart {} fetch failed: {}", cart_id, err);
    })?;

    if !response.is_ok() {
        warn_log!("Cart {} answered {}", cart_id, response.status);
        return Err(CatalogError::CartStatus {
            cart_id,
            status: response.status,
        });
    }

    response.data.ok_or_else(|| {
        warn_log!("Cart {} answered without a payload", cart_id);
        CatalogError::EmptyCart { cart_id }
    })
}

fn check_product(
    product_id: i64,
    response: Result<CatalogResponse<ProductRecord>, CatalogError>,
) -> CartEvent {
    let failure = match response {
        Ok(CatalogResponse {
            status,
            data: Some(product),
        }) if status == crate::catalog::STATUS_OK => {
            trace_log!("Product {} arrived", product_id);
            return CartEvent::Item(DisplayItem::from(&product));
        }
        Ok(response) if !response.is_ok() => CatalogError::ProductStatus {
            product_id,
            status: response.status,
        },
        Ok(_) => CatalogError::EmptyPayload { product_id },
        Err(err) => err,
    };

    warn_log!("Product {} failed: {}", product_id, failure);
    CartEvent::Failed(failure)
}

// ============================================================================
// CartAccumulator
// ============================================================================

/// Identifies the load an append belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Append-only item list for the current cart.
///
/// May physically hold duplicates; [`visible`](Self::visible) is the only
/// deduplicated view.
#[derive(Debug, Default, Clone)]
pub struct CartAccumulator {
    generation: u64,
    items: Vec<DisplayItem>,
}

impl CartAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current items and start a new generation.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.items.clear();
        LoadTicket(self.generation)
    }

    /// Whether `ticket` belongs to the latest [`begin`](Self::begin).
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Append an item if `ticket` is still current. Returns whether it was kept.
    pub fn append(&mut self, ticket: LoadTicket, item: DisplayItem) -> bool {
        if !self.is_current(ticket) {
            debug_log!(
                "Dropping product {} from stale load {} (current {})",
                item.id,
                ticket.0,
                self.generation
            );
            return false;
        }
        self.items.push(item);
        true
    }

    /// Everything appended so far, in arrival order.
    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Deduplicated items whose title contains `search`, ignoring case.
    pub fn visible(&self, search: &str) -> Vec<&DisplayItem> {
        visible_items(&self.items, search)
    }
}

/// First occurrence of each id, in order.
pub fn dedup_first(items: &[DisplayItem]) -> Vec<&DisplayItem> {
    let mut seen = HashSet::new();
    items.iter().filter(|item| seen.insert(item.id)).collect()
}

/// Case-insensitive substring match on the title. An empty search matches everything.
pub fn matches_search(item: &DisplayItem, search: &str) -> bool {
    item.title.to_lowercase().contains(&search.to_lowercase())
}

/// Dedup, then filter.
pub fn visible_items<'a>(items: &'a [DisplayItem], search: &str) -> Vec<&'a DisplayItem> {
    dedup_first(items)
        .into_iter()
        .filter(|item| matches_search(item, search))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
