//! Error and outcome types.
//!
//! - [`NavigationResult`]: the outcome of a navigation attempt through the
//!   router (`Success`, `NotFound`, `Blocked`, `Error`).
//! - [`NavigationError`]: a detailed router error.
//! - [`CatalogError`]: everything that can go wrong while assembling a cart.
//!   All variants lead to the same redirect to [`ERROR_PATH`](crate::ERROR_PATH).
//! - [`ConfigError`]: malformed configuration values.
//!
//! # Examples
//!
//! ```
//! use gpui_cart::error::NavigationResult;
//!
//! let result = NavigationResult::Success { path: "/cart/5".into() };
//! assert!(result.is_success());
//!
//! let blocked = NavigationResult::Blocked {
//!     reason: "Unsaved search input".into(),
//! };
//! assert!(blocked.is_blocked());
//! ```

use thiserror::Error;

// ============================================================================
// Navigation Result Types
// ============================================================================

/// Outcome of a navigation attempt.
///
/// Every call to [`GlobalRouter::push`](crate::context::GlobalRouter::push)
/// (and friends) returns this enum.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationResult {
    /// Navigation succeeded
    Success { path: String },
    /// No route matched; the fallback page is shown
    NotFound { path: String },
    /// Navigation intercepted by the blocker
    Blocked { reason: String },
    /// Navigation error
    Error(NavigationError),
}

/// Detailed router error variants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
    /// Nothing to go back or forward to
    #[error("No history entry to navigate to")]
    HistoryExhausted,

    /// Proceed was requested while nothing was pending
    #[error("No pending navigation to proceed with")]
    NothingPending,
}

impl NavigationResult {
    /// Check if navigation was successful
    pub fn is_success(&self) -> bool {
        matches!(self, NavigationResult::Success { .. })
    }

    /// Check if route was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, NavigationResult::NotFound { .. })
    }

    /// Check if navigation was blocked
    pub fn is_blocked(&self) -> bool {
        matches!(self, NavigationResult::Blocked { .. })
    }

    /// Check if there was an error
    pub fn is_error(&self) -> bool {
        matches!(self, NavigationResult::Error(_))
    }

    /// The path the router ended up on, if navigation happened at all.
    ///
    /// Unmatched paths still change the current location (they render the
    /// not-found page), so `NotFound` reports its path too.
    pub fn path(&self) -> Option<&str> {
        match self {
            NavigationResult::Success { path } | NavigationResult::NotFound { path } => Some(path),
            _ => None,
        }
    }
}

// ============================================================================
// Catalog errors
// ============================================================================

/// Failures while fetching a cart and its products.
///
/// There is no retry and no per-variant handling in the view: each of these
/// abandons the cart page in favour of the error route.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// The request never produced a response
    #[error("Catalog request failed: {0}")]
    Transport(String),

    /// The cart endpoint answered with something other than 200
    #[error("Cart {cart_id} request returned status {status}")]
    CartStatus { cart_id: i64, status: u16 },

    /// The cart endpoint answered 200 without a body
    #[error("Cart {cart_id} response had no payload")]
    EmptyCart { cart_id: i64 },

    /// A product endpoint answered with something other than 200
    #[error("Product {product_id} request returned status {status}")]
    ProductStatus { product_id: i64, status: u16 },

    /// A product endpoint answered 200 without a body
    #[error("Product {product_id} response had no payload")]
    EmptyPayload { product_id: i64 },

    /// The body was not the JSON we expected
    #[error("Could not decode catalog response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Transport(err.to_string())
    }
}

// ============================================================================
// Configuration errors
// ============================================================================

/// Malformed configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

// ============================================================================
// Tests
// ============================================================================
