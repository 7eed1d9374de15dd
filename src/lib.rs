//! Shopping-cart screen for GPUI.
//!
//! The crate loads a cart and its products from a catalog service, renders
//! them as a searchable grid and guards the search box against accidental
//! navigation:
//!
//! - [`cart`]: the concurrent cart assembly stream and the item accumulator.
//! - [`prompt`]: the unsaved-input guard state machine.
//! - [`context`] / [`blocker`]: the router global and its navigation blocker.
//! - [`catalog`]: catalog records and the [`CatalogClient`] seam, with an
//!   HTTP implementation behind the `http` feature.
//! - [`page`] / [`widgets`]: the headless page model and its GPUI view.
//!
//! # Example
//!
//! ```ignore
//! use gpui_cart::{init_router, CartApp, CatalogConfig, HttpCatalog};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(HttpCatalog::new(CatalogConfig::from_env()?)?);
//! Application::new().run(move |cx| {
//!     init_router(cx);
//!     cx.open_window(WindowOptions::default(), |_, cx| {
//!         cx.new(|cx| CartApp::new(catalog, cx))
//!     });
//! });
//! ```
//!
//! # Feature flags
//!
//! - `log` (default): log through the `log` crate.
//! - `tracing`: log through `tracing` instead.
//! - `http` (default): the `reqwest` catalog client and the binary.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod logging;

pub mod blocker;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod matching;
pub mod page;
pub mod params;
pub mod prompt;
pub mod state;
pub mod widgets;

/// Where a failed cart load sends the user.
pub const ERROR_PATH: &str = "/error";

pub use blocker::{Blocker, BlockerState, NavigationAction};
pub use cart::{resolve_cart_id, CartAccumulator, CartAssembler, CartEvent, LoadTicket};
#[cfg(feature = "http")]
pub use catalog::http::HttpCatalog;
pub use catalog::{
    CartLine, CartRecord, CatalogClient, CatalogResponse, DisplayItem, ProductRecord, Rating,
};
pub use config::CatalogConfig;
pub use context::{init_router, GlobalRouter, NavigateOp, NavigationRequest, Navigator};
pub use error::{CatalogError, ConfigError, NavigationError, NavigationResult};
pub use matching::{Page, Route, RouteMatch};
pub use page::{CartPage, PageEffect, SearchBox};
pub use params::RouteParams;
pub use prompt::{GuardEffect, GuardState, SearchPrompt, UnloadEvent};
pub use state::{NavigationDirection, RouteChangeEvent, RouterState};
pub use widgets::{CartApp, LeaveOutcome, CLOSE_PENDING_REASON};
