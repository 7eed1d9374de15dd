//! Headless cart page.
//!
//! [`CartPage`] is everything the cart screen knows, without any GPUI types:
//! the item accumulator, the loading flag and the [`SearchPrompt`]. The GPUI
//! view in [`widgets`](crate::widgets) drives it and renders from it, and the
//! tests poke at it directly.

use crate::cart::{CartAccumulator, CartEvent, LoadTicket};
use crate::catalog::DisplayItem;
use crate::prompt::{GuardEffect, SearchPrompt};
use crate::{info_log, trace_log, warn_log, ERROR_PATH};

/// Placeholder of the search box.
pub const SEARCH_PLACEHOLDER: &str = "Type something here and click on browser back button";
/// Accessibility role of the search box.
pub const SEARCH_ROLE: &str = "textbox";
/// Element id of the search box.
pub const SEARCH_TEST_ID: &str = "initialValueInput";
/// Element id of the loading indicator.
pub const LOADING_TEST_ID: &str = "tail-spin-loading";
/// Heading of the fallback page.
pub const NOT_FOUND_TEXT: &str = "Page Not Found";
/// Navigation bar entries as `(label, path)`.
pub const NAV_LINKS: [(&str, &str); 2] = [("Home", "/"), ("Cart", "/cart/5")];

/// The search box as the view draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBox<'a> {
    pub role: &'static str,
    pub test_id: &'static str,
    pub placeholder: &'static str,
    pub text: &'a str,
}

/// What the owner must do after feeding an event in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEffect {
    None,
    /// Leave the page for this path.
    Redirect(&'static str),
}

/// State behind the cart screen.
#[derive(Debug, Default, Clone)]
pub struct CartPage {
    accumulator: CartAccumulator,
    prompt: SearchPrompt,
    loading: bool,
    ticket: Option<LoadTicket>,
    cart_id: Option<i64>,
}

impl CartPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh mount: forget the search box.
    ///
    /// Returns the effect needed to detach a listener the old prompt had.
    pub fn remount(&mut self) -> GuardEffect {
        let had_listener = self.prompt.unload_listener_attached();
        self.prompt = SearchPrompt::new();
        if had_listener {
            GuardEffect::DetachUnloadListener
        } else {
            GuardEffect::None
        }
    }

    /// Start loading `cart_id`, discarding whatever was shown before.
    pub fn begin_load(&mut self, cart_id: i64) -> LoadTicket {
        let ticket = self.accumulator.begin();
        info_log!("Cart {} load started (generation {})", cart_id, ticket.generation());
        self.loading = true;
        self.ticket = Some(ticket);
        self.cart_id = Some(cart_id);
        ticket
    }

    /// Feed one event from the load identified by `ticket`.
    pub fn apply(&mut self, ticket: LoadTicket, event: CartEvent) -> PageEffect {
        if !self.accumulator.is_current(ticket) {
            trace_log!("Ignoring {:?} from stale load {}", event, ticket.generation());
            return PageEffect::None;
        }

        self.loading = false;
        match event {
            CartEvent::CartLoaded { cart_id, lines } => {
                info_log!("Cart {} has {} lines", cart_id, lines);
                PageEffect::None
            }
            CartEvent::Item(item) => {
                self.accumulator.append(ticket, item);
                PageEffect::None
            }
            CartEvent::Failed(err) => {
                warn_log!("Cart load failed, redirecting to {}: {}", ERROR_PATH, err);
                PageEffect::Redirect(ERROR_PATH)
            }
        }
    }

    /// Forward a search box change to the prompt.
    ///
    /// Ignored while the box is not shown or the leave dialog is open.
    pub fn on_search_input(&mut self, text: impl Into<String>) -> GuardEffect {
        if self.loading || self.prompt.dialog().is_some() {
            return GuardEffect::None;
        }
        self.prompt.on_input(text)
    }

    /// The search box, or `None` while loading: only the loading indicator
    /// is shown then.
    pub fn search_box(&self) -> Option<SearchBox<'_>> {
        if self.loading {
            return None;
        }
        Some(SearchBox {
            role: SEARCH_ROLE,
            test_id: SEARCH_TEST_ID,
            placeholder: SEARCH_PLACEHOLDER,
            text: self.prompt.text(),
        })
    }

    /// Items to render: deduplicated and filtered by the search text.
    pub fn visible_items(&self) -> Vec<&DisplayItem> {
        self.accumulator.visible(self.prompt.text())
    }

    pub fn accumulator(&self) -> &CartAccumulator {
        &self.accumulator
    }

    pub fn prompt(&self) -> &SearchPrompt {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut SearchPrompt {
        &mut self.prompt
    }

    pub fn search_text(&self) -> &str {
        self.prompt.text()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Cart currently loaded or loading.
    pub fn cart_id(&self) -> Option<i64> {
        self.cart_id
    }

    /// Ticket of the current load.
    pub fn ticket(&self) -> Option<LoadTicket> {
        self.ticket
    }
}

/// Price as the grid shows it: `$55`, `$109.95`.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("${:.0}", price)
    } else {
        format!("${}", price)
    }
}

/// Five-star rendering of a rating, rounded to the nearest whole star.
pub fn rating_stars(rate: f64) -> String {
    let filled = rate.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Rating;
    use crate::error::CatalogError;
    use crate::prompt::GuardState;

    fn item(id: i64, title: &str) -> DisplayItem {
        DisplayItem {
            id,
            title: title.to_string(),
            image: String::new(),
            price: 1.0,
            rating: Rating {
                rate: 3.0,
                count: 2,
            },
        }
    }

    #[test]
    fn test_loading_until_first_event() {
        let mut page = CartPage::new();
        let ticket = page.begin_load(2);
        assert!(page.is_loading());
        assert_eq!(page.cart_id(), Some(2));

        page.apply(
            ticket,
            CartEvent::CartLoaded {
                cart_id: 2,
                lines: 1,
            },
        );
        assert!(!page.is_loading());
    }

    #[test]
    fn test_failure_redirects_to_error() {
        let mut page = CartPage::new();
        let ticket = page.begin_load(2);
        let effect = page.apply(
            ticket,
            CartEvent::Failed(CatalogError::CartStatus {
                cart_id: 2,
                status: 404,
            }),
        );
        assert_eq!(effect, PageEffect::Redirect("/error"));
        assert!(page.visible_items().is_empty());
    }

    #[test]
    fn test_partial_items_survive_failure() {
        let mut page = CartPage::new();
        let ticket = page.begin_load(2);
        page.apply(ticket, CartEvent::Item(item(1, "Backpack")));
        let effect = page.apply(
            ticket,
            CartEvent::Failed(CatalogError::EmptyPayload { product_id: 5 }),
        );

        assert_eq!(effect, PageEffect::Redirect(ERROR_PATH));
        assert_eq!(page.visible_items().len(), 1);
    }

    #[test]
    fn test_stale_events_ignored() {
        let mut page = CartPage::new();
        let old = page.begin_load(2);
        let new = page.begin_load(5);

        let effect = page.apply(
            old,
            CartEvent::Failed(CatalogError::Transport("late".into())),
        );
        assert_eq!(effect, PageEffect::None);
        page.apply(old, CartEvent::Item(item(1, "late")));

        assert!(page.is_loading());
        assert!(page.visible_items().is_empty());
        assert_eq!(page.ticket(), Some(new));
    }

    #[test]
    fn test_search_box_hidden_while_loading() {
        let mut page = CartPage::new();
        let ticket = page.begin_load(2);
        assert!(page.search_box().is_none());
        assert_eq!(page.on_search_input("test"), GuardEffect::None);
        assert_eq!(page.search_text(), "");
        assert_eq!(page.prompt().state(), GuardState::Clean);

        page.apply(ticket, CartEvent::Item(item(1, "Backpack")));
        assert_eq!(
            page.on_search_input("test"),
            GuardEffect::AttachUnloadListener
        );
        assert_eq!(
            page.search_box(),
            Some(SearchBox {
                role: "textbox",
                test_id: "initialValueInput",
                placeholder: SEARCH_PLACEHOLDER,
                text: "test",
            })
        );
    }

    #[test]
    fn test_search_filters_visible_items() {
        let mut page = CartPage::new();
        let ticket = page.begin_load(2);
        page.apply(ticket, CartEvent::Item(item(1, "Fjallraven Backpack")));
        page.apply(ticket, CartEvent::Item(item(2, "Slim Fit T-Shirt")));
        page.apply(ticket, CartEvent::Item(item(1, "Fjallraven Backpack")));

        assert_eq!(page.visible_items().len(), 2);
        page.on_search_input("FJALL");
        let visible = page.visible_items();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn test_input_ignored_while_dialog_open() {
        let mut page = CartPage::new();
        page.on_search_input("test");
        page.prompt_mut().on_navigation_blocked();

        assert_eq!(page.on_search_input("other"), GuardEffect::None);
        assert_eq!(page.search_text(), "test");
    }

    #[test]
    fn test_remount_resets_prompt() {
        let mut page = CartPage::new();
        assert_eq!(
            page.on_search_input("test"),
            GuardEffect::AttachUnloadListener
        );
        assert_eq!(page.remount(), GuardEffect::DetachUnloadListener);
        assert_eq!(page.prompt().state(), GuardState::Clean);
        assert_eq!(page.search_text(), "");
        assert_eq!(page.remount(), GuardEffect::None);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(109.95), "$109.95");
        assert_eq!(format_price(55.0), "$55");
    }

    #[test]
    fn test_rating_stars() {
        assert_eq!(rating_stars(3.9), "★★★★☆");
        assert_eq!(rating_stars(0.0), "☆☆☆☆☆");
        assert_eq!(rating_stars(7.0), "★★★★★");
    }
}
