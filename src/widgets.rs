//! GPUI view of the cart application.
//!
//! [`CartApp`] is the root entity of the window. It owns a headless
//! [`CartPage`], keeps it in sync with the [`GlobalRouter`](crate::GlobalRouter)
//! and renders it:
//!
//! ```text
//! ┌ nav bar ─────────────────────────┐
//! │ Home  Cart  ‹ Back               │
//! ├──────────────────────────────────┤
//! │ [search box]                     │
//! │ ┌card┐ ┌card┐ ┌card┐            │   or the loading indicator,
//! │ └────┘ └────┘ └────┘            │   or "Page Not Found"
//! └──────────────────────────────────┘
//!          + leave dialog overlay while a navigation is parked
//! ```
//!
//! Cart loads run as GPUI tasks consuming the [`CartAssembler`] stream.
//! Replacing the task drops the previous stream, and the [`LoadTicket`]
//! check in [`CartPage::apply`] drops anything that still slips through.

use crate::cart::{resolve_cart_id, CartAssembler, CartEvent, LoadTicket};
use crate::catalog::{CatalogClient, DisplayItem};
use crate::blocker::BlockerState;
use crate::error::NavigationResult;
use crate::matching::{Page, RouteMatch};
use crate::page::{
    format_price, rating_stars, CartPage, PageEffect, SearchBox, LOADING_TEST_ID, NAV_LINKS,
    NOT_FOUND_TEXT,
};
use crate::prompt::{ConfirmDialog, GuardEffect, UnloadEvent};
use crate::{debug_log, trace_log, Navigator};
use futures::StreamExt;
use gpui::prelude::*;
use gpui::{
    div, px, rgb, rgba, App, Context, FocusHandle, FontWeight, KeyDownEvent, MouseButton,
    SharedString, Task, Window,
};
use std::sync::Arc;

/// Reason given for links followed while a window close awaits an answer.
pub const CLOSE_PENDING_REASON: &str = "Window close pending";

/// How the user answered the leave dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum LeaveOutcome {
    /// The parked navigation was carried out.
    Navigated(NavigationResult),
    /// The window close that was held back may go ahead.
    CloseWindow,
}

/// Root view: navigation bar, cart page and leave dialog.
pub struct CartApp {
    assembler: CartAssembler,
    page: CartPage,
    route: Option<RouteMatch>,
    focus_handle: FocusHandle,
    close_requested: bool,
    load_task: Option<Task<()>>,
}

impl CartApp {
    pub fn new(client: Arc<dyn CatalogClient>, cx: &mut Context<'_, Self>) -> Self {
        let mut app = Self {
            assembler: CartAssembler::new(client),
            page: CartPage::new(),
            route: None,
            focus_handle: cx.focus_handle(),
            close_requested: false,
            load_task: None,
        };
        app.sync_route(cx);
        app
    }

    pub fn page(&self) -> &CartPage {
        &self.page
    }

    /// Route the view last rendered for.
    pub fn route(&self) -> Option<&RouteMatch> {
        self.route.as_ref()
    }

    /// Focus target for keyboard input into the search box.
    pub fn focus_handle(&self) -> FocusHandle {
        self.focus_handle.clone()
    }

    // ------------------------------------------------------------------------
    // Routing
    // ------------------------------------------------------------------------

    /// Bring the page in line with the router's current location.
    ///
    /// Entering the cart route mounts a fresh page. Moving between carts on
    /// the same route only reloads, keeping the search box.
    pub fn sync_route(&mut self, cx: &mut Context<'_, Self>) {
        let matched = Navigator::current_match(cx);
        let previous = self.route.replace(matched.clone());

        if matched.page != Page::Cart {
            if self.load_task.take().is_some() {
                debug_log!("Left the cart page, abandoning load");
            }
            self.remount(cx);
            cx.notify();
            return;
        }

        let cart_id = resolve_cart_id(matched.params.get("id").map(String::as_str));
        let same_mount = previous
            .as_ref()
            .is_some_and(|p| p.page == Page::Cart && p.pattern == matched.pattern);

        if !same_mount {
            self.remount(cx);
        } else if self.page.cart_id() == Some(cart_id) {
            return;
        }

        self.start_load(cart_id, cx);
    }

    /// Fresh page. A close held back by the old page's dialog goes with it.
    fn remount(&mut self, cx: &mut Context<'_, Self>) {
        if std::mem::take(&mut self.close_requested) {
            debug_log!("Page remounted, dropping held window close");
        }
        apply_guard_effect(self.page.remount(), cx);
    }

    fn start_load(&mut self, cart_id: i64, cx: &mut Context<'_, Self>) {
        let ticket = self.page.begin_load(cart_id);
        let mut events = self.assembler.load_id(cart_id);

        self.load_task = Some(cx.spawn(async move |this, cx| {
            while let Some(event) = events.next().await {
                let applied = this.update(cx, |app, cx| app.apply_event(ticket, event, cx));
                if applied.is_err() {
                    break;
                }
            }
        }));
        cx.notify();
    }

    fn apply_event(&mut self, ticket: LoadTicket, event: CartEvent, cx: &mut Context<'_, Self>) {
        if let PageEffect::Redirect(path) = self.page.apply(ticket, event) {
            Navigator::redirect(cx, path);
            self.sync_route(cx);
        }
        cx.notify();
    }

    /// Follow a link. A dirty search box parks the navigation instead.
    ///
    /// While the leave dialog answers a window close, links are refused
    /// without reaching the router.
    pub fn navigate(
        &mut self,
        path: impl Into<String>,
        cx: &mut Context<'_, Self>,
    ) -> NavigationResult {
        if self.close_requested {
            return close_pending();
        }
        let result = Navigator::push(cx, path);
        self.after_navigation(&result, cx);
        result
    }

    pub fn go_back(&mut self, cx: &mut Context<'_, Self>) -> Option<NavigationResult> {
        if self.close_requested {
            return Some(close_pending());
        }
        let result = Navigator::back(cx)?;
        self.after_navigation(&result, cx);
        Some(result)
    }

    pub fn go_forward(&mut self, cx: &mut Context<'_, Self>) -> Option<NavigationResult> {
        if self.close_requested {
            return Some(close_pending());
        }
        let result = Navigator::forward(cx)?;
        self.after_navigation(&result, cx);
        Some(result)
    }

    fn after_navigation(&mut self, result: &NavigationResult, cx: &mut Context<'_, Self>) {
        if result.is_blocked() {
            self.page.prompt_mut().on_navigation_blocked();
        } else {
            self.sync_route(cx);
        }
        cx.notify();
    }

    // ------------------------------------------------------------------------
    // Search box and guard
    // ------------------------------------------------------------------------

    /// Replace the search box contents.
    pub fn set_search_text(&mut self, text: impl Into<String>, cx: &mut Context<'_, Self>) {
        let effect = self.page.on_search_input(text);
        apply_guard_effect(effect, cx);
        cx.notify();
    }

    /// "Ok" in the leave dialog.
    pub fn confirm_leave(&mut self, cx: &mut Context<'_, Self>) -> LeaveOutcome {
        let effect = self.page.prompt_mut().confirm();

        if std::mem::take(&mut self.close_requested) {
            apply_guard_effect(effect, cx);
            cx.notify();
            return LeaveOutcome::CloseWindow;
        }

        let result = Navigator::proceed(cx);
        apply_guard_effect(effect, cx);
        self.sync_route(cx);
        cx.notify();
        LeaveOutcome::Navigated(result)
    }

    /// "Cancel" in the leave dialog.
    pub fn cancel_leave(&mut self, cx: &mut Context<'_, Self>) {
        self.close_requested = false;
        self.page.prompt_mut().cancel();
        Navigator::reset_blocked(cx);
        cx.notify();
    }

    /// Window close handler. Returns whether the window may close now.
    ///
    /// With unsaved input the close is held back and the leave dialog asks
    /// instead. Refused outright while the dialog already answers for a
    /// parked navigation.
    pub fn request_close(&mut self, cx: &mut Context<'_, Self>) -> bool {
        if Navigator::blocker_state(cx) == BlockerState::Blocked {
            debug_log!("Window close refused while a navigation awaits an answer");
            return false;
        }

        let mut event = UnloadEvent::new();
        self.page.prompt().before_unload(&mut event);

        if event.default_prevented() {
            debug_log!("Window close held back by unsaved search input");
            self.close_requested = true;
            self.page.prompt_mut().on_navigation_blocked();
            cx.notify();
            return false;
        }
        self.page.prompt().dialog().is_none()
    }

    fn on_key_down(
        &mut self,
        event: &KeyDownEvent,
        _window: &mut Window,
        cx: &mut Context<'_, Self>,
    ) {
        let keystroke = &event.keystroke;
        let modifiers = &keystroke.modifiers;
        if modifiers.control || modifiers.alt || modifiers.platform {
            return;
        }
        if self.page.search_box().is_none() {
            return;
        }

        let mut text = self.page.search_text().to_string();
        if keystroke.key == "backspace" {
            if text.pop().is_none() {
                return;
            }
        } else if let Some(typed) = &keystroke.key_char {
            text.push_str(typed);
        } else {
            trace_log!("Ignoring key '{}'", keystroke.key);
            return;
        }
        self.set_search_text(text, cx);
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    fn render_nav(&self, cx: &mut Context<'_, Self>) -> impl IntoElement {
        let current_path = Navigator::current_path(cx);

        let links: Vec<_> = NAV_LINKS
            .iter()
            .map(|&(label, path)| {
                let is_active = current_path == path;
                div()
                    .id(SharedString::from(format!("nav-{}", label.to_lowercase())))
                    .px_3()
                    .py_2()
                    .rounded_md()
                    .cursor_pointer()
                    .font_weight(FontWeight::BOLD)
                    .text_color(if is_active { rgb(0x2196f3) } else { rgb(0xffffff) })
                    .hover(|this| this.bg(rgb(0x374151)))
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(move |this, _event, _window, cx| {
                            this.navigate(path, cx);
                        }),
                    )
                    .child(label)
            })
            .collect();

        div()
            .flex()
            .items_center()
            .gap_2()
            .px_6()
            .py_3()
            .bg(rgb(0x1f2937))
            .children(links)
            .child(
                div()
                    .id("nav-back")
                    .ml_auto()
                    .px_3()
                    .py_2()
                    .rounded_md()
                    .cursor_pointer()
                    .text_color(rgb(0xd1d5db))
                    .hover(|this| this.bg(rgb(0x374151)))
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(|this, _event, _window, cx| {
                            this.go_back(cx);
                        }),
                    )
                    .child("‹ Back"),
            )
    }

    fn render_cart(&self, cx: &mut Context<'_, Self>) -> impl IntoElement {
        let content = div()
            .flex()
            .flex_col()
            .flex_1()
            .items_center()
            .gap_8()
            .p_8();

        let Some(search) = self.page.search_box() else {
            return content.child(
                div()
                    .id(LOADING_TEST_ID)
                    .flex()
                    .flex_1()
                    .items_center()
                    .justify_center()
                    .text_xl()
                    .font_weight(FontWeight::MEDIUM)
                    .text_color(rgb(0x6b7280))
                    .child("Loading..."),
            );
        };

        content
            .child(Self::render_search(search, cx))
            .child(
                div()
                    .flex()
                    .flex_wrap()
                    .gap_6()
                    .children(self.page.visible_items().into_iter().map(product_card)),
            )
    }

    fn render_search(search: SearchBox<'_>, cx: &mut Context<'_, Self>) -> impl IntoElement {
        let text = if search.text.is_empty() {
            div().text_color(rgb(0x9ca3af)).child(search.placeholder)
        } else {
            div().child(search.text.to_string())
        };

        div().id(search.role).child(
            div()
                .id(search.test_id)
                .w(px(480.))
                .px_4()
                .py_3()
                .border_2()
                .border_color(rgb(0xd1d5db))
                .rounded_lg()
                .bg(rgb(0xffffff))
                .cursor_text()
                .on_mouse_down(
                    MouseButton::Left,
                    cx.listener(|this, _event, window, _cx| {
                        window.focus(&this.focus_handle);
                    }),
                )
                .child(text),
        )
    }

    fn render_dialog(dialog: ConfirmDialog, cx: &mut Context<'_, Self>) -> impl IntoElement {
        let button = |id: &'static str, label: &'static str, primary: bool| {
            div()
                .id(id)
                .px_4()
                .py_2()
                .rounded_md()
                .cursor_pointer()
                .bg(if primary { rgb(0x2196f3) } else { rgb(0xe5e7eb) })
                .text_color(if primary { rgb(0xffffff) } else { rgb(0x1f2937) })
                .child(label)
        };

        div()
            .absolute()
            .top_0()
            .left_0()
            .size_full()
            .flex()
            .items_center()
            .justify_center()
            .bg(rgba(0x0000_0080))
            .child(
                div()
                    .id(dialog.role)
                    .flex()
                    .flex_col()
                    .items_center()
                    .gap_6()
                    .p_8()
                    .rounded_lg()
                    .shadow_lg()
                    .bg(rgb(0xffffff))
                    .child(
                        div()
                            .text_lg()
                            .font_weight(FontWeight::SEMIBOLD)
                            .child(dialog.message),
                    )
                    .child(
                        div()
                            .flex()
                            .gap_4()
                            .child(
                                button("dialog-confirm", dialog.confirm_label, true).on_mouse_down(
                                    MouseButton::Left,
                                    cx.listener(|this, _event, window, cx| {
                                        if this.confirm_leave(cx) == LeaveOutcome::CloseWindow {
                                            window.remove_window();
                                        }
                                    }),
                                ),
                            )
                            .child(
                                button("dialog-cancel", dialog.cancel_label, false).on_mouse_down(
                                    MouseButton::Left,
                                    cx.listener(|this, _event, _window, cx| this.cancel_leave(cx)),
                                ),
                            ),
                    ),
            )
    }
}

fn close_pending() -> NavigationResult {
    NavigationResult::Blocked {
        reason: CLOSE_PENDING_REASON.to_string(),
    }
}

/// Mirror the prompt's listener onto the router's blocker.
fn apply_guard_effect(effect: GuardEffect, cx: &mut App) {
    match effect {
        GuardEffect::AttachUnloadListener => Navigator::set_blocking(cx, true),
        GuardEffect::DetachUnloadListener => Navigator::set_blocking(cx, false),
        GuardEffect::None => {}
    }
}

fn product_card(item: &DisplayItem) -> impl IntoElement {
    div()
        .flex()
        .flex_col()
        .gap_2()
        .w(px(240.))
        .p_4()
        .rounded_lg()
        .bg(rgb(0xffffff))
        .shadow_md()
        .child(
            div()
                .h(px(120.))
                .text_xs()
                .text_color(rgb(0x9ca3af))
                .child(item.image.clone()),
        )
        .child(
            div()
                .text_sm()
                .font_weight(FontWeight::SEMIBOLD)
                .child(item.title.clone()),
        )
        .child(div().text_lg().child(format_price(item.price)))
        .child(
            div()
                .text_color(rgb(0xf59e0b))
                .child(rating_stars(item.rating.rate)),
        )
}

fn not_found_page() -> impl IntoElement {
    div()
        .flex()
        .flex_1()
        .items_center()
        .justify_center()
        .child(
            div()
                .text_3xl()
                .font_weight(FontWeight::BOLD)
                .child(NOT_FOUND_TEXT),
        )
}

impl Render for CartApp {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<'_, Self>) -> impl IntoElement {
        let page = self.route.as_ref().map_or(Page::NotFound, |route| route.page);

        let content = match page {
            Page::Cart => self.render_cart(cx).into_any_element(),
            Page::NotFound => not_found_page().into_any_element(),
        };
        let dialog = self
            .page
            .prompt()
            .dialog()
            .map(|dialog| Self::render_dialog(dialog, cx));

        div()
            .id("cart-app")
            .track_focus(&self.focus_handle)
            .on_key_down(cx.listener(Self::on_key_down))
            .relative()
            .flex()
            .flex_col()
            .size_full()
            .bg(rgb(0xf3f4f6))
            .text_color(rgb(0x1f2937))
            .child(self.render_nav(cx))
            .child(content)
            .children(dialog)
    }
}
