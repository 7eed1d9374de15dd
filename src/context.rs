//! Router context integration for GPUI.
//!
//! - [`GlobalRouter`]: the routing object stored as a GPUI `Global`. It owns
//!   the [`RouterState`] history and the [`Blocker`] and runs every navigation
//!   through it.
//! - [`Navigator`]: static helpers (`Navigator::push`, `Navigator::back`, …)
//!   that read/write the `GlobalRouter` through `cx`.
//!
//! # Initialization
//!
//! ```ignore
//! use gpui_cart::init_router;
//!
//! init_router(cx);
//! assert_eq!(Navigator::current_path(cx), "/");
//! ```

use crate::blocker::{Blocker, BlockerState, NavigationAction};
use crate::error::{NavigationError, NavigationResult};
use crate::matching::{Page, Route, RouteMatch};
use crate::state::RouterState;
use crate::{debug_log, info_log, warn_log};
use gpui::{App, BorrowAppContext, Global};

// ============================================================================
// NavigationRequest
// ============================================================================

/// Kind of history operation a navigation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateOp {
    Push,
    Back,
    Forward,
}

/// Request for navigation, as seen by the blocker.
///
/// ```
/// use gpui_cart::{NavigateOp, NavigationRequest};
///
/// let request = NavigationRequest::new("/cart/5".to_string(), NavigateOp::Push);
/// assert_eq!(request.to, "/cart/5");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    /// The path we're navigating from (if any)
    pub from: Option<String>,

    /// The path we're navigating to
    pub to: String,

    /// History operation to perform once allowed
    pub op: NavigateOp,
}

impl NavigationRequest {
    /// Create a new navigation request.
    pub fn new(to: String, op: NavigateOp) -> Self {
        Self { from: None, to, op }
    }

    /// Create a navigation request with a source path.
    pub fn with_from(to: String, from: String, op: NavigateOp) -> Self {
        Self {
            from: Some(from),
            to,
            op,
        }
    }
}

impl std::fmt::Debug for NavigationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationRequest")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("op", &self.op)
            .finish()
    }
}

// ============================================================================
// GlobalRouter
// ============================================================================

/// Routes every cart demo window starts with.
pub fn default_routes() -> Vec<Route> {
    vec![Route::new("/", Page::Cart), Route::new("/cart/:id", Page::Cart)]
}

/// Global router state accessible from any component.
#[derive(Debug, Clone, Default)]
pub struct GlobalRouter {
    state: RouterState,
    blocker: Blocker,
}

impl Global for GlobalRouter {}

impl GlobalRouter {
    /// Create a router at `/` with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a router with [`default_routes`] registered.
    pub fn with_default_routes() -> Self {
        let mut router = Self::new();
        for route in default_routes() {
            router.add_route(route);
        }
        router
    }

    /// Register a route.
    pub fn add_route(&mut self, route: Route) {
        info_log!("Registered route '{}' ({:?})", route.path, route.page);
        self.state.add_route(route);
    }

    // ========================================================================
    // Navigation pipeline
    // ========================================================================

    /// Navigate to a path unless the blocker intercepts it.
    pub fn push(&mut self, path: impl Into<String>) -> NavigationResult {
        self.navigate(path.into(), NavigateOp::Push)
    }

    /// Go back in history. `None` when there is nothing to go back to.
    pub fn back(&mut self) -> Option<NavigationResult> {
        let target = self.state.peek_back_path()?.to_string();
        Some(self.navigate(target, NavigateOp::Back))
    }

    /// Go forward in history. `None` when there is nothing to go forward to.
    pub fn forward(&mut self) -> Option<NavigationResult> {
        let target = self.state.peek_forward_path()?.to_string();
        Some(self.navigate(target, NavigateOp::Forward))
    }

    /// Push `path` without consulting the blocker.
    ///
    /// Used for unrecoverable failures: any parked navigation is dropped and
    /// the blocker disarmed, since the page that armed it is being abandoned.
    pub fn redirect(&mut self, path: impl Into<String>) -> NavigationResult {
        let path = path.into();
        if self.blocker.state() == BlockerState::Blocked {
            debug_log!("Redirect to '{}' discards the pending navigation", path);
        }
        self.blocker.reset();
        self.blocker.arm(false);
        let request = NavigationRequest::with_from(
            path,
            self.current_path().to_string(),
            NavigateOp::Push,
        );
        self.perform(&request)
    }

    /// Carry out the parked navigation.
    pub fn proceed(&mut self) -> NavigationResult {
        match self.blocker.proceed() {
            Some(request) => {
                info_log!("Proceeding with blocked navigation to '{}'", request.to);
                self.perform(&request)
            }
            None => NavigationResult::Error(NavigationError::NothingPending),
        }
    }

    /// Drop the parked navigation and stay where we are.
    pub fn reset_blocked(&mut self) {
        if let Some(pending) = self.blocker.pending() {
            info_log!("Cancelled navigation to '{}'", pending.to);
        }
        self.blocker.reset();
    }

    /// Arm or disarm the blocker.
    pub fn set_blocking(&mut self, blocking: bool) {
        self.blocker.arm(blocking);
    }

    /// Current blocker state.
    pub fn blocker_state(&self) -> BlockerState {
        self.blocker.state()
    }

    /// The blocker, for inspection.
    pub fn blocker(&self) -> &Blocker {
        &self.blocker
    }

    fn navigate(&mut self, path: String, op: NavigateOp) -> NavigationResult {
        let from = self.current_path().to_string();
        let request = NavigationRequest::with_from(path, from, op);

        match self.blocker.intercept(&request) {
            NavigationAction::Continue => self.perform(&request),
            NavigationAction::Deny { reason } => {
                warn_log!("Navigation to '{}' blocked: {}", request.to, reason);
                NavigationResult::Blocked { reason }
            }
        }
    }

    fn perform(&mut self, request: &NavigationRequest) -> NavigationResult {
        info_log!(
            "Navigation {:?}: '{}' → '{}'",
            request.op,
            self.current_path(),
            request.to
        );

        let event = match request.op {
            NavigateOp::Push => Some(self.state.push(request.to.clone())),
            NavigateOp::Back => self.state.back(),
            NavigateOp::Forward => self.state.forward(),
        };

        let Some(event) = event else {
            return NavigationResult::Error(NavigationError::HistoryExhausted);
        };

        if self.state.current_match().page == Page::NotFound {
            NavigationResult::NotFound { path: event.to }
        } else {
            NavigationResult::Success { path: event.to }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get current path
    pub fn current_path(&self) -> &str {
        self.state.current_path()
    }

    /// Resolve the current path
    pub fn current_match(&self) -> RouteMatch {
        self.state.current_match()
    }

    /// Check if can go back
    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    /// Check if can go forward
    pub fn can_go_forward(&self) -> bool {
        self.state.can_go_forward()
    }
}

// ============================================================================
// Initialization and static helpers
// ============================================================================

/// Install a [`GlobalRouter`] with the default routes.
pub fn init_router(cx: &mut App) {
    cx.set_global(GlobalRouter::with_default_routes());
}

/// Static navigation API over the [`GlobalRouter`] global.
pub struct Navigator;

impl Navigator {
    /// Navigate to a new route
    pub fn push(cx: &mut App, path: impl Into<String>) -> NavigationResult {
        let path = path.into();
        Self::update(cx, |router| router.push(path))
    }

    /// Go back in history
    pub fn back(cx: &mut App) -> Option<NavigationResult> {
        Self::update(cx, GlobalRouter::back)
    }

    /// Go forward in history
    pub fn forward(cx: &mut App) -> Option<NavigationResult> {
        Self::update(cx, GlobalRouter::forward)
    }

    /// Navigate without consulting the blocker
    pub fn redirect(cx: &mut App, path: impl Into<String>) -> NavigationResult {
        let path = path.into();
        Self::update(cx, |router| router.redirect(path))
    }

    /// Carry out the parked navigation
    pub fn proceed(cx: &mut App) -> NavigationResult {
        Self::update(cx, GlobalRouter::proceed)
    }

    /// Drop the parked navigation
    pub fn reset_blocked(cx: &mut App) {
        Self::update(cx, GlobalRouter::reset_blocked);
    }

    /// Arm or disarm the blocker
    pub fn set_blocking(cx: &mut App, blocking: bool) {
        cx.update_global::<GlobalRouter, _>(|router, _| router.set_blocking(blocking));
    }

    /// Get current path
    pub fn current_path(cx: &App) -> String {
        cx.global::<GlobalRouter>().current_path().to_string()
    }

    /// Resolve the current path
    pub fn current_match(cx: &App) -> RouteMatch {
        cx.global::<GlobalRouter>().current_match()
    }

    /// Current blocker state
    pub fn blocker_state(cx: &App) -> BlockerState {
        cx.global::<GlobalRouter>().blocker_state()
    }

    fn update<R>(cx: &mut App, f: impl FnOnce(&mut GlobalRouter) -> R) -> R {
        let result = cx.update_global::<GlobalRouter, _>(|router, _| f(router));
        cx.refresh_windows();
        result
    }
}

// ============================================================================
// Tests
// ============================================================================
