//! Navigation blocker.
//!
//! The blocker is the router-side half of the unsaved-input guard. While it is
//! **armed** every in-app navigation is intercepted and parked as a single
//! pending request. The view then asks the user and either
//! [`proceed`](Blocker::proceed)s with the parked request or
//! [`reset`](Blocker::reset)s it.
//!
//! ```text
//!             arm(true)               push/back/forward
//!  Unblocked ───────────► Unblocked* ──────────────────► Blocked
//!      ▲                  (armed)  ◄──────── reset() ───────┘
//!      └──────────────────── proceed() ─────────────────────┘
//! ```
//!
//! A second attempt while something is already pending is denied without
//! replacing the parked request.

use crate::context::NavigationRequest;
use crate::{debug_log, trace_log};

// ============================================================================
// NavigationAction
// ============================================================================

/// What the router should do with a navigation request.
///
/// # Example
///
/// ```
/// use gpui_cart::NavigationAction;
///
/// let action = NavigationAction::deny("Unsaved search input");
/// assert!(action.is_deny());
/// assert!(NavigationAction::Continue.is_continue());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationAction {
    /// Allow navigation to proceed.
    Continue,

    /// Deny navigation with a reason.
    Deny {
        /// Human-readable reason for denying navigation.
        reason: String,
    },
}

impl NavigationAction {
    /// Create a result that blocks navigation with a human-readable reason.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::Deny {
            reason: reason.into(),
        }
    }

    /// Check if this action allows navigation to continue.
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    /// Check if this action denies navigation.
    pub fn is_deny(&self) -> bool {
        matches!(self, Self::Deny { .. })
    }
}

// ============================================================================
// Blocker
// ============================================================================

/// Observable state of the blocker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockerState {
    /// No navigation is parked
    Unblocked,
    /// A navigation attempt is parked and waiting for a decision
    Blocked,
}

/// Reason reported for intercepted navigations.
pub const BLOCK_REASON: &str = "Unsaved search input";

/// Router-side interception of navigations while there is unsaved input.
#[derive(Debug, Default, Clone)]
pub struct Blocker {
    armed: bool,
    pending: Option<NavigationRequest>,
}

impl Blocker {
    /// Create a disarmed blocker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm or disarm interception.
    ///
    /// Disarming while a navigation is parked leaves the parked request in
    /// place; it is released with [`proceed`](Self::proceed) or dropped with
    /// [`reset`](Self::reset).
    pub fn arm(&mut self, armed: bool) {
        if self.armed != armed {
            debug_log!("Navigation blocker {}", if armed { "armed" } else { "disarmed" });
        }
        self.armed = armed;
    }

    /// Whether navigations are currently intercepted.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Current state.
    pub fn state(&self) -> BlockerState {
        if self.pending.is_some() {
            BlockerState::Blocked
        } else {
            BlockerState::Unblocked
        }
    }

    /// The parked navigation, if any.
    pub fn pending(&self) -> Option<&NavigationRequest> {
        self.pending.as_ref()
    }

    /// Decide whether `request` may go ahead.
    pub fn intercept(&mut self, request: &NavigationRequest) -> NavigationAction {
        if let Some(pending) = &self.pending {
            trace_log!(
                "Navigation to '{}' ignored, '{}' is already pending",
                request.to,
                pending.to
            );
            return NavigationAction::deny(BLOCK_REASON);
        }

        if !self.armed {
            return NavigationAction::Continue;
        }

        debug_log!("Blocking navigation to '{}'", request.to);
        self.pending = Some(request.clone());
        NavigationAction::deny(BLOCK_REASON)
    }

    /// Release the parked navigation and disarm.
    pub fn proceed(&mut self) -> Option<NavigationRequest> {
        let pending = self.pending.take()?;
        self.armed = false;
        Some(pending)
    }

    /// Drop the parked navigation; stays armed.
    pub fn reset(&mut self) {
        self.pending = None;
    }
}

// ============================================================================
// Tests
// ============================================================================
