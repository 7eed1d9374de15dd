//! Unsaved-input navigation guard.
//!
//! [`SearchPrompt`] owns the search box text and decides when leaving the
//! page needs confirmation. It is a small explicit state machine:
//!
//! ```text
//!            input differs from baseline
//!   Clean ───────────────────────────────► Dirty
//!     ▲   ◄─────────────────────────────── │  ▲
//!     │      input back to baseline        │  │ cancel()
//!     │                                    ▼  │
//!     └────────── confirm() ────────── BlockedPending
//!                               (navigation attempted)
//! ```
//!
//! Entering `Dirty` attaches the unload listener and leaving it detaches it;
//! the returned [`GuardEffect`] tells the owner which one happened so it can
//! arm or disarm the router's [`Blocker`](crate::blocker::Blocker).
//!
//! The baseline is the first non-empty value the box ever held. An edit is
//! compared against the baseline *as it was before that edit*, so the very
//! first non-empty keystroke already counts as dirty.

use crate::{debug_log, trace_log};

/// Text of the leave confirmation.
pub const PROMPT_MESSAGE: &str = "Are you sure you want to leave this page?";
/// Label of the action that lets the navigation through.
pub const CONFIRM_LABEL: &str = "Ok";
/// Label of the action that keeps the user on the page.
pub const CANCEL_LABEL: &str = "Cancel";
/// Accessibility role of the confirmation.
pub const DIALOG_ROLE: &str = "dialog";

/// Guard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No unsaved input; navigation passes freely
    Clean,
    /// Unsaved input; navigation is intercepted
    Dirty,
    /// A navigation was intercepted and the dialog is showing
    BlockedPending,
}

/// Side effect the owner must apply after an input change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardEffect {
    None,
    /// Became dirty: arm interception and listen for unload
    AttachUnloadListener,
    /// Became clean: disarm interception and stop listening for unload
    DetachUnloadListener,
}

/// Stand-in for the host's unload event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UnloadEvent {
    default_prevented: bool,
}

impl UnloadEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the host to confirm before unloading.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// What the confirmation dialog shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub role: &'static str,
    pub message: &'static str,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
}

impl ConfirmDialog {
    const LEAVE_PAGE: Self = Self {
        role: DIALOG_ROLE,
        message: PROMPT_MESSAGE,
        confirm_label: CONFIRM_LABEL,
        cancel_label: CANCEL_LABEL,
    };
}

/// Search box state plus the dirty/blocked state machine around it.
#[derive(Debug, Default, Clone)]
pub struct SearchPrompt {
    text: String,
    baseline: String,
    dirty: bool,
    pending: bool,
    unload_listener: bool,
}

impl SearchPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current search text, fed to the product filter.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn state(&self) -> GuardState {
        if self.pending {
            GuardState::BlockedPending
        } else if self.dirty {
            GuardState::Dirty
        } else {
            GuardState::Clean
        }
    }

    /// Whether the unload listener is currently attached.
    pub fn unload_listener_attached(&self) -> bool {
        self.unload_listener
    }

    /// Record a new value of the search box.
    pub fn on_input(&mut self, value: impl Into<String>) -> GuardEffect {
        let value = value.into();
        let previous_baseline = if self.baseline.is_empty() {
            self.baseline.clone_from(&value);
            String::new()
        } else {
            self.baseline.clone()
        };

        let was_dirty = self.dirty;
        self.dirty = value != previous_baseline;
        trace_log!("Search input '{}' (dirty: {})", value, self.dirty);
        self.text = value;

        match (was_dirty, self.dirty) {
            (false, true) => {
                self.unload_listener = true;
                GuardEffect::AttachUnloadListener
            }
            (true, false) => {
                self.unload_listener = false;
                GuardEffect::DetachUnloadListener
            }
            _ => GuardEffect::None,
        }
    }

    /// A navigation was intercepted; show the dialog.
    ///
    /// Only one interception is tracked, so calling this again while the
    /// dialog is up changes nothing. Returns whether the dialog opened now.
    pub fn on_navigation_blocked(&mut self) -> bool {
        if self.pending || !self.dirty {
            return false;
        }
        debug_log!("Navigation intercepted with unsaved search input");
        self.pending = true;
        true
    }

    /// The user chose to leave. Everything resets, as on a fresh mount.
    pub fn confirm(&mut self) -> GuardEffect {
        if !self.pending {
            return GuardEffect::None;
        }
        debug_log!("Leave confirmed, discarding search input");
        let had_listener = self.unload_listener;
        *self = Self::default();
        if had_listener {
            GuardEffect::DetachUnloadListener
        } else {
            GuardEffect::None
        }
    }

    /// The user chose to stay. Text and dirty flag are kept.
    pub fn cancel(&mut self) {
        if self.pending {
            debug_log!("Leave cancelled, keeping search input");
        }
        self.pending = false;
    }

    /// Unload handler: request the host's native confirmation while dirty,
    /// unless the in-app dialog is already asking.
    pub fn before_unload(&self, event: &mut UnloadEvent) {
        if self.unload_listener && !self.pending {
            event.prevent_default();
        }
    }

    /// The dialog to render, while one is pending.
    pub fn dialog(&self) -> Option<ConfirmDialog> {
        self.pending.then_some(ConfirmDialog::LEAVE_PAGE)
    }
}

// ============================================================================
// Tests
// ============================================================================
