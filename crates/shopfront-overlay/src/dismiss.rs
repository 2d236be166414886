#![forbid(unsafe_code)]

//! Dismissal policy for overlay-style disclosure widgets.
//!
//! The policy is stateless: it maps an input event plus the widget's current
//! open boolean to a [`DismissalDecision`], and the caller routes that
//! decision into its `DisclosureGroup`. Keeping the open state in exactly one
//! place (the group) is what makes a late backdrop click or a stale Escape
//! handler harmless: the policy decides, the controller's own guards apply.
//!
//! # Invariants
//!
//! - A backdrop click can only ever produce a close decision: while closed it
//!   decides nothing, never an open. This is an explicit asymmetry, not a
//!   generic click toggle.
//! - Escape only acts while open, and only when the capability is set.

use bitflags::bitflags;

use crate::event::Key;

bitflags! {
    /// Which dismissal and focus behaviors an overlay opts into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OverlayCapabilities: u8 {
        /// Escape while open closes the overlay.
        const ESCAPE_CLOSES = 1 << 0;
        /// Clicking the backdrop while open closes the overlay.
        const BACKDROP_CLOSES = 1 << 1;
        /// Hold the shared scroll lock while open.
        const SCROLL_LOCK = 1 << 2;
        /// Return focus to the trigger when dismissed via Escape.
        const FOCUS_RETURN = 1 << 3;
        /// Focus the trigger when opening on a wide viewport.
        const AUTOFOCUS_TRIGGER = 1 << 4;
    }
}

impl Default for OverlayCapabilities {
    fn default() -> Self {
        Self::all()
    }
}

/// Why a close decision was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Escape,
    Backdrop,
}

/// What the caller should do with its disclosure controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissalDecision {
    /// Trigger activation: toggle the widget.
    Toggle,
    /// Dismiss the open widget.
    Close(DismissReason),
}

/// Stateless event-to-decision mapping for one overlay widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissalPolicy {
    caps: OverlayCapabilities,
}

impl Default for DismissalPolicy {
    fn default() -> Self {
        Self::new(OverlayCapabilities::default())
    }
}

impl DismissalPolicy {
    /// Create a policy with the given capability set.
    #[must_use]
    pub const fn new(caps: OverlayCapabilities) -> Self {
        Self { caps }
    }

    /// The capability set this policy applies.
    #[must_use]
    pub const fn capabilities(&self) -> OverlayCapabilities {
        self.caps
    }

    /// Whether the widget should hold the scroll lock while open.
    #[must_use]
    pub fn wants_scroll_lock(&self) -> bool {
        self.caps.contains(OverlayCapabilities::SCROLL_LOCK)
    }

    /// Whether focus returns to the trigger on Escape dismissal.
    #[must_use]
    pub fn wants_focus_return(&self) -> bool {
        self.caps.contains(OverlayCapabilities::FOCUS_RETURN)
    }

    /// Whether the trigger receives focus when opening (wide viewport only).
    #[must_use]
    pub fn autofocus_trigger(&self) -> bool {
        self.caps.contains(OverlayCapabilities::AUTOFOCUS_TRIGGER)
    }

    /// Decide for a key pressed while focus is within the widget or its
    /// trigger.
    #[must_use]
    pub fn decide_key(&self, open: bool, key: Key) -> Option<DismissalDecision> {
        match key {
            Key::Escape if open && self.caps.contains(OverlayCapabilities::ESCAPE_CLOSES) => {
                Some(DismissalDecision::Close(DismissReason::Escape))
            }
            key if key.is_activation() => Some(DismissalDecision::Toggle),
            _ => None,
        }
    }

    /// Decide for a click on the backdrop. Close-only by contract.
    #[must_use]
    pub fn decide_backdrop(&self, open: bool) -> Option<DismissalDecision> {
        if open && self.caps.contains(OverlayCapabilities::BACKDROP_CLOSES) {
            Some(DismissalDecision::Close(DismissReason::Backdrop))
        } else {
            tracing::trace!(open, "backdrop click ignored");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_space_toggle() {
        let policy = DismissalPolicy::default();
        assert_eq!(policy.decide_key(false, Key::Enter), Some(DismissalDecision::Toggle));
        assert_eq!(policy.decide_key(true, Key::Space), Some(DismissalDecision::Toggle));
    }

    #[test]
    fn escape_closes_only_while_open() {
        let policy = DismissalPolicy::default();
        assert_eq!(
            policy.decide_key(true, Key::Escape),
            Some(DismissalDecision::Close(DismissReason::Escape))
        );
        assert_eq!(policy.decide_key(false, Key::Escape), None);
    }

    #[test]
    fn escape_capability_can_be_disabled() {
        let policy =
            DismissalPolicy::new(OverlayCapabilities::default() - OverlayCapabilities::ESCAPE_CLOSES);
        assert_eq!(policy.decide_key(true, Key::Escape), None);
    }

    #[test]
    fn backdrop_closes_but_never_opens() {
        let policy = DismissalPolicy::default();
        assert_eq!(
            policy.decide_backdrop(true),
            Some(DismissalDecision::Close(DismissReason::Backdrop))
        );
        assert_eq!(policy.decide_backdrop(false), None);
    }

    #[test]
    fn backdrop_capability_can_be_disabled() {
        let policy = DismissalPolicy::new(
            OverlayCapabilities::default() - OverlayCapabilities::BACKDROP_CLOSES,
        );
        assert_eq!(policy.decide_backdrop(true), None);
    }

    #[test]
    fn other_keys_decide_nothing() {
        let policy = DismissalPolicy::default();
        assert_eq!(policy.decide_key(true, Key::Char('x')), None);
        assert_eq!(policy.decide_key(true, Key::Other), None);
    }

    #[test]
    fn capability_accessors() {
        let policy = DismissalPolicy::default();
        assert!(policy.wants_scroll_lock());
        assert!(policy.wants_focus_return());
        assert!(policy.autofocus_trigger());

        let minimal = DismissalPolicy::new(OverlayCapabilities::ESCAPE_CLOSES);
        assert!(!minimal.wants_scroll_lock());
        assert!(!minimal.wants_focus_return());
        assert!(!minimal.autofocus_trigger());
    }
}
