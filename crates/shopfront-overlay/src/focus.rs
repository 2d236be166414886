#![forbid(unsafe_code)]

//! Focus bookkeeping for disclosure triggers.
//!
//! The engine only needs two moves from the host's focus system: put focus on
//! the trigger when an overlay opens (wide viewport), and put it back on the
//! trigger when the overlay is dismissed, so focus is never stranded on a
//! now-hidden element. [`FocusTracker`] records the current programmatic
//! focus target; the consumer mirrors it onto real elements.

use std::cell::Cell;
use std::rc::Rc;

/// Identifier for a focusable element, assigned by the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusId(pub u64);

/// Shared record of the current programmatic focus target.
///
/// Clones share state, so a widget and its host observe the same focus.
#[derive(Clone, Default)]
pub struct FocusTracker {
    current: Rc<Cell<Option<FocusId>>>,
}

impl std::fmt::Debug for FocusTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusTracker")
            .field("current", &self.current.get())
            .finish()
    }
}

impl FocusTracker {
    /// Create a tracker with nothing focused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move programmatic focus to `id`.
    pub fn focus(&self, id: FocusId) {
        self.current.set(Some(id));
    }

    /// Clear programmatic focus.
    pub fn clear(&self) {
        self.current.set(None);
    }

    /// The element that currently holds programmatic focus.
    #[must_use]
    pub fn current(&self) -> Option<FocusId> {
        self.current.get()
    }
}
