#![forbid(unsafe_code)]

//! Exclusive open/close state for one group of sibling panels.
//!
//! [`DisclosureGroup`] is the controller: it owns the registry and the single
//! `Option<PanelId>` open slot. Exclusivity is structural: `request_open`
//! replaces the open id in one state update, so there is no intermediate
//! state in which two panels read "open".
//!
//! Panels interact through [`PanelHandle`]s, which hold a weak reference to
//! the group. A handle whose group (or registration) is gone degrades every
//! call to a silent no-op; close callbacks from panels that lost a race can
//! therefore fire late without consequence.
//!
//! # Invariants
//!
//! 1. `open_id()` is always `None` or a currently-registered id.
//! 2. Registering a panel never changes the open id.
//! 3. Change listeners observe exactly one call per transition edge of their
//!    own panel; siblings whose state did not flip are not called.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use ahash::AHashMap;

use crate::registry::{PanelId, PanelRegistry};

type ChangeListener = Box<dyn FnMut(PanelId, bool)>;

struct GroupInner {
    registry: PanelRegistry,
    open: Option<PanelId>,
    listeners: AHashMap<PanelId, ChangeListener>,
}

/// Controller for a sibling group of disclosure panels.
///
/// Cloning yields another handle to the same group state.
pub struct DisclosureGroup {
    inner: Rc<RefCell<GroupInner>>,
}

impl Clone for DisclosureGroup {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl Default for DisclosureGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DisclosureGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("DisclosureGroup")
            .field("panels", &inner.registry.len())
            .field("open", &inner.open)
            .finish()
    }
}

impl DisclosureGroup {
    /// Create an empty group with nothing open.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(GroupInner {
                registry: PanelRegistry::new(),
                open: None,
                listeners: AHashMap::new(),
            })),
        }
    }

    /// Register a new panel and return its handle.
    ///
    /// The new panel starts closed; registration never opens or closes
    /// anything.
    pub fn register(&self) -> PanelHandle {
        let id = self.inner.borrow_mut().registry.register();
        PanelHandle {
            group: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Open `id`, implicitly closing whatever was open.
    ///
    /// A request for an id that is already open, or that is not registered
    /// (a stale callback), is a no-op.
    pub fn request_open(&self, id: PanelId) {
        let prev = {
            let mut inner = self.inner.borrow_mut();
            if !inner.registry.contains(id) {
                tracing::debug!(panel = id.value(), "open request for unregistered panel ignored");
                return;
            }
            if inner.open == Some(id) {
                return;
            }
            inner.open.replace(id)
        };
        if let Some(prev) = prev {
            self.notify(prev, false);
        }
        self.notify(id, true);
    }

    /// Close `id` only if it is the currently-open panel.
    ///
    /// Closing a panel that is not open is a no-op, not an error; this
    /// guards against stale callbacks from panels that lost the race.
    pub fn request_close(&self, id: PanelId) {
        let closed = {
            let mut inner = self.inner.borrow_mut();
            if inner.open == Some(id) {
                inner.open = None;
                true
            } else {
                tracing::trace!(panel = id.value(), "close request for panel that is not open");
                false
            }
        };
        if closed {
            self.notify(id, false);
        }
    }

    /// Close `id` if it is open; otherwise open it.
    pub fn toggle(&self, id: PanelId) {
        if self.is_open(id) {
            self.request_close(id);
        } else {
            self.request_open(id);
        }
    }

    /// Whether `id` is the open panel.
    #[must_use]
    pub fn is_open(&self, id: PanelId) -> bool {
        self.inner.borrow().open == Some(id)
    }

    /// The currently-open panel id, if any.
    #[must_use]
    pub fn open_id(&self) -> Option<PanelId> {
        self.inner.borrow().open
    }

    /// Remove a panel from the group.
    ///
    /// If the open panel unregisters, the group transitions to "no panel
    /// open" as a side effect; the departed panel's listener is dropped
    /// without a final call (there is no one left to observe it).
    pub fn unregister(&self, id: PanelId) {
        let mut inner = self.inner.borrow_mut();
        if inner.registry.unregister(id) {
            inner.listeners.remove(&id);
            if inner.open == Some(id) {
                inner.open = None;
            }
        }
    }

    /// Display position of `id` in registration order.
    #[must_use]
    pub fn index_of(&self, id: PanelId) -> Option<usize> {
        self.inner.borrow().registry.index_of(id)
    }

    /// Number of registered panels.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.inner.borrow().registry.len()
    }

    /// Install the change listener for `id`, replacing any previous one.
    ///
    /// The listener fires once per actual transition edge of that panel
    /// (open→closed or closed→open), never per sibling transition.
    pub fn on_change(&self, id: PanelId, listener: impl FnMut(PanelId, bool) + 'static) {
        let mut inner = self.inner.borrow_mut();
        if inner.registry.contains(id) {
            inner.listeners.insert(id, Box::new(listener));
        }
    }

    /// Invoke the listener for `id` outside the state borrow, so the
    /// listener may call back into the group.
    fn notify(&self, id: PanelId, is_open: bool) {
        let listener = self.inner.borrow_mut().listeners.remove(&id);
        if let Some(mut listener) = listener {
            listener(id, is_open);
            let mut inner = self.inner.borrow_mut();
            // Keep a replacement the listener installed; drop ours if the
            // panel unregistered itself meanwhile.
            if inner.registry.contains(id) {
                inner.listeners.entry(id).or_insert(listener);
            }
        }
    }
}

/// A panel's view of its group.
///
/// Holds a weak group reference: every method on a handle whose group has
/// been dropped, or whose panel has been unregistered, is a silent no-op.
/// Dropping the handle unregisters the panel.
pub struct PanelHandle {
    group: Weak<RefCell<GroupInner>>,
    id: PanelId,
}

impl std::fmt::Debug for PanelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelHandle").field("id", &self.id).finish()
    }
}

impl PanelHandle {
    /// This panel's stable id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> PanelId {
        self.id
    }

    fn with_group<R>(&self, f: impl FnOnce(&DisclosureGroup) -> R) -> Option<R> {
        let inner = self.group.upgrade()?;
        Some(f(&DisclosureGroup { inner }))
    }

    /// Whether this panel is the open one. Stale handles read `false`.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.with_group(|g| g.is_open(self.id)).unwrap_or(false)
    }

    /// Request that this panel open (closing any open sibling).
    pub fn open(&self) {
        self.with_group(|g| g.request_open(self.id));
    }

    /// Request that this panel close, if it is the open one.
    pub fn close(&self) {
        self.with_group(|g| g.request_close(self.id));
    }

    /// Toggle this panel.
    pub fn toggle(&self) {
        self.with_group(|g| g.toggle(self.id));
    }

    /// Display position in registration order.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.with_group(|g| g.index_of(self.id)).flatten()
    }

    /// Install this panel's change listener.
    pub fn on_change(&self, listener: impl FnMut(PanelId, bool) + 'static) {
        self.with_group(|g| g.on_change(self.id, listener));
    }

    /// Unregister now instead of waiting for drop.
    pub fn release(self) {}
}

impl Drop for PanelHandle {
    fn drop(&mut self) {
        if let Some(inner) = self.group.upgrade() {
            DisclosureGroup { inner }.unregister(self.id);
        }
    }
}
