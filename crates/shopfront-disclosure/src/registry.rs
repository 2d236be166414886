#![forbid(unsafe_code)]

//! Stable panel identity for sibling disclosure panels.
//!
//! Ids are issued monotonically per registry instance, so two panels that
//! are registered at the same time can never collide. Position in the
//! registry is exposed separately ([`PanelRegistry::index_of`]) because mount
//! timing makes registration order non-deterministic: ordering is for
//! display-dependent logic only, identity is always the id.

/// Unique identifier for a panel within one registry instance.
///
/// Stable for the panel's registered lifetime; never reused while any
/// simultaneously-registered panel holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(u64);

impl PanelId {
    /// Raw id value, useful for deriving stable DOM ids
    /// (e.g. `accordion-content-{id}`).
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues [`PanelId`]s and tracks the registered sibling set in order.
#[derive(Debug, Default)]
pub struct PanelRegistry {
    next: u64,
    panels: Vec<PanelId>,
}

impl PanelRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: 1,
            panels: Vec::new(),
        }
    }

    /// Register a new panel, returning its id.
    ///
    /// Registration never opens or closes anything; the returned id is
    /// closed until an explicit open request.
    pub fn register(&mut self) -> PanelId {
        if self.next == 0 {
            self.next = 1;
        }
        let id = PanelId(self.next);
        self.next += 1;
        self.panels.push(id);
        id
    }

    /// Remove a panel from the registry.
    ///
    /// Returns `true` if the id was registered. Unregistering an unknown id
    /// is a silent no-op so handlers firing after unmount cannot fail.
    pub fn unregister(&mut self, id: PanelId) -> bool {
        match self.panels.iter().position(|p| *p == id) {
            Some(idx) => {
                self.panels.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Position of `id` in registration order, for display-dependent logic.
    ///
    /// Never use this to prove identity: positions shift as siblings
    /// unregister.
    #[must_use]
    pub fn index_of(&self, id: PanelId) -> Option<usize> {
        self.panels.iter().position(|p| *p == id)
    }

    /// Whether `id` is currently registered.
    #[must_use]
    pub fn contains(&self, id: PanelId) -> bool {
        self.panels.contains(&id)
    }

    /// Number of registered panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Whether no panels are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Registered ids in registration order.
    pub fn iter(&self) -> impl Iterator<Item = PanelId> + '_ {
        self.panels.iter().copied()
    }
}
