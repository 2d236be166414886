#![forbid(unsafe_code)]

//! The category dropdown widget.
//!
//! [`CategoryDropdown`] wires one disclosure panel to the two-level
//! [`MenuStack`], a morphing [`MeasuredTransition`] for the container
//! height, and the overlay services (dismissal policy, scroll lock, focus
//! tracking, viewport mode). The panel's change listener carries the
//! close-time obligations, so they run on *every* close edge, including an
//! exogenous one caused by a sibling panel opening:
//!
//! - the submenu stack resets to root,
//! - the scroll-lock hold is released,
//! - the container geometry collapses.
//!
//! Focus return is the one obligation tied to the dismissal *reason* rather
//! than the close edge itself: only an Escape dismissal moves focus back to
//! the trigger.

use std::cell::RefCell;
use std::rc::Rc;

use shopfront_disclosure::{DisclosureGroup, MeasuredTransition, Motion, PanelGeometry, PanelHandle};
use shopfront_overlay::{
    DismissReason, DismissalDecision, DismissalPolicy, FocusId, FocusTracker, Key, ScrollLock,
    ScrollLockGuard, TriggerVariant, ViewportMode,
};
use shopfront_reactive::Observable;

use crate::category::{Category, CategoryId, CategoryTree};
use crate::route::Navigator;
use crate::stack::{MenuLevel, MenuStack};

/// ARIA attributes for the dropdown trigger element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerAria {
    /// Always true: the trigger owns a popup menu.
    pub has_popup: bool,
    /// Mirrors the open state.
    pub expanded: bool,
}

/// State mutated by the panel's change listener.
struct Shared {
    menu: MenuStack,
    transition: MeasuredTransition,
    scroll_guard: Option<ScrollLockGuard>,
}

/// A two-level category menu attached to one panel of a [`DisclosureGroup`].
pub struct CategoryDropdown {
    tree: CategoryTree,
    panel: PanelHandle,
    shared: Rc<RefCell<Shared>>,
    policy: DismissalPolicy,
    scroll_lock: ScrollLock,
    focus: FocusTracker,
    trigger: FocusId,
    viewport: Observable<ViewportMode>,
    navigator: Box<dyn Navigator>,
}

impl std::fmt::Debug for CategoryDropdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryDropdown")
            .field("panel", &self.panel.id())
            .field("open", &self.panel.is_open())
            .field("level", self.shared.borrow().menu.level())
            .finish_non_exhaustive()
    }
}

impl CategoryDropdown {
    /// Register a dropdown as a new panel of `group`.
    ///
    /// `measure` returns the natural pixel height of the currently-rendered
    /// menu screen; it is re-run whenever the level changes so the container
    /// morphs between screen heights. Collaborators default to
    /// widget-private instances; inject shared ones with the `with_*`
    /// builders before the first open.
    pub fn new(
        group: &DisclosureGroup,
        tree: CategoryTree,
        trigger: FocusId,
        navigator: impl Navigator + 'static,
        measure: impl FnMut() -> f32 + 'static,
    ) -> Self {
        let shared = Rc::new(RefCell::new(Shared {
            menu: MenuStack::new(),
            transition: MeasuredTransition::with_motion(measure, Motion::menu_morph()),
            scroll_guard: None,
        }));
        let dropdown = Self {
            tree,
            panel: group.register(),
            shared,
            policy: DismissalPolicy::default(),
            scroll_lock: ScrollLock::default(),
            focus: FocusTracker::default(),
            trigger,
            viewport: Observable::default(),
            navigator: Box::new(navigator),
        };
        dropdown.install_listener();
        dropdown
    }

    /// Use a different capability set.
    #[must_use]
    pub fn with_policy(mut self, policy: DismissalPolicy) -> Self {
        self.assert_not_yet_open();
        self.policy = policy;
        self.install_listener();
        self
    }

    /// Share the page-wide scroll lock with other overlay widgets.
    #[must_use]
    pub fn with_scroll_lock(mut self, lock: ScrollLock) -> Self {
        self.assert_not_yet_open();
        self.scroll_lock = lock;
        self.install_listener();
        self
    }

    /// Share the host's focus tracker.
    #[must_use]
    pub fn with_focus(mut self, focus: FocusTracker) -> Self {
        self.assert_not_yet_open();
        self.focus = focus;
        self.install_listener();
        self
    }

    /// Follow the host's viewport-mode signal.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Observable<ViewportMode>) -> Self {
        self.assert_not_yet_open();
        self.viewport = viewport;
        self.install_listener();
        self
    }

    /// Swapping a collaborator on an open widget would strand state the
    /// old listener acquired, e.g. a scroll guard held against the
    /// replaced lock.
    fn assert_not_yet_open(&self) {
        debug_assert!(
            !self.panel.is_open(),
            "collaborators must be injected before the first open"
        );
    }

    /// Override the height-morph motion.
    #[must_use]
    pub fn with_motion(self, motion: Motion) -> Self {
        self.shared.borrow_mut().transition.set_motion(motion);
        self
    }

    /// The panel change listener: close-edge obligations live here so they
    /// also run when a sibling's open closes this menu.
    fn install_listener(&self) {
        let shared = Rc::downgrade(&self.shared);
        let lock = self.scroll_lock.clone();
        let focus = self.focus.clone();
        let viewport = self.viewport.clone();
        let policy = self.policy;
        let trigger = self.trigger;
        self.panel.on_change(move |_, open| {
            let Some(shared) = shared.upgrade() else {
                return;
            };
            let mut shared = shared.borrow_mut();
            if open {
                if policy.wants_scroll_lock() {
                    shared.scroll_guard = Some(lock.acquire());
                }
                if policy.autofocus_trigger() && !viewport.get().is_narrow() {
                    focus.focus(trigger);
                }
                shared.transition.sync(true);
            } else {
                shared.scroll_guard = None;
                shared.menu.reset();
                shared.transition.sync(false);
            }
        });
    }

    /// Whether this dropdown is the open panel of its group.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    /// Open programmatically (closing any open sibling).
    pub fn open(&self) {
        self.panel.open();
    }

    /// Close programmatically.
    pub fn close(&self) {
        self.panel.close();
    }

    /// The trigger was clicked.
    pub fn trigger_activated(&self) {
        self.panel.toggle();
    }

    /// A key arrived while focus is within the trigger or the open menu.
    pub fn handle_key(&self, key: Key) {
        match self.policy.decide_key(self.panel.is_open(), key) {
            Some(DismissalDecision::Toggle) => self.panel.toggle(),
            Some(DismissalDecision::Close(reason)) => {
                self.panel.close();
                if reason == DismissReason::Escape && self.policy.wants_focus_return() {
                    self.focus.focus(self.trigger);
                }
            }
            None => {}
        }
    }

    /// The backdrop behind the open menu was clicked. Close-only: a click
    /// on the backdrop of a closed menu never opens it.
    pub fn backdrop_clicked(&self) {
        if let Some(DismissalDecision::Close(_)) = self.policy.decide_backdrop(self.panel.is_open())
        {
            self.panel.close();
        }
    }

    /// An item in the current screen was selected.
    ///
    /// A category with sub-categories descends into its submenu; a leaf
    /// closes the menu and performs exactly one navigation to the
    /// category's route.
    pub fn select(&mut self, id: &CategoryId) {
        if !self.panel.is_open() {
            tracing::debug!(category = %id, "selection ignored on closed menu");
            return;
        }
        if self.tree.has_sub_categories(id) {
            self.descend(id);
            return;
        }
        let Some(path) = self.tree.find(id).map(Category::path) else {
            tracing::debug!(category = %id, "selection for unknown category ignored");
            return;
        };
        // Close first; the change listener resets the level and releases
        // the scroll hold before the host handles the route change.
        self.panel.close();
        self.navigator.navigate_to(&path);
    }

    /// Enter the submenu for `id`, re-measuring the container.
    pub fn descend(&mut self, id: &CategoryId) {
        let open = self.panel.is_open();
        let mut shared = self.shared.borrow_mut();
        if shared.menu.descend(&self.tree, id, open) {
            shared.transition.mark_content_changed();
            shared.transition.sync(true);
        }
    }

    /// Back out to the root screen, re-measuring the container.
    pub fn ascend(&mut self) {
        let open = self.panel.is_open();
        let mut shared = self.shared.borrow_mut();
        if shared.menu.ascend(open) {
            shared.transition.mark_content_changed();
            shared.transition.sync(true);
        }
    }

    /// Which screen the menu is showing.
    #[must_use]
    pub fn level(&self) -> MenuLevel {
        self.shared.borrow().menu.level().clone()
    }

    /// The categories rendered on the current screen.
    #[must_use]
    pub fn visible_items(&self) -> &[Category] {
        match self.level() {
            MenuLevel::Root => self.tree.top_level(),
            MenuLevel::Submenu(id) => self.tree.sub_categories(&id),
        }
    }

    /// Container geometry for the current open state and screen.
    #[must_use]
    pub fn geometry(&self) -> PanelGeometry {
        self.shared.borrow().transition.geometry()
    }

    /// The catalog content behind the current screen changed size; force a
    /// re-measure on the next sync.
    pub fn content_changed(&self) {
        let mut shared = self.shared.borrow_mut();
        shared.transition.mark_content_changed();
        if self.panel.is_open() {
            shared.transition.sync(true);
        }
    }

    /// ARIA state for the trigger element.
    #[must_use]
    pub fn trigger_aria(&self) -> TriggerAria {
        TriggerAria {
            has_popup: true,
            expanded: self.panel.is_open(),
        }
    }

    /// Which trigger variant the current viewport renders.
    #[must_use]
    pub fn trigger_variant(&self) -> TriggerVariant {
        self.viewport.get().trigger_variant()
    }

    /// Horizontal offset of the open dropdown given the measured trigger
    /// left edge. Narrow viewports pin to 0 without measuring.
    #[must_use]
    pub fn dropdown_left(&self, measured_trigger_left: f32) -> f32 {
        self.viewport.get().dropdown_left(measured_trigger_left)
    }

    /// The catalog this menu renders.
    #[must_use]
    pub fn tree(&self) -> &CategoryTree {
        &self.tree
    }
}
