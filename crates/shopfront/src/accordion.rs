#![forbid(unsafe_code)]

//! The FAQ-style accordion widget.
//!
//! An [`Accordion`] is a thin handle on a [`DisclosureGroup`]; each
//! [`AccordionItem`] couples one panel of that group to a
//! [`MeasuredTransition`] so its content animates between zero and measured
//! height. The item's panel listener keeps geometry in sync on every edge,
//! including the implicit close when a sibling opens, and forwards the edge
//! to an optional host callback.
//!
//! Identity is assigned by the group in registration order and is unique
//! for the accordion's lifetime, so the ARIA wiring
//! (`aria-controls="accordion-content-{id}"`) never collides even as items
//! are added and removed.

use std::cell::RefCell;
use std::rc::Rc;

use shopfront_disclosure::{DisclosureGroup, MeasuredTransition, PanelGeometry, PanelHandle, PanelId};
use shopfront_overlay::Key;

/// ARIA state for one accordion header/content pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AriaAttrs {
    /// `aria-expanded` on the header button.
    pub expanded: bool,
    /// `aria-controls` on the header button; also the content element's id.
    pub controls: String,
}

/// Everything the host needs to render one item in its current state.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelBinding {
    pub is_open: bool,
    pub geometry: PanelGeometry,
    pub aria: AriaAttrs,
}

type HostCallback = Rc<RefCell<Option<Box<dyn FnMut(bool)>>>>;

/// A group of accordion items with at most one expanded.
#[derive(Debug, Clone, Default)]
pub struct Accordion {
    group: DisclosureGroup,
}

impl Accordion {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. `measure` returns the natural pixel height of the
    /// item's content subtree.
    pub fn item(&self, measure: impl FnMut() -> f32 + 'static) -> AccordionItem {
        AccordionItem::register(&self.group, measure)
    }

    /// The id of the expanded item, if any.
    #[must_use]
    pub fn open_id(&self) -> Option<PanelId> {
        self.group.open_id()
    }

    /// Number of items currently registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.group.panel_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.group.panel_count() == 0
    }

    /// Collapse whatever is expanded.
    pub fn close_all(&self) {
        if let Some(open) = self.group.open_id() {
            self.group.request_close(open);
        }
    }

    /// The underlying group, for wiring non-accordion panels into the same
    /// exclusivity scope.
    #[must_use]
    pub fn group(&self) -> &DisclosureGroup {
        &self.group
    }
}

/// One header/content pair of an [`Accordion`].
///
/// Dropping the item unregisters its panel; if it was the expanded one, the
/// accordion transitions to all-collapsed.
pub struct AccordionItem {
    panel: PanelHandle,
    transition: Rc<RefCell<MeasuredTransition>>,
    on_change: HostCallback,
}

impl std::fmt::Debug for AccordionItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccordionItem")
            .field("id", &self.panel.id())
            .field("open", &self.panel.is_open())
            .finish_non_exhaustive()
    }
}

impl AccordionItem {
    fn register(group: &DisclosureGroup, measure: impl FnMut() -> f32 + 'static) -> Self {
        let panel = group.register();
        let transition = Rc::new(RefCell::new(MeasuredTransition::new(measure)));
        let on_change: HostCallback = Rc::new(RefCell::new(None));

        let tr = Rc::downgrade(&transition);
        let host = Rc::downgrade(&on_change);
        panel.on_change(move |_, open| {
            if let Some(tr) = tr.upgrade() {
                tr.borrow_mut().sync(open);
            }
            let Some(host) = host.upgrade() else {
                return;
            };
            // Take the callback out of the slot for the call, so it may
            // install a replacement without hitting its own borrow.
            let taken = host.borrow_mut().take();
            if let Some(mut callback) = taken {
                callback(open);
                let mut slot = host.borrow_mut();
                if slot.is_none() {
                    *slot = Some(callback);
                }
            }
        });

        Self {
            panel,
            transition,
            on_change,
        }
    }

    /// Stable id of this item within its accordion.
    #[must_use]
    pub fn id(&self) -> PanelId {
        self.panel.id()
    }

    /// Display position in registration order.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.panel.index()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    /// The header was clicked.
    pub fn trigger_activated(&self) {
        self.panel.toggle();
    }

    /// A key arrived while the header has focus. Enter and Space toggle,
    /// matching native button activation.
    pub fn handle_key(&self, key: Key) {
        if key.is_activation() {
            self.panel.toggle();
        }
    }

    /// Expand this item (collapsing any expanded sibling).
    pub fn open(&self) {
        self.panel.open();
    }

    /// Collapse this item if it is the expanded one.
    pub fn close(&self) {
        self.panel.close();
    }

    /// The item's content changed size; re-measure on the next sync (now,
    /// if the item is open).
    pub fn content_changed(&self) {
        let mut transition = self.transition.borrow_mut();
        transition.mark_content_changed();
        if self.panel.is_open() {
            transition.sync(true);
        }
    }

    /// Install the host edge callback, fired with the new open state once
    /// per transition of this item.
    pub fn set_on_change(&self, callback: impl FnMut(bool) + 'static) {
        *self.on_change.borrow_mut() = Some(Box::new(callback));
    }

    /// DOM id of the content element, referenced by `aria-controls`.
    #[must_use]
    pub fn content_element_id(&self) -> String {
        format!("accordion-content-{}", self.panel.id())
    }

    /// Current render-ready state.
    #[must_use]
    pub fn binding(&self) -> PanelBinding {
        let is_open = self.panel.is_open();
        PanelBinding {
            is_open,
            geometry: self.transition.borrow().geometry(),
            aria: AriaAttrs {
                expanded: is_open,
                controls: self.content_element_id(),
            },
        }
    }

    /// Unregister now instead of waiting for drop.
    pub fn release(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_disclosure::Visibility;
    use std::cell::Cell;

    #[test]
    fn items_start_collapsed() {
        let accordion = Accordion::new();
        let item = accordion.item(|| 100.0);

        let binding = item.binding();
        assert!(!binding.is_open);
        assert_eq!(binding.geometry, PanelGeometry::collapsed());
        assert!(!binding.aria.expanded);
        assert_eq!(accordion.open_id(), None);
    }

    #[test]
    fn toggle_expands_with_measured_height() {
        let accordion = Accordion::new();
        let item = accordion.item(|| 140.0);

        item.trigger_activated();
        let binding = item.binding();
        assert!(binding.is_open);
        assert_eq!(binding.geometry, PanelGeometry::expanded(140.0));
        assert_eq!(binding.geometry.visibility, Visibility::Visible);
    }

    #[test]
    fn opening_one_collapses_the_other() {
        let accordion = Accordion::new();
        let a = accordion.item(|| 100.0);
        let b = accordion.item(|| 200.0);

        a.trigger_activated();
        b.trigger_activated();

        assert!(!a.is_open());
        assert!(b.is_open());
        assert_eq!(a.binding().geometry, PanelGeometry::collapsed());
        assert_eq!(b.binding().geometry, PanelGeometry::expanded(200.0));
    }

    #[test]
    fn enter_and_space_activate_the_header() {
        let accordion = Accordion::new();
        let item = accordion.item(|| 50.0);

        item.handle_key(Key::Enter);
        assert!(item.is_open());
        item.handle_key(Key::Space);
        assert!(!item.is_open());
        item.handle_key(Key::Escape);
        assert!(!item.is_open());
    }

    #[test]
    fn aria_wiring_uses_the_panel_id() {
        let accordion = Accordion::new();
        let a = accordion.item(|| 10.0);
        let b = accordion.item(|| 10.0);

        assert_ne!(a.content_element_id(), b.content_element_id());
        assert_eq!(
            a.binding().aria.controls,
            format!("accordion-content-{}", a.id())
        );
    }

    #[test]
    fn ids_stay_unique_across_remove_and_add() {
        let accordion = Accordion::new();
        let a = accordion.item(|| 10.0);
        let a_id = a.id();
        a.release();

        let b = accordion.item(|| 10.0);
        assert_ne!(b.id(), a_id);
    }

    #[test]
    fn host_callback_fires_once_per_edge() {
        let accordion = Accordion::new();
        let a = accordion.item(|| 10.0);
        let b = accordion.item(|| 10.0);

        let edges = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&edges);
        a.set_on_change(move |open| log.borrow_mut().push(open));

        a.trigger_activated();
        a.trigger_activated();
        a.trigger_activated();
        b.trigger_activated(); // implicit close of a

        assert_eq!(*edges.borrow(), vec![true, false, true, false]);
    }

    #[test]
    fn content_change_remeasures_open_item() {
        let accordion = Accordion::new();
        let height = Rc::new(Cell::new(60.0f32));
        let h = Rc::clone(&height);
        let item = accordion.item(move || h.get());

        item.open();
        assert_eq!(item.binding().geometry.height, 60.0);

        height.set(95.0); // async content finished loading
        item.content_changed();
        assert_eq!(item.binding().geometry.height, 95.0);
    }

    #[test]
    fn dropping_the_open_item_collapses_the_group() {
        let accordion = Accordion::new();
        let a = accordion.item(|| 10.0);
        let b = accordion.item(|| 10.0);

        a.open();
        drop(a);
        assert_eq!(accordion.open_id(), None);
        assert!(!b.is_open());
        assert_eq!(accordion.len(), 1);
    }

    #[test]
    fn close_all_collapses() {
        let accordion = Accordion::new();
        let a = accordion.item(|| 10.0);
        a.open();
        accordion.close_all();
        assert!(!a.is_open());
        assert_eq!(a.binding().geometry, PanelGeometry::collapsed());
    }

    #[test]
    fn degenerate_measurement_recovers_after_relayout() {
        let accordion = Accordion::new();
        let height = Rc::new(Cell::new(0.0f32));
        let h = Rc::clone(&height);
        let item = accordion.item(move || h.get());

        item.open();
        assert_eq!(item.binding().geometry.height, 0.0);
        assert!(item.is_open(), "logical state is open despite zero height");

        height.set(180.0);
        item.content_changed();
        assert_eq!(item.binding().geometry.height, 180.0);
    }
}
