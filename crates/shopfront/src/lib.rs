#![forbid(unsafe_code)]

//! Headless disclosure widgets for a storefront front end.
//!
//! Three widgets share one engine:
//!
//! - [`Accordion`]: a group of vertically stacked panels of which at most
//!   one is expanded, each animating between zero and its measured content
//!   height.
//! - [`CategoryDropdown`]: a navbar menu over a two-level category tree,
//!   with scroll locking, Escape/backdrop dismissal, and focus return.
//! - [`SearchBox`]: the navbar search input, sharing only the key
//!   vocabulary with the disclosure engine.
//!
//! Everything is headless: widgets own state, identity, measurement, and
//! input decisions; rendering and real DOM focus belong to the host. The
//! engine crates are re-exported so hosts depend on this crate alone.
//!
//! ```
//! use shopfront::{Accordion, Key};
//!
//! let accordion = Accordion::new();
//! let faq = accordion.item(|| 160.0);
//! let shipping = accordion.item(|| 90.0);
//!
//! faq.trigger_activated();
//! assert!(faq.is_open());
//!
//! shipping.handle_key(Key::Enter); // opening one closes the other
//! assert!(!faq.is_open());
//! assert!(shipping.is_open());
//! ```

pub mod accordion;
pub mod search;

pub use accordion::{Accordion, AccordionItem, AriaAttrs, PanelBinding};
pub use search::SearchBox;

pub use shopfront_disclosure::{
    DisclosureGroup, Easing, MeasuredTransition, Motion, PanelGeometry, PanelHandle, PanelId,
    PanelRegistry, Visibility,
};
pub use shopfront_menu::{
    Category, CategoryDropdown, CategoryId, CategoryTree, MenuLevel, MenuStack, Navigator,
    TriggerAria,
};
pub use shopfront_overlay::{
    DismissReason, DismissalDecision, DismissalPolicy, FocusId, FocusTracker, Key,
    OverlayCapabilities, ScrollLock, ScrollLockGuard, TriggerVariant, ViewportMode,
};
pub use shopfront_reactive::{Observable, Subscription};
