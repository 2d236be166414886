#![forbid(unsafe_code)]

//! The disclosure-panel engine: stable panel identity, exclusive open state,
//! and measured open/close geometry.
//!
//! A *disclosure widget* is anything that toggles between a collapsed and an
//! expanded visual state: accordion items, dropdown menus, drawers. This
//! crate is the headless core those widgets share:
//!
//! - [`PanelRegistry`] issues stable [`PanelId`]s to sibling panels.
//! - [`DisclosureGroup`] tracks which panel (if any) is open and enforces
//!   the single-open-panel invariant structurally: opening one panel *is*
//!   closing whatever was open, in one state update.
//! - [`MeasuredTransition`] turns a panel's open boolean plus a content
//!   measurement into animated geometry (`height`, `opacity`, `visibility`)
//!   without the state machine ever touching a rendering technology.
//!
//! # Invariants
//!
//! 1. At most one panel per group reads `is_open() == true` at any
//!    observation point, across any sequence of open/close/toggle calls.
//! 2. An unregistered id is never the recorded open id.
//! 3. Change listeners fire once per actual transition edge of their own
//!    panel, never as a sibling broadcast.
//!
//! # Failure Modes
//!
//! All engine failures are non-fatal no-ops: stale callbacks, unknown ids,
//! and zero-height measurements degrade silently (logged at debug level) and
//! the geometry still reaches the end state the open boolean dictates.

pub mod group;
pub mod registry;
pub mod transition;

pub use group::{DisclosureGroup, PanelHandle};
pub use registry::{PanelId, PanelRegistry};
pub use transition::{Easing, MeasuredTransition, Motion, PanelGeometry, Visibility};
