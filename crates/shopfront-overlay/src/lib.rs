#![forbid(unsafe_code)]

//! Focus, dismissal, and scroll-lock coordination for overlay-style
//! disclosure widgets.
//!
//! An open overlay (dropdown, drawer) owes its users three things:
//!
//! - **Dismissal**: Escape closes it and a backdrop click closes it, but a
//!   backdrop click must never *open* a closed widget (an explicit
//!   asymmetry, not a generic click toggle).
//! - **Focus discipline**: focus lands on the trigger when the widget opens
//!   on a wide viewport, and returns to the trigger on Escape, so focus is
//!   never stranded on a hidden element.
//! - **Scroll lock**: page scrolling is disabled while at least one widget
//!   holding the lock is open, reference-counted so independently-opened
//!   widgets do not re-enable scrolling early.
//!
//! All of these are headless: the crate tracks state and hands decisions
//! back; attaching them to concrete elements is the consumer's job.

pub mod dismiss;
pub mod event;
pub mod focus;
pub mod scroll_lock;
pub mod viewport;

pub use dismiss::{DismissReason, DismissalDecision, DismissalPolicy, OverlayCapabilities};
pub use event::Key;
pub use focus::{FocusId, FocusTracker};
pub use scroll_lock::{ScrollLock, ScrollLockGuard};
pub use viewport::{TriggerVariant, ViewportMode};
