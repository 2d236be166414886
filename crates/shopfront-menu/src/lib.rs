#![forbid(unsafe_code)]

//! Category dropdown: a two-level navigation menu built on the disclosure
//! engine.
//!
//! The menu shows top-level categories at its root. Selecting a category
//! with sub-categories descends into a submenu for that category; selecting
//! a leaf navigates to the category's route and closes the menu. The panel
//! itself participates in a [`DisclosureGroup`], so opening any sibling
//! navbar widget closes the menu, and the menu's own open state lives in
//! exactly one place.
//!
//! # Invariants
//!
//! - The submenu stack resets to root whenever the menu closes, for any
//!   reason. A reopened menu always starts at the top level.
//! - Selecting a leaf performs exactly one navigation and exactly one close.
//! - Level changes while open re-measure the container so the height morph
//!   animates between screens.
//!
//! [`DisclosureGroup`]: shopfront_disclosure::DisclosureGroup

pub mod category;
pub mod dropdown;
pub mod route;
pub mod stack;

pub use category::{Category, CategoryId, CategoryTree};
pub use dropdown::{CategoryDropdown, TriggerAria};
pub use route::Navigator;
pub use stack::{MenuLevel, MenuStack};
