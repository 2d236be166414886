#![forbid(unsafe_code)]

//! Submenu level state.
//!
//! The menu renders at most two screens, so the "stack" is a single level:
//! root or one submenu. Transitions are only meaningful while the menu is
//! open; attempted transitions on a closed menu are logged no-ops rather
//! than errors, because a queued click handler firing after close is an
//! ordinary event-timing hazard.

use crate::category::{CategoryId, CategoryTree};

/// Which screen the menu is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MenuLevel {
    /// Top-level category list.
    #[default]
    Root,
    /// Sub-categories of one top-level category.
    Submenu(CategoryId),
}

impl MenuLevel {
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// 0 at root, 1 inside a submenu.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Root => 0,
            Self::Submenu(_) => 1,
        }
    }
}

/// Current menu level plus the transition rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuStack {
    level: MenuLevel,
}

impl MenuStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn level(&self) -> &MenuLevel {
        &self.level
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.level.depth()
    }

    /// Enter the submenu for `id`. Legal only while the menu is open and the
    /// category actually has sub-categories. Returns whether the level
    /// changed.
    pub fn descend(&mut self, tree: &CategoryTree, id: &CategoryId, open: bool) -> bool {
        if !open {
            tracing::debug!(category = %id, "descend ignored on closed menu");
            return false;
        }
        if !tree.has_sub_categories(id) {
            tracing::debug!(category = %id, "descend ignored for leaf or unknown category");
            return false;
        }
        if self.level == MenuLevel::Submenu(id.clone()) {
            return false;
        }
        self.level = MenuLevel::Submenu(id.clone());
        true
    }

    /// Back out to the root screen. Legal only while open. Returns whether
    /// the level changed.
    pub fn ascend(&mut self, open: bool) -> bool {
        if !open {
            tracing::debug!("ascend ignored on closed menu");
            return false;
        }
        if self.level.is_root() {
            return false;
        }
        self.level = MenuLevel::Root;
        true
    }

    /// Unconditionally return to root. Called when the menu closes so a
    /// reopen always starts at the top level.
    pub fn reset(&mut self) {
        self.level = MenuLevel::Root;
    }
}
