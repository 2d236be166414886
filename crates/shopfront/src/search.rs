#![forbid(unsafe_code)]

//! The navbar search box.
//!
//! Not a disclosure widget: the search box shares only the key vocabulary
//! with the engine. Escape clears the term while the input is focused, and
//! submitting a non-blank term performs exactly one navigation to the
//! search route. Blank and whitespace-only terms never navigate.

use shopfront_menu::Navigator;
use shopfront_overlay::Key;

/// Headless state of the navbar search input.
pub struct SearchBox {
    term: String,
    focused: bool,
    navigator: Box<dyn Navigator>,
}

impl std::fmt::Debug for SearchBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchBox")
            .field("term", &self.term)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl SearchBox {
    pub fn new(navigator: impl Navigator + 'static) -> Self {
        Self {
            term: String::new(),
            focused: false,
            navigator: Box::new(navigator),
        }
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Replace the term (controlled-input style).
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus_gained(&mut self) {
        self.focused = true;
    }

    pub fn focus_lost(&mut self) {
        self.focused = false;
    }

    /// A key arrived while the input is focused.
    pub fn handle_key(&mut self, key: Key) {
        if !self.focused {
            return;
        }
        match key {
            Key::Escape => self.term.clear(),
            Key::Enter => self.submit(),
            Key::Char(c) => self.term.push(c),
            Key::Space => self.term.push(' '),
            Key::Other => {}
        }
    }

    /// Submit the current term. Navigates to the search route once for a
    /// non-blank trimmed term; blank terms are ignored.
    pub fn submit(&mut self) {
        let query = self.term.trim();
        if query.is_empty() {
            tracing::trace!("blank search submit ignored");
            return;
        }
        self.navigator.navigate_to(&format!("/search?query={query}"));
    }
}
