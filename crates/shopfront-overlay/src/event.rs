#![forbid(unsafe_code)]

//! The key-event vocabulary the disclosure widgets consume.

/// A pressed key, already normalized by the host's input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Char(char),
    /// Any key the engine does not react to.
    Other,
}

impl Key {
    /// Whether this key activates a trigger element (Enter or Space).
    #[must_use]
    pub fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}
