#![forbid(unsafe_code)]

//! The viewport-mode collaborator.
//!
//! A single "is the viewport narrow" signal drives two decisions: which
//! trigger variant to render (icon-only vs icon + label) and whether to skip
//! element-measurement-based positioning (a narrow-viewport dropdown is
//! always left-aligned at 0). The signal is injected as an
//! `Observable<ViewportMode>` rather than read from an ambient global, so
//! the engine stays testable without a rendering environment.

/// Whether the viewport is narrow (mobile) or wide (desktop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportMode {
    Narrow,
    #[default]
    Wide,
}

impl ViewportMode {
    #[must_use]
    pub fn is_narrow(self) -> bool {
        matches!(self, Self::Narrow)
    }

    /// Which trigger variant this viewport renders.
    #[must_use]
    pub fn trigger_variant(self) -> TriggerVariant {
        match self {
            Self::Narrow => TriggerVariant::IconOnly,
            Self::Wide => TriggerVariant::IconAndLabel,
        }
    }

    /// Horizontal offset for an open dropdown: the measured trigger left on
    /// wide viewports, always 0 on narrow ones (no measurement taken).
    #[must_use]
    pub fn dropdown_left(self, measured_trigger_left: f32) -> f32 {
        match self {
            Self::Narrow => 0.0,
            Self::Wide => measured_trigger_left,
        }
    }
}

/// Visual variant of the dropdown trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerVariant {
    /// Mobile: drawer icon only.
    IconOnly,
    /// Desktop: icon plus label.
    IconAndLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_follow_mode() {
        assert_eq!(ViewportMode::Narrow.trigger_variant(), TriggerVariant::IconOnly);
        assert_eq!(ViewportMode::Wide.trigger_variant(), TriggerVariant::IconAndLabel);
    }

    #[test]
    fn narrow_dropdown_is_left_aligned_at_zero() {
        assert_eq!(ViewportMode::Narrow.dropdown_left(184.5), 0.0);
        assert_eq!(ViewportMode::Wide.dropdown_left(184.5), 184.5);
    }
}
