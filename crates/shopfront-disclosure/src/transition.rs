#![forbid(unsafe_code)]

//! Measured open/close geometry for a disclosure panel.
//!
//! The collapsed content of a panel stays mounted at zero height so the open
//! transition has something to animate. [`MeasuredTransition`] owns the
//! measurement closure (the only thing that crosses the rendering boundary)
//! and derives [`PanelGeometry`] from the open boolean:
//!
//! - open   ⇒ `{ height: measured, opacity: 1, visibility: Visible }`
//! - closed ⇒ `{ height: 0, opacity: 0, visibility: Hidden }`
//!
//! # Failure Modes
//!
//! Measuring before the content has been laid out yields height 0, which
//! produces a degenerate (instant, invisible) open rather than an error. The
//! condition is logged at debug level and the geometry still matches the
//! open boolean, so a re-measure after the next layout pass recovers fully.
//!
//! # Motion
//!
//! Duration and easing are presentation parameters, not part of the state
//! machine's correctness contract: the *end state* always matches the open
//! boolean exactly, and re-syncing an already-settled state is a visible
//! no-op. A sync that changes the target while a previous animation is still
//! running retargets it (restarts the clock); transitions are never queued.

use std::time::Duration;

use web_time::Instant;

/// CSS-level visibility of a panel's content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    /// The CSS keyword for this state.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
        }
    }
}

/// Derived visual state of one panel. Never authoritative, never persisted:
/// recomputed whenever the open boolean or the measured content changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    /// Content height in pixels.
    pub height: f32,
    /// 0.0 (collapsed) or 1.0 (expanded).
    pub opacity: f32,
    pub visibility: Visibility,
}

impl PanelGeometry {
    /// Geometry of a collapsed panel.
    #[must_use]
    pub const fn collapsed() -> Self {
        Self {
            height: 0.0,
            opacity: 0.0,
            visibility: Visibility::Hidden,
        }
    }

    /// Geometry of an expanded panel with the given measured height.
    #[must_use]
    pub const fn expanded(height: f32) -> Self {
        Self {
            height,
            opacity: 1.0,
            visibility: Visibility::Visible,
        }
    }
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self::collapsed()
    }
}

/// Easing curves for the visual transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` to eased progress.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Presentation parameters for a geometry transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub duration: Duration,
    pub easing: Easing,
}

impl Motion {
    /// The accordion's height/opacity morph (200 ms ease-in-out).
    #[must_use]
    pub const fn accordion() -> Self {
        Self {
            duration: Duration::from_millis(200),
            easing: Easing::EaseInOut,
        }
    }

    /// The dropdown menu's level morph (300 ms ease-in-out).
    #[must_use]
    pub const fn menu_morph() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: Easing::EaseInOut,
        }
    }

    /// The mobile drawer slide (500 ms ease-in-out).
    #[must_use]
    pub const fn drawer() -> Self {
        Self {
            duration: Duration::from_millis(500),
            easing: Easing::EaseInOut,
        }
    }

    /// No animation: geometry snaps to the end state.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            duration: Duration::ZERO,
            easing: Easing::Linear,
        }
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self::accordion()
    }
}

/// Turns an open boolean plus a content measurement into animated geometry.
///
/// The measurement closure returns the natural (unconstrained) pixel height
/// of the panel's content subtree and must be taken from content that is
/// already in the layout. [`MeasuredTransition::mark_content_changed`] forces
/// a re-measure on the next sync, so an async content swap never leaves a
/// stale cached height behind.
pub struct MeasuredTransition {
    measure: Box<dyn FnMut() -> f32>,
    motion: Motion,
    geometry: PanelGeometry,
    /// `(open, revision)` the current geometry was computed for.
    settled: Option<(bool, u64)>,
    revision: u64,
    retargeted_at: Option<Instant>,
}

impl std::fmt::Debug for MeasuredTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeasuredTransition")
            .field("geometry", &self.geometry)
            .field("settled", &self.settled)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl MeasuredTransition {
    /// Create a transition with the default accordion motion.
    pub fn new(measure: impl FnMut() -> f32 + 'static) -> Self {
        Self::with_motion(measure, Motion::default())
    }

    /// Create a transition with explicit motion parameters.
    pub fn with_motion(measure: impl FnMut() -> f32 + 'static, motion: Motion) -> Self {
        Self {
            measure: Box::new(measure),
            motion,
            geometry: PanelGeometry::collapsed(),
            settled: None,
            revision: 0,
            retargeted_at: None,
        }
    }

    /// Presentation parameters for consumers driving frames.
    #[must_use]
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Replace the motion parameters. Presentation-only: committed geometry
    /// and the settled state are untouched.
    pub fn set_motion(&mut self, motion: Motion) {
        self.motion = motion;
    }

    /// The geometry most recently produced by [`sync`](Self::sync).
    #[must_use]
    pub fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    /// Record that the panel's content changed identity or size, so the next
    /// sync re-measures instead of reusing the cached height.
    pub fn mark_content_changed(&mut self) {
        self.revision += 1;
    }

    /// Recompute geometry for the given open boolean.
    ///
    /// Re-measures when the boolean flipped or the content changed since the
    /// last sync; otherwise this is idempotent and does not restart the
    /// animation clock.
    pub fn sync(&mut self, open: bool) -> PanelGeometry {
        if self.settled == Some((open, self.revision)) {
            return self.geometry;
        }

        self.geometry = if open {
            let height = (self.measure)();
            if height <= 0.0 {
                tracing::debug!(
                    height,
                    "degenerate measurement: content not yet laid out, opening to zero height"
                );
            }
            PanelGeometry::expanded(height.max(0.0))
        } else {
            PanelGeometry::collapsed()
        };
        self.settled = Some((open, self.revision));
        self.retargeted_at = Some(Instant::now());
        self.geometry
    }

    /// Whether the visual animation for the last retarget has run its course
    /// by `now`. Purely informational; the end state is already committed.
    #[must_use]
    pub fn is_visually_settled(&self, now: Instant) -> bool {
        match self.retargeted_at {
            Some(at) => now.saturating_duration_since(at) >= self.motion.duration,
            None => true,
        }
    }

    /// Eased progress of the running animation at `now`, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        let Some(at) = self.retargeted_at else {
            return 1.0;
        };
        if self.motion.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(at).as_secs_f32();
        let t = elapsed / self.motion.duration.as_secs_f32();
        self.motion.easing.apply(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_measure(height: f32) -> (impl FnMut() -> f32, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        (
            move || {
                c.set(c.get() + 1);
                height
            },
            calls,
        )
    }

    #[test]
    fn open_uses_measured_height() {
        let mut tr = MeasuredTransition::new(|| 120.0);
        let geo = tr.sync(true);
        assert_eq!(geo, PanelGeometry::expanded(120.0));
        assert_eq!(geo.visibility, Visibility::Visible);
    }

    #[test]
    fn closed_is_zero_and_hidden() {
        let mut tr = MeasuredTransition::new(|| 120.0);
        tr.sync(true);
        let geo = tr.sync(false);
        assert_eq!(geo, PanelGeometry::collapsed());
        assert_eq!(geo.visibility.as_css(), "hidden");
    }

    #[test]
    fn closed_never_measures() {
        let (measure, calls) = counting_measure(80.0);
        let mut tr = MeasuredTransition::new(measure);
        tr.sync(false);
        tr.sync(false);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn repeated_sync_is_idempotent() {
        let (measure, calls) = counting_measure(80.0);
        let mut tr = MeasuredTransition::new(measure);

        let first = tr.sync(true);
        let second = tr.sync(true);
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1, "settled state must not re-measure");
    }

    #[test]
    fn content_change_forces_re_measure() {
        let height = Rc::new(Cell::new(50.0f32));
        let h = Rc::clone(&height);
        let mut tr = MeasuredTransition::new(move || h.get());

        assert_eq!(tr.sync(true).height, 50.0);

        height.set(90.0); // async content swap
        assert_eq!(tr.sync(true).height, 50.0, "no invalidation yet");

        tr.mark_content_changed();
        assert_eq!(tr.sync(true).height, 90.0);
    }

    #[test]
    fn degenerate_measurement_still_opens() {
        let mut tr = MeasuredTransition::new(|| 0.0);
        let geo = tr.sync(true);
        assert_eq!(geo.height, 0.0);
        assert_eq!(geo.opacity, 1.0);
        assert_eq!(geo.visibility, Visibility::Visible);
    }

    #[test]
    fn negative_measurement_clamps_to_zero() {
        let mut tr = MeasuredTransition::new(|| -4.0);
        assert_eq!(tr.sync(true).height, 0.0);
    }

    #[test]
    fn recovers_after_layout_pass() {
        // First open happens before layout; a content-change after the next
        // render pass restores the real height.
        let height = Rc::new(Cell::new(0.0f32));
        let h = Rc::clone(&height);
        let mut tr = MeasuredTransition::new(move || h.get());

        assert_eq!(tr.sync(true).height, 0.0);
        height.set(200.0);
        tr.mark_content_changed();
        assert_eq!(tr.sync(true).height, 200.0);
    }

    #[test]
    fn instant_motion_is_always_settled() {
        let mut tr = MeasuredTransition::with_motion(|| 10.0, Motion::instant());
        tr.sync(true);
        assert!(tr.is_visually_settled(Instant::now()));
        assert_eq!(tr.progress(Instant::now()), 1.0);
    }

    #[test]
    fn sync_retargets_the_clock() {
        let mut tr = MeasuredTransition::with_motion(|| 10.0, Motion::accordion());
        tr.sync(true);
        assert!(!tr.is_visually_settled(Instant::now()));
        // Retarget mid-animation: new target, clock restarts, nothing queues.
        tr.sync(false);
        assert_eq!(tr.geometry(), PanelGeometry::collapsed());
        assert!(!tr.is_visually_settled(Instant::now()));
    }

    #[test]
    fn easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0, "progress clamps past the end");
        }
    }

    #[test]
    fn motion_presets() {
        assert_eq!(Motion::accordion().duration, Duration::from_millis(200));
        assert_eq!(Motion::menu_morph().duration, Duration::from_millis(300));
        assert_eq!(Motion::drawer().duration, Duration::from_millis(500));
        assert!(Motion::instant().duration.is_zero());
    }
}
