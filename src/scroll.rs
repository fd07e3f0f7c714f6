//! Scroll position tracking and range fractions.
//!
//! The host viewport reports a normalized scroll offset (0 at the top of the
//! virtual page stack, 1 at the bottom). Momentum scrolling can push the raw
//! value outside [0, 1]; consumers that need a bounded value go through
//! [`ScrollState::range`], which always clamps.

/// Normalized scroll position for one rendered frame.
///
/// Recomputed every frame from the scroll container; carries no state beyond
/// the current offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    offset: f32,
}

impl ScrollState {
    pub fn new(offset: f32) -> Self {
        Self { offset }
    }

    /// Raw offset as reported by the viewport. May lie outside [0, 1]
    /// during overscroll.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Progress through the window `[start, start + length]`, clamped to
    /// [0, 1] regardless of the raw offset.
    ///
    /// A non-positive `length` degenerates to a step at `start`.
    pub fn range(&self, start: f32, length: f32) -> f32 {
        if length <= 0.0 {
            return if self.offset < start { 0.0 } else { 1.0 };
        }
        ((self.offset - start) / length).clamp(0.0, 1.0)
    }
}

/// Smooths a raw scroll target toward the offset the scene animates with.
///
/// The viewport hands us instantaneous scroll positions; the scene follows
/// them through an exponential lag so wheel steps read as glides. `damping`
/// is the time constant in seconds; zero snaps to the target immediately.
#[derive(Clone, Debug)]
pub struct ScrollTracker {
    target: f32,
    offset: f32,
    damping: f32,
}

impl ScrollTracker {
    pub fn new(damping: f32) -> Self {
        Self {
            target: 0.0,
            offset: 0.0,
            damping: damping.max(0.0),
        }
    }

    /// Set the raw target offset from the viewport. Not clamped.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Advance the smoothed offset by `dt` seconds and return the frame's
    /// [`ScrollState`].
    pub fn advance(&mut self, dt: f32) -> ScrollState {
        if self.damping <= f32::EPSILON || dt <= 0.0 {
            self.offset = self.target;
        } else {
            let blend = 1.0 - (-dt / self.damping).exp();
            self.offset += (self.target - self.offset) * blend;
        }
        ScrollState::new(self.offset)
    }

    /// The smoothed offset from the most recent [`advance`](Self::advance).
    pub fn offset(&self) -> f32 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_fraction_within_window() {
        // Hero window [0, 0.33]: endpoints and midpoint.
        assert_eq!(ScrollState::new(0.0).range(0.0, 0.33), 0.0);
        let mid = ScrollState::new(0.165).range(0.0, 0.33);
        assert!((mid - 0.5).abs() < 1e-6);
        assert_eq!(ScrollState::new(0.33).range(0.0, 0.33), 1.0);
    }

    #[test]
    fn test_range_fraction_clamps_outside_window() {
        let state = ScrollState::new(0.9);
        assert_eq!(state.range(0.0, 0.33), 1.0);
        assert_eq!(state.range(0.95, 0.05), 0.0);
    }

    #[test]
    fn test_range_fraction_clamps_overscroll() {
        // Momentum bounce beyond the nominal domain must still clamp.
        assert_eq!(ScrollState::new(-0.25).range(0.0, 0.33), 0.0);
        assert_eq!(ScrollState::new(1.4).range(0.66, 0.34), 1.0);
    }

    #[test]
    fn test_degenerate_length_is_a_step() {
        assert_eq!(ScrollState::new(0.1).range(0.5, 0.0), 0.0);
        assert_eq!(ScrollState::new(0.6).range(0.5, 0.0), 1.0);
    }

    #[test]
    fn test_tracker_converges_to_target() {
        let mut tracker = ScrollTracker::new(0.2);
        tracker.set_target(1.0);
        for _ in 0..300 {
            tracker.advance(1.0 / 60.0);
        }
        assert!((tracker.offset() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_tracker_zero_damping_snaps() {
        let mut tracker = ScrollTracker::new(0.0);
        tracker.set_target(0.7);
        let state = tracker.advance(1.0 / 60.0);
        assert_eq!(state.offset(), 0.7);
    }

    #[test]
    fn test_tracker_never_overshoots() {
        let mut tracker = ScrollTracker::new(0.2);
        tracker.set_target(1.0);
        let mut prev = 0.0;
        for _ in 0..120 {
            let offset = tracker.advance(1.0 / 60.0).offset();
            assert!(offset >= prev && offset <= 1.0);
            prev = offset;
        }
    }
}
