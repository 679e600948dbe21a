//! Momentum scroll engine
//!
//! Drives the page scroll offset toward a target with a critically damped
//! spring, one step per display frame, and snaps exactly onto the target once
//! the motion has died down.

use tracing::debug;

use super::timing::lerp;
use crate::config::ScrollConfig;

/// Engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    Idle,
    Converging,
}

/// Momentum scroll controller
///
/// Call `scroll_to()` when a target changes, then `step()`
/// once per frame while `is_converging()` and write the returned offset to
/// the page.
#[derive(Debug, Clone)]
pub struct MomentumScroll {
    config: ScrollConfig,
    current: f64,
    target: f64,
    velocity: f64,
    max_offset: f64,
    phase: ScrollPhase,
    /// Frames spent in the current convergence
    frames: u32,
    reduced_motion: bool,
}

impl Default for MomentumScroll {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl MomentumScroll {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            current: 0.0,
            target: 0.0,
            velocity: 0.0,
            max_offset: f64::MAX,
            phase: ScrollPhase::Idle,
            frames: 0,
            reduced_motion: false,
        }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Record the user's reduced-motion preference
    ///
    /// Turning it on mid-scroll lands on the target immediately.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced && self.config.respect_reduced_motion;
        if self.reduced_motion && self.is_converging() {
            self.jump_to(self.target);
        }
    }

    /// Whether targets are approached with momentum rather than a jump
    #[inline]
    pub fn is_smooth(&self) -> bool {
        self.config.smooth_enabled && !self.reduced_motion
    }

    #[inline]
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    #[inline]
    pub fn is_converging(&self) -> bool {
        self.phase == ScrollPhase::Converging
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Set the largest reachable offset (document height minus viewport)
    pub fn set_bounds(&mut self, max_offset: f64) {
        if !max_offset.is_finite() {
            return;
        }
        self.max_offset = max_offset.max(0.0);
        self.target = self.target.min(self.max_offset);
        self.current = self.current.min(self.max_offset);
    }

    /// Adopt an offset the page reached on its own (while idle)
    pub fn sync(&mut self, offset: f64) {
        if self.phase == ScrollPhase::Idle && offset.is_finite() {
            let offset = self.clamp(offset);
            self.current = offset;
            self.target = offset;
        }
    }

    /// Move toward a new target
    ///
    /// A target issued while converging replaces the old one; the running
    /// loop picks it up on its next step and keeps its velocity. Non-finite
    /// targets are ignored.
    pub fn scroll_to(&mut self, target: f64) {
        if !target.is_finite() {
            debug!(offset = target, "Ignoring non-finite scroll target");
            return;
        }
        let target = self.clamp(target);

        if !self.is_smooth() {
            self.jump_to(target);
            return;
        }

        self.target = target;
        if self.phase == ScrollPhase::Idle {
            if target == self.current {
                return;
            }
            self.phase = ScrollPhase::Converging;
            self.velocity = 0.0;
            self.frames = 0;
        }
    }

    /// Single discrete jump, no momentum
    pub fn jump_to(&mut self, target: f64) {
        if !target.is_finite() {
            return;
        }
        let target = self.clamp(target);
        self.current = target;
        self.target = target;
        self.velocity = 0.0;
        self.phase = ScrollPhase::Idle;
        self.frames = 0;
    }

    /// Advance one frame and return the offset to apply
    pub fn step(&mut self) -> f64 {
        if self.phase == ScrollPhase::Idle {
            return self.current;
        }

        self.frames += 1;
        let ease = self.config.ease_factor;
        let distance = self.target - self.current;
        // Critically damped form of velocity = lerp(velocity, distance, ease)
        self.velocity = lerp(self.velocity, distance * ease / 2.0, 2.0 * ease);
        self.current += self.velocity;

        let settled = self.velocity.abs() < self.config.epsilon
            && (self.target - self.current).abs() < self.config.snap_distance;
        if settled || self.frames >= self.config.max_frames {
            if !settled {
                debug!(
                    frames = self.frames,
                    target = self.target,
                    "Momentum scroll hit frame limit, snapping"
                );
            }
            self.current = self.target;
            self.velocity = 0.0;
            self.phase = ScrollPhase::Idle;
        }

        self.current
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_offset)
    }
}

/// Scroll offset that brings an anchor target to `header_offset` below the top
///
/// `element_top` is the element's viewport-relative top edge.
pub fn anchor_target(element_top: f64, scroll_offset: f64, header_offset: f64) -> f64 {
    (element_top + scroll_offset - header_offset).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_idle(engine: &mut MomentumScroll, limit: u32) -> u32 {
        let mut frames = 0;
        while engine.is_converging() && frames < limit {
            engine.step();
            frames += 1;
        }
        frames
    }

    #[test]
    fn test_converges_exactly() {
        let mut engine = MomentumScroll::with_defaults();
        engine.scroll_to(1000.0);
        assert_eq!(engine.phase(), ScrollPhase::Converging);

        let frames = run_to_idle(&mut engine, 1000);
        assert!(frames < 300, "took {} frames", frames);
        assert_eq!(engine.phase(), ScrollPhase::Idle);
        assert_eq!(engine.current(), 1000.0);
        assert_eq!(engine.velocity(), 0.0);
    }

    #[test]
    fn test_no_overshoot_from_rest() {
        let mut engine = MomentumScroll::with_defaults();
        engine.scroll_to(1000.0);
        let mut prev = 0.0;
        while engine.is_converging() {
            let offset = engine.step();
            assert!(offset <= 1000.0);
            assert!(offset >= prev);
            prev = offset;
        }
    }

    #[test]
    fn test_retarget_while_converging() {
        let mut engine = MomentumScroll::with_defaults();
        engine.scroll_to(1000.0);
        for _ in 0..10 {
            engine.step();
        }
        let velocity = engine.velocity();
        engine.scroll_to(400.0);
        assert!(engine.is_converging());
        assert_eq!(engine.target(), 400.0);
        assert_eq!(engine.velocity(), velocity);

        run_to_idle(&mut engine, 1000);
        assert_eq!(engine.current(), 400.0);
    }

    #[test]
    fn test_reduced_motion_jumps() {
        let mut engine = MomentumScroll::with_defaults();
        engine.set_reduced_motion(true);
        engine.scroll_to(750.0);
        assert!(!engine.is_converging());
        assert_eq!(engine.current(), 750.0);
    }

    #[test]
    fn test_reduced_motion_follows_preference_changes() {
        let mut engine = MomentumScroll::with_defaults();
        engine.scroll_to(1000.0);
        engine.step();
        assert!(engine.is_converging());

        engine.set_reduced_motion(true);
        assert!(!engine.is_converging());
        assert_eq!(engine.current(), 1000.0);
        assert_eq!(engine.step(), 1000.0);

        engine.set_reduced_motion(false);
        engine.scroll_to(200.0);
        assert!(engine.is_converging());
    }

    #[test]
    fn test_reduced_motion_ignored_when_disabled() {
        let config = ScrollConfig {
            respect_reduced_motion: false,
            ..Default::default()
        };
        let mut engine = MomentumScroll::new(config);
        engine.set_reduced_motion(true);
        engine.scroll_to(750.0);
        assert!(engine.is_converging());
    }

    #[test]
    fn test_target_clamped_to_bounds() {
        let mut engine = MomentumScroll::with_defaults();
        engine.set_bounds(500.0);
        engine.scroll_to(900.0);
        assert_eq!(engine.target(), 500.0);
        engine.scroll_to(-20.0);
        assert_eq!(engine.target(), 0.0);
    }

    #[test]
    fn test_same_target_stays_idle() {
        let mut engine = MomentumScroll::with_defaults();
        engine.sync(200.0);
        engine.scroll_to(200.0);
        assert!(!engine.is_converging());
    }

    #[test]
    fn test_frame_limit_snaps() {
        let config = ScrollConfig {
            max_frames: 5,
            ..Default::default()
        };
        let mut engine = MomentumScroll::new(config);
        engine.scroll_to(1000.0);
        assert_eq!(run_to_idle(&mut engine, 100), 5);
        assert_eq!(engine.current(), 1000.0);
    }

    #[test]
    fn test_grown_page_reaches_new_bottom() {
        let mut engine = MomentumScroll::with_defaults();
        engine.set_bounds(1200.0);
        engine.scroll_to(2500.0);
        run_to_idle(&mut engine, 1000);
        assert_eq!(engine.current(), 1200.0);

        // Images loaded below the fold; bounds are refreshed before retargeting
        engine.set_bounds(3000.0);
        engine.scroll_to(2500.0);
        assert_eq!(engine.target(), 2500.0);
        run_to_idle(&mut engine, 1000);
        assert_eq!(engine.current(), 2500.0);
        assert!(!engine.is_converging());
    }

    #[test]
    fn test_non_finite_offsets_ignored() {
        let mut engine = MomentumScroll::with_defaults();
        engine.sync(300.0);
        engine.scroll_to(f64::NAN);
        assert!(!engine.is_converging());
        engine.scroll_to(f64::INFINITY);
        engine.jump_to(f64::NEG_INFINITY);
        engine.sync(f64::NAN);
        engine.set_bounds(f64::NAN);
        assert_eq!(engine.current(), 300.0);
        assert_eq!(engine.target(), 300.0);

        engine.scroll_to(900.0);
        run_to_idle(&mut engine, 1000);
        assert_eq!(engine.current(), 900.0);
    }

    #[test]
    fn test_anchor_target() {
        assert_eq!(anchor_target(400.0, 1200.0, 100.0), 1500.0);
        assert_eq!(anchor_target(-50.0, 20.0, 100.0), 0.0);
    }
}
