//! Input smoothing for horizontal movement
//!
//! Terminals deliver key repeats with gaps, so a held key looks like a
//! stutter of presses and releases. Each direction keeps a frame counter
//! since its last press and the pair shares a decaying momentum value;
//! together they keep a direction "effectively pressed" across short gaps.

use glam::Vec2;

use super::vector::apply_friction;
use crate::consts::*;

/// Per-direction timers plus shared momentum
#[derive(Debug, Clone, PartialEq)]
pub struct InputSmoother {
    /// Frames since left was last pressed
    pub left_timer: u32,
    /// Frames since right was last pressed
    pub right_timer: u32,
    /// 1.0 on any press, decays while idle
    pub momentum: f32,
}

impl Default for InputSmoother {
    fn default() -> Self {
        // Timers start expired so a fresh game has no grace movement
        Self {
            left_timer: INPUT_GRACE_FRAMES,
            right_timer: INPUT_GRACE_FRAMES,
            momentum: 0.0,
        }
    }
}

/// Which directions count as held this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectiveInput {
    pub left: bool,
    pub right: bool,
}

impl InputSmoother {
    /// Advance timers and momentum by one tick and report effective directions
    pub fn advance(&mut self, left: bool, right: bool) -> EffectiveInput {
        if left {
            self.left_timer = 0;
            self.momentum = 1.0;
        } else {
            self.left_timer = self.left_timer.saturating_add(1);
        }

        if right {
            self.right_timer = 0;
            self.momentum = 1.0;
        } else {
            self.right_timer = self.right_timer.saturating_add(1);
        }

        let effective = EffectiveInput {
            left: left || self.in_grace(self.left_timer),
            right: right || self.in_grace(self.right_timer),
        };

        if !left && !right {
            self.momentum *= MOMENTUM_DECAY;
        }

        effective
    }

    #[inline]
    fn in_grace(&self, timer: u32) -> bool {
        timer < INPUT_GRACE_FRAMES && self.momentum > MOMENTUM_FLOOR
    }

    /// Run one tick of smoothing and return the updated velocity
    ///
    /// Only `velocity.x` is affected. A real press snaps speed up to at least
    /// `INITIAL_MOVE_SPEED`; grace frames only accelerate. With no effective
    /// direction, air friction applies instead.
    pub fn apply(&mut self, velocity: Vec2, left: bool, right: bool, dt: f32) -> Vec2 {
        let effective = self.advance(left, right);
        let mut vel = velocity;

        if effective.left {
            if left {
                vel.x = vel.x.min(-INITIAL_MOVE_SPEED);
            }
            vel.x = (vel.x - MOVE_ACCELERATION * dt).max(-MAX_MOVE_SPEED);
        }
        if effective.right {
            if right {
                vel.x = vel.x.max(INITIAL_MOVE_SPEED);
            }
            vel.x = (vel.x + MOVE_ACCELERATION * dt).min(MAX_MOVE_SPEED);
        }
        if !effective.left && !effective.right {
            vel = apply_friction(vel, AIR_FRICTION, dt);
        }

        vel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = SIM_DT;

    #[test]
    fn test_fresh_smoother_is_idle() {
        let mut smoother = InputSmoother::default();
        let effective = smoother.advance(false, false);
        assert_eq!(effective, EffectiveInput::default());
    }

    #[test]
    fn test_press_applies_initial_boost() {
        let mut smoother = InputSmoother::default();
        let vel = smoother.apply(Vec2::ZERO, false, true, DT);
        let expected = INITIAL_MOVE_SPEED + MOVE_ACCELERATION * DT;
        assert!((vel.x - expected).abs() < 1e-4);
        assert_eq!(smoother.right_timer, 0);
        assert_eq!(smoother.momentum, 1.0);
    }

    #[test]
    fn test_speed_is_capped() {
        let mut smoother = InputSmoother::default();
        let mut vel = Vec2::ZERO;
        for _ in 0..600 {
            vel = smoother.apply(vel, true, false, DT);
            assert!(vel.x >= -MAX_MOVE_SPEED);
        }
        assert_eq!(vel.x, -MAX_MOVE_SPEED);
    }

    #[test]
    fn test_grace_keeps_direction_then_expires() {
        let mut smoother = InputSmoother::default();
        smoother.advance(true, false);

        for frame in 1..INPUT_GRACE_FRAMES {
            let effective = smoother.advance(false, false);
            assert!(effective.left, "frame {frame} should still be in grace");
            assert!(!effective.right);
        }
        let effective = smoother.advance(false, false);
        assert!(!effective.left);
    }

    #[test]
    fn test_grace_does_not_boost() {
        let mut smoother = InputSmoother::default();
        let vel = smoother.apply(Vec2::new(-5.0, 0.0), true, false, DT);
        // Already past initial speed from the press
        let after_grace = smoother.apply(Vec2::new(-5.0, 0.0), false, false, DT);
        assert!(vel.x <= -INITIAL_MOVE_SPEED);
        assert!((after_grace.x - (-5.0 - MOVE_ACCELERATION * DT)).abs() < 1e-4);
    }

    #[test]
    fn test_momentum_decays_only_when_idle() {
        let mut smoother = InputSmoother::default();
        smoother.advance(true, false);
        smoother.advance(true, false);
        assert_eq!(smoother.momentum, 1.0);

        smoother.advance(false, false);
        assert!((smoother.momentum - MOMENTUM_DECAY).abs() < 1e-6);
        smoother.advance(false, false);
        assert!((smoother.momentum - MOMENTUM_DECAY * MOMENTUM_DECAY).abs() < 1e-6);
    }

    #[test]
    fn test_low_momentum_cancels_grace() {
        let mut smoother = InputSmoother {
            left_timer: 0,
            right_timer: INPUT_GRACE_FRAMES,
            momentum: MOMENTUM_FLOOR,
        };
        let effective = smoother.advance(false, false);
        assert!(!effective.left);
    }

    #[test]
    fn test_friction_when_idle() {
        let mut smoother = InputSmoother::default();
        let vel = smoother.apply(Vec2::new(10.0, 3.0), false, false, DT);
        assert!((vel.x - (10.0 - AIR_FRICTION * DT)).abs() < 1e-4);
        assert_eq!(vel.y, 3.0);
    }

    #[test]
    fn test_timers_saturate() {
        let mut smoother = InputSmoother {
            left_timer: u32::MAX,
            right_timer: u32::MAX,
            momentum: 0.0,
        };
        smoother.advance(false, false);
        assert_eq!(smoother.left_timer, u32::MAX);
    }
}
