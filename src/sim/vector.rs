//! Pure velocity helpers
//!
//! All functions take and return values; nothing here mutates state.

use glam::Vec2;

/// Accelerate vertically by `gravity * dt`
#[inline]
pub fn apply_gravity(velocity: Vec2, gravity: f32, dt: f32) -> Vec2 {
    Vec2::new(velocity.x, velocity.y + gravity * dt)
}

/// Pull horizontal speed toward zero by `friction * dt`, never past it
pub fn apply_friction(velocity: Vec2, friction: f32, dt: f32) -> Vec2 {
    if friction <= 0.0 {
        return velocity;
    }
    let force = friction * dt;
    let x = if velocity.x >= 0.0 {
        (velocity.x - force).max(0.0)
    } else {
        (velocity.x + force).min(0.0)
    };
    Vec2::new(x, velocity.y)
}

/// Weighted mix of two vectors: `t = 1` yields `a`, `t = 0` yields `b`
///
/// `t` is clamped to [0, 1].
#[inline]
pub fn blend(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    let t = t.clamp(0.0, 1.0);
    a * t + b * (1.0 - t)
}
