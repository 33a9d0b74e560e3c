//! Collision detection between the player circle and platform rectangles
//!
//! The tricky part of Bean Jump: a player falling fast enough moves further
//! than a platform is thick in a single tick, so plain overlap sampling lets
//! it slip straight through. The swept test below closes that gap without
//! substepping the integrator.

use glam::Vec2;

use crate::consts::{GAME_WIDTH, LANDING_BAND_HEIGHT};

/// Axis-aligned rectangle, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Closest point inside the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.x, self.right()), p.y.clamp(self.y, self.bottom()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Exact circle/rectangle overlap (touching counts)
pub fn circle_rect_overlap(circle: Circle, rect: &Rect) -> bool {
    let closest = rect.closest_point(circle.center);
    circle.center.distance_squared(closest) <= circle.radius * circle.radius
}

/// Whether a player at `pos` is coming down onto the top of `rect`
///
/// Requires falling, horizontal containment, and a position inside the thin
/// band just above the top edge. Side and underside contacts fail this test.
pub fn is_landing_approach(pos: Vec2, vel_y: f32, rect: &Rect) -> bool {
    if vel_y <= 0.0 {
        return false;
    }
    if pos.x < rect.x || pos.x > rect.right() {
        return false;
    }
    pos.y <= rect.y && pos.y >= rect.y - LANDING_BAND_HEIGHT
}

/// Where a downward segment from `prev` to `curr` crosses the top edge of `rect`
///
/// Returns `None` unless the segment moves down and straddles the edge.
pub fn top_edge_crossing(prev: Vec2, curr: Vec2, rect: &Rect) -> Option<Vec2> {
    let dy = curr.y - prev.y;
    if dy <= 0.0 {
        return None;
    }
    let t = (rect.y - prev.y) / dy;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    Some(Vec2::new(prev.x + (curr.x - prev.x) * t, rect.y))
}

/// Continuous overlap test over one tick of motion
///
/// Hits if either endpoint overlaps; otherwise, for downward motion, hits if
/// the path crosses the top edge within `radius` of the rectangle's span.
pub fn swept_collision(prev: Vec2, curr: Vec2, radius: f32, rect: &Rect) -> bool {
    if circle_rect_overlap(Circle::new(prev, radius), rect)
        || circle_rect_overlap(Circle::new(curr, radius), rect)
    {
        return true;
    }

    match top_edge_crossing(prev, curr, rect) {
        Some(crossing) => crossing.x >= rect.x - radius && crossing.x <= rect.right() + radius,
        None => false,
    }
}

/// Position to run the landing approach test against
///
/// Normally the post-tick position. When the tick carried the player below
/// the top edge, the crossing point stands in for it.
///
/// `prev` and `curr` must describe unwrapped motion: after a screen wrap the
/// caller shifts `prev` by the same offset, otherwise the crossing point lands
/// somewhere along a segment spanning the whole screen.
pub fn landing_probe(prev: Vec2, curr: Vec2, rect: &Rect) -> Vec2 {
    debug_assert!(
        (curr.x - prev.x).abs() < GAME_WIDTH / 2.0,
        "landing test over a wrapped segment: {prev} -> {curr}"
    );
    if curr.y <= rect.y {
        return curr;
    }
    top_edge_crossing(prev, curr, rect).unwrap_or(curr)
}
