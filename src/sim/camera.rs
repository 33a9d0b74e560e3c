//! One-directional follow camera

use glam::Vec2;

use crate::consts::GAME_HEIGHT;

/// Raise the camera so the player sits at mid-screen; never lowers it
#[inline]
pub fn follow(camera: Vec2, player_y: f32) -> Vec2 {
    Vec2::new(camera.x, camera.y.min(player_y - GAME_HEIGHT / 2.0))
}
