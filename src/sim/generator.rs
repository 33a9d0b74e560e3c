//! Procedural platform generation and pruning
//!
//! Platforms are laid out in batches above the current frontier. Each new
//! platform is placed relative to its predecessor so that it stays within
//! jumping reach, counting the shortcut through the screen wrap.

use rand::Rng;

use super::state::Platform;
use crate::consts::*;
use crate::wrap_distance;

/// Whether the frontier is close enough to the camera to need more platforms
#[inline]
pub fn needs_extension(frontier_y: f32, camera_y: f32) -> bool {
    frontier_y > camera_y - MAX_VERTICAL_GAP * FRONTIER_LOOKAHEAD_GAPS
}

/// y beyond which platforms are dropped
#[inline]
pub fn prune_limit(camera_y: f32) -> f32 {
    camera_y + GAME_HEIGHT + PRUNE_MARGIN
}

/// Drop platforms far below the view; returns how many were removed
pub fn prune_platforms(platforms: &mut Vec<Platform>, camera_y: f32) -> usize {
    let limit = prune_limit(camera_y);
    let before = platforms.len();
    platforms.retain(|p| p.pos.y <= limit);
    before - platforms.len()
}

/// Sample a horizontal position reachable from `prev`
///
/// Tries `PLACEMENT_ATTEMPTS` uniform candidates first, then falls back to a
/// bounded offset from `prev` clamped to the screen.
pub fn reachable_x(prev: &Platform, rng: &mut impl Rng) -> f32 {
    let max_x = GAME_WIDTH - PLATFORM_WIDTH;
    let prev_center = prev.center_x();

    for _ in 0..PLACEMENT_ATTEMPTS {
        let x = rng.random_range(0.0..=max_x);
        if wrap_distance(x + PLATFORM_WIDTH / 2.0, prev_center, GAME_WIDTH) <= MAX_HORIZONTAL_GAP {
            return x;
        }
    }

    fallback_x(prev, rng)
}

/// Placement used once every uniform candidate was rejected
///
/// Offsets `prev` by at most `FALLBACK_OFFSET_FACTOR * MAX_HORIZONTAL_GAP`,
/// clamped so the platform stays on screen.
pub fn fallback_x(prev: &Platform, rng: &mut impl Rng) -> f32 {
    let reach = MAX_HORIZONTAL_GAP * FALLBACK_OFFSET_FACTOR;
    let offset = rng.random_range(-reach..=reach);
    (prev.pos.x + offset).clamp(0.0, GAME_WIDTH - PLATFORM_WIDTH)
}

/// Roll the boost strength for a platform at height `y`
///
/// Odds of any boost start at 1 in `BOOST_BASE_ODDS` and thin out with
/// altitude. Magnitudes follow a floored exponential starting at 1.
pub fn roll_boost(y: f32, rng: &mut impl Rng) -> u32 {
    let altitude = (PLAYER_START_Y - y).max(0.0);
    let odds = BOOST_BASE_ODDS + (altitude / BOOST_ODDS_ALTITUDE_STEP) as u32;
    if !rng.random_ratio(1, odds) {
        return 0;
    }

    let u: f32 = rng.random();
    let sample = -(1.0 - u).ln() / BOOST_RATE;
    (1 + sample.floor() as u32).min(BOOST_MAX)
}

/// Place the platform that follows `prev`
pub fn next_platform(prev: &Platform, rng: &mut impl Rng) -> Platform {
    let gap = rng.random_range(MIN_VERTICAL_GAP..=MAX_VERTICAL_GAP);
    let y = prev.pos.y - gap;
    let x = reachable_x(prev, rng);
    let boost = roll_boost(y, rng);
    Platform::new(x, y, boost)
}

/// Generate `count` platforms chained upward from `from`
pub fn generate_platforms(count: usize, from: &Platform, rng: &mut impl Rng) -> Vec<Platform> {
    let mut out = Vec::with_capacity(count);
    let mut prev = *from;
    for _ in 0..count {
        let next = next_platform(&prev, rng);
        out.push(next);
        prev = next;
    }
    out
}

/// Highest platform, first in collection order on ties
pub fn frontier(platforms: &[Platform]) -> Option<&Platform> {
    platforms.iter().min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
}

/// Prune below the view, then extend above until the frontier is far enough ahead
pub fn maintain_platforms(platforms: &mut Vec<Platform>, camera_y: f32, rng: &mut impl Rng) {
    let pruned = prune_platforms(platforms, camera_y);
    if pruned > 0 {
        log::debug!("Pruned {} platforms below y={}", pruned, prune_limit(camera_y));
    }

    loop {
        let anchor = match frontier(platforms) {
            Some(top) => *top,
            // Nothing left to build from; restart one view below the camera
            None => Platform::new(
                (GAME_WIDTH - PLATFORM_WIDTH) / 2.0,
                camera_y + GAME_HEIGHT,
                0,
            ),
        };
        if !platforms.is_empty() && !needs_extension(anchor.pos.y, camera_y) {
            break;
        }

        let batch = generate_platforms(PLATFORM_BATCH, &anchor, rng);
        log::debug!(
            "Generated {} platforms above y={} (boosts: {})",
            batch.len(),
            anchor.pos.y,
            batch.iter().filter(|p| p.boost > 0).count()
        );
        platforms.extend(batch);
    }
}
