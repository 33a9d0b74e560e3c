//! Bean Jump - A vertically scrolling platform jumper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, generation, game state)
//! - `session`: Host-facing adapter (input latch, restart, leaderboard)
//! - `highscores`: In-memory session leaderboard

pub mod highscores;
pub mod session;
pub mod sim;

pub use highscores::HighScores;
pub use session::{KeyCommand, Session};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// World dimensions (y grows downward)
    pub const GAME_WIDTH: f32 = 80.0;
    pub const GAME_HEIGHT: f32 = 120.0;

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 150.0;
    /// Vertical velocity applied on landing (negative is up)
    pub const JUMP_SPEED: f32 = -100.0;
    /// Extra upward velocity per boost unit
    pub const BOOST_VELOCITY_PER_UNIT: f32 = 35.0;

    /// Horizontal speed snapped to on a real key press
    pub const INITIAL_MOVE_SPEED: f32 = 20.0;
    /// Horizontal acceleration while a direction is effectively held
    pub const MOVE_ACCELERATION: f32 = 120.0;
    /// Horizontal speed cap
    pub const MAX_MOVE_SPEED: f32 = 40.0;
    /// Horizontal deceleration when no direction is held
    pub const AIR_FRICTION: f32 = 20.0;

    /// Frames a direction stays active after its key was last seen
    pub const INPUT_GRACE_FRAMES: u32 = 8;
    /// Per-tick momentum multiplier while no key is pressed
    pub const MOMENTUM_DECAY: f32 = 0.85;
    /// Momentum at or below this no longer sustains grace movement
    pub const MOMENTUM_FLOOR: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 1.5;
    pub const PLAYER_START_X: f32 = GAME_WIDTH / 2.0;
    pub const PLAYER_START_Y: f32 = GAME_HEIGHT - 10.0;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 12.0;
    pub const PLATFORM_HEIGHT: f32 = 2.0;

    /// Vertical spacing between consecutively generated platforms
    pub const MIN_VERTICAL_GAP: f32 = 10.0;
    pub const MAX_VERTICAL_GAP: f32 = 20.0;
    /// Widest horizontal centre-to-centre gap the player can cross in one jump
    pub const MAX_HORIZONTAL_GAP: f32 = 30.0;
    /// Fallback placement stays within this fraction of MAX_HORIZONTAL_GAP
    pub const FALLBACK_OFFSET_FACTOR: f32 = 0.7;
    /// Platforms created per generation batch
    pub const PLATFORM_BATCH: usize = 5;
    /// Candidate x positions tried before falling back
    pub const PLACEMENT_ATTEMPTS: u32 = 10;
    /// Generate once the frontier is closer than this many max gaps above the camera
    pub const FRONTIER_LOOKAHEAD_GAPS: f32 = 5.0;

    /// Height of the band above a platform top that counts as "about to land"
    pub const LANDING_BAND_HEIGHT: f32 = 5.0;
    /// Platforms further than this below the view bottom are dropped
    pub const PRUNE_MARGIN: f32 = 50.0;
    /// Falling this far below the view bottom ends the run
    pub const OVERSHOOT_MARGIN: f32 = 20.0;
    /// World units of climb per score point
    pub const SCORE_DIVISOR: f32 = 10.0;

    /// Boost odds start at 1 in BOOST_BASE_ODDS...
    pub const BOOST_BASE_ODDS: u32 = 8;
    /// ...and grow by one per this much altitude
    pub const BOOST_ODDS_ALTITUDE_STEP: f32 = 400.0;
    /// Rate of the exponential boost magnitude distribution
    pub const BOOST_RATE: f32 = 0.9;
    /// Largest boost magnitude
    pub const BOOST_MAX: u32 = 5;
}

/// Horizontal distance between two x coordinates on a wrapping screen
#[inline]
pub fn wrap_distance(a: f32, b: f32, width: f32) -> f32 {
    let direct = (a - b).abs();
    direct.min(width - direct)
}
