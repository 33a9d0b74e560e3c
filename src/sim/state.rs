//! Game state and core simulation types
//!
//! The `GameState` aggregate owns every mutable piece of a run, including
//! its random source. Renderers read it through accessors or an owned
//! `GameSnapshot`; only `tick` mutates it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::generator::maintain_platforms;
use super::input::InputSmoother;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; terminal
    GameOver,
}

/// The player's bean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
        }
    }
}

/// A platform; `pos` is its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Extra launch strength; 0 is a plain platform
    pub boost: u32,
}

impl Platform {
    /// Standard-size platform at the given top-left corner
    pub fn new(x: f32, y: f32, boost: u32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width: PLATFORM_WIDTH,
            height: PLATFORM_HEIGHT,
            boost,
        }
    }

    /// The platform directly under the player's starting position
    pub fn seed() -> Self {
        Self::new(
            PLAYER_START_X - PLATFORM_WIDTH / 2.0,
            PLAYER_START_Y + 5.0,
            0,
        )
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Upward launch velocity granted on landing
    pub fn launch_velocity(&self) -> f32 {
        JUMP_SPEED - BOOST_VELOCITY_PER_UNIT * self.boost as f32
    }
}

/// Owned read model for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub camera_y: f32,
    pub score: u32,
    pub game_over: bool,
    pub ticks: u64,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Run seed for reproducibility
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) phase: GamePhase,
    pub(crate) player: Player,
    /// Platforms in insertion order; landing tie-breaks rely on it
    pub(crate) platforms: Vec<Platform>,
    /// View origin; only `y` is used
    pub(crate) camera: Vec2,
    pub(crate) score: u32,
    /// Lowest y the player has reached
    pub(crate) highest_y: f32,
    pub(crate) input: InputSmoother,
    /// Simulation tick counter
    pub(crate) ticks: u64,
}

impl GameState {
    /// Create a new game with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self::with_platforms(seed, Player::default(), vec![Platform::seed()]);
        maintain_platforms(&mut state.platforms, state.camera.y, &mut state.rng);

        log::info!(
            "New game (seed {}): {} platforms, frontier at y={}",
            seed,
            state.platforms.len(),
            state.frontier_y().unwrap_or(GAME_HEIGHT)
        );

        state
    }

    /// Create a new game with a freshly drawn seed
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// Build a state around an explicit layout without generating anything
    pub fn with_platforms(seed: u64, player: Player, platforms: Vec<Platform>) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            player,
            platforms,
            camera: Vec2::ZERO,
            score: 0,
            highest_y: PLAYER_START_Y,
            input: InputSmoother::default(),
            ticks: 0,
        }
    }

    /// Advance one tick with the raw key state
    pub fn step(&mut self, left: bool, right: bool) {
        super::tick::tick(self, &super::tick::TickInput { left, right });
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Camera origin; `y` is the top of the visible window
    pub fn camera(&self) -> Vec2 {
        self.camera
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn highest_y(&self) -> f32 {
        self.highest_y
    }

    pub fn input(&self) -> &InputSmoother {
        &self.input
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// y of the highest (lowest-y) platform, if any
    pub fn frontier_y(&self) -> Option<f32> {
        self.platforms.iter().map(|p| p.pos.y).reduce(f32::min)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            player: self.player,
            platforms: self.platforms.clone(),
            camera_y: self.camera.y,
            score: self.score,
            game_over: self.is_game_over(),
            ticks: self.ticks,
        }
    }
}

/// Score for a given highest point reached
#[inline]
pub fn score_for_height(highest_y: f32) -> u32 {
    ((PLAYER_START_Y - highest_y) / SCORE_DIVISOR).max(0.0) as u32
}
