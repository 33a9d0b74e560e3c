//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the game state
//! - Stable iteration order (platform insertion order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod generator;
pub mod input;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{Circle, Rect, circle_rect_overlap, is_landing_approach, swept_collision};
pub use generator::{generate_platforms, maintain_platforms, prune_platforms};
pub use input::{EffectiveInput, InputSmoother};
pub use state::{GamePhase, GameSnapshot, GameState, Platform, Player, score_for_height};
pub use tick::{TickInput, tick};
pub use vector::{apply_friction, apply_gravity, blend};
