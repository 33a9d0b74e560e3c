//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::camera;
use super::collision::{is_landing_approach, landing_probe, swept_collision};
use super::generator::maintain_platforms;
use super::state::{GamePhase, GameState, score_for_height};
use super::vector::apply_gravity;
use crate::consts::*;

/// Raw key state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Advance the game state by one `SIM_DT` step
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    let dt = SIM_DT;
    state.ticks += 1;

    // Horizontal input, then gravity
    let vel = state.input.apply(state.player.vel, input.left, input.right, dt);
    state.player.vel = apply_gravity(vel, GRAVITY, dt);

    let mut prev_pos = state.player.pos;
    state.player.pos += state.player.vel * dt;

    // Wrap around screen horizontally; prev_pos moves with it so the swept
    // segment stays the real one-tick motion
    let radius = state.player.radius;
    let unwrapped_x = state.player.pos.x;
    if unwrapped_x < -radius {
        state.player.pos.x = GAME_WIDTH + radius;
    } else if unwrapped_x > GAME_WIDTH + radius {
        state.player.pos.x = -radius;
    }
    prev_pos.x += state.player.pos.x - unwrapped_x;

    resolve_landing(state, prev_pos);

    state.camera = camera::follow(state.camera, state.player.pos.y);

    if state.player.pos.y < state.highest_y {
        state.highest_y = state.player.pos.y;
        state.score = score_for_height(state.highest_y);
    }

    if state.player.pos.y > state.camera.y + GAME_HEIGHT + OVERSHOOT_MARGIN {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks: score {} (seed {})",
            state.ticks,
            state.score,
            state.seed
        );
    }

    maintain_platforms(&mut state.platforms, state.camera.y, &mut state.rng);
}

/// Bounce off the first platform (in collection order) the player lands on
fn resolve_landing(state: &mut GameState, prev_pos: Vec2) {
    let player = &mut state.player;
    if player.vel.y <= 0.0 {
        return;
    }

    // Widen the search window with fall speed so fast drops still find a platform
    let window = ((player.vel.y * SIM_DT).abs() + 10.0).max(20.0);

    for platform in &state.platforms {
        if (platform.pos.y - player.pos.y).abs() > window {
            continue;
        }
        let rect = platform.as_rect();
        if !swept_collision(prev_pos, player.pos, player.radius, &rect) {
            continue;
        }
        let probe = landing_probe(prev_pos, player.pos, &rect);
        if is_landing_approach(probe, player.vel.y, &rect) {
            player.vel.y = platform.launch_velocity();
            log::trace!(
                "Landed at ({:.1}, {:.1}) boost {} -> vy {}",
                player.pos.x,
                platform.pos.y,
                platform.boost,
                player.vel.y
            );
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::generator::prune_limit;
    use crate::sim::state::{Platform, Player};
    use proptest::prelude::*;

    /// Far-off platform that keeps the frontier ahead of the camera
    fn sentinel() -> Platform {
        Platform::new(0.0, -10_000.0, 0)
    }

    fn floor() -> Platform {
        Platform {
            pos: Vec2::new(-10.0, PLAYER_START_Y + 5.0),
            width: GAME_WIDTH + 20.0,
            height: PLATFORM_HEIGHT,
            boost: 0,
        }
    }

    fn player_at(x: f32, y: f32, vel: Vec2) -> Player {
        Player {
            pos: Vec2::new(x, y),
            vel,
            ..Default::default()
        }
    }

    /// Step with no input until the player starts rising
    fn run_until_bounce(state: &mut GameState, max_ticks: usize) -> Option<usize> {
        (1..=max_ticks).find(|_| {
            state.step(false, false);
            state.player().vel.y < 0.0
        })
    }

    #[test]
    fn test_rest_on_seed_platform_then_bounce() {
        let mut state = GameState::new(2024);
        let seed_top = state.platforms()[0].pos.y;

        state.step(false, false);
        assert!(state.player().pos.y < seed_top);
        assert!(!state.is_game_over());

        let bounced = run_until_bounce(&mut state, 60);
        assert!(bounced.is_some(), "player never bounced off the seed platform");
        assert_eq!(state.player().vel.y, JUMP_SPEED);
        assert!(state.player().pos.y <= seed_top);
    }

    #[test]
    fn test_game_over_on_exact_tick_and_frozen() {
        let player = player_at(40.0, 136.0, Vec2::new(0.0, 200.0));
        let mut state = GameState::with_platforms(9, player, Vec::new());

        state.step(false, false);
        assert!(!state.is_game_over());
        assert!(state.player().pos.y <= state.camera().y + GAME_HEIGHT + OVERSHOOT_MARGIN);

        state.step(false, false);
        assert!(state.is_game_over());
        assert!(state.player().pos.y > state.camera().y + GAME_HEIGHT + OVERSHOOT_MARGIN);

        let frozen = state.clone();
        for i in 0..30 {
            state.step(i % 2 == 0, i % 3 == 0);
        }
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_boost_adds_exact_velocity() {
        let land = |boost: u32| {
            let player = player_at(16.0, 47.0, Vec2::new(0.0, 30.0));
            let platforms = vec![Platform::new(10.0, 50.0, boost), sentinel()];
            let mut state = GameState::with_platforms(1, player, platforms);
            let ticks = run_until_bounce(&mut state, 30).expect("no landing");
            (ticks, state.player().vel.y)
        };

        let (plain_ticks, plain) = land(0);
        let (boost_ticks, boosted) = land(5);
        assert_eq!(plain_ticks, boost_ticks);
        assert_eq!(plain, JUMP_SPEED);
        assert_eq!(boosted, plain - 5.0 * BOOST_VELOCITY_PER_UNIT);
    }

    #[test]
    fn test_first_platform_wins_ties() {
        let run = |platforms: Vec<Platform>| {
            let player = player_at(16.0, 47.0, Vec2::new(0.0, 30.0));
            let mut state = GameState::with_platforms(1, player, platforms);
            run_until_bounce(&mut state, 30).expect("no landing");
            state.player().vel.y
        };

        let boosted = Platform::new(10.0, 50.0, 3);
        let plain = Platform::new(10.0, 50.0, 0);
        assert_eq!(run(vec![boosted, plain, sentinel()]), boosted.launch_velocity());
        assert_eq!(run(vec![plain, boosted, sentinel()]), JUMP_SPEED);
    }

    #[test]
    fn test_fast_fall_does_not_tunnel() {
        // ~15 units per tick against a 2 unit thick platform
        let player = player_at(16.0, 40.0, Vec2::new(0.0, 900.0));
        let platforms = vec![Platform::new(10.0, 48.0, 0), sentinel()];
        let mut state = GameState::with_platforms(1, player, platforms);

        state.step(false, false);
        assert!(state.player().pos.y > 50.0, "test setup should skip past the platform");
        assert_eq!(state.player().vel.y, JUMP_SPEED);
    }

    #[test]
    fn test_side_contact_is_not_a_landing() {
        // Brushing the left edge, already below the top surface
        let player = player_at(8.8, 51.0, Vec2::new(30.0, 1.0));
        let platforms = vec![Platform::new(10.0, 50.0, 0), sentinel()];
        let mut state = GameState::with_platforms(1, player, platforms);

        state.step(false, false);
        assert!(state.player().vel.y > 0.0);
    }

    #[test]
    fn test_release_keeps_direction_through_grace() {
        let player = player_at(40.0, PLAYER_START_Y, Vec2::ZERO);
        let mut state = GameState::with_platforms(3, player, vec![floor(), sentinel()]);

        state.step(true, false);
        let mut prev_vx = state.player().vel.x;
        assert!(prev_vx <= -INITIAL_MOVE_SPEED);

        for n in 1..=400u32 {
            state.step(false, false);
            let vx = state.player().vel.x;
            assert!(vx <= 0.0, "direction reversed on tick {n}");
            if n < INPUT_GRACE_FRAMES {
                assert!(vx < prev_vx, "grace tick {n} should still accelerate");
            } else {
                assert!(vx >= prev_vx, "tick {n} should only decelerate");
            }
            prev_vx = vx;
        }
        assert!(!state.is_game_over());
        assert_eq!(state.player().vel.x, 0.0);
    }

    #[test]
    fn test_horizontal_wrap() {
        let player = player_at(-1.4, 60.0, Vec2::new(-30.0, 0.0));
        let mut state = GameState::with_platforms(1, player, vec![sentinel()]);
        state.step(false, false);
        assert_eq!(state.player().pos.x, GAME_WIDTH + state.player().radius);

        let player = player_at(GAME_WIDTH + 1.4, 60.0, Vec2::new(30.0, 0.0));
        let mut state = GameState::with_platforms(1, player, vec![sentinel()]);
        state.step(false, false);
        assert_eq!(state.player().pos.x, -state.player().radius);
    }

    #[test]
    fn test_wrap_tick_ignores_platform_across_screen() {
        // Falling onto a platform's height while wrapping off the left edge
        let player = player_at(-1.4, 49.0, Vec2::new(-30.0, 117.5));
        let platforms = vec![Platform::new(34.0, 50.0, 0), sentinel()];
        let mut state = GameState::with_platforms(1, player, platforms);

        state.step(false, false);
        assert_eq!(state.player().pos.x, GAME_WIDTH + state.player().radius);
        assert!(state.player().vel.y > 0.0, "landed on a platform 40 units away");
    }

    #[test]
    fn test_wrap_tick_still_lands_under_player() {
        let player = player_at(-1.4, 49.0, Vec2::new(-30.0, 117.5));
        let wide = Platform {
            pos: Vec2::new(-10.0, 50.0),
            width: GAME_WIDTH + 20.0,
            height: PLATFORM_HEIGHT,
            boost: 0,
        };
        let mut state = GameState::with_platforms(1, player, vec![wide, sentinel()]);

        state.step(false, false);
        assert_eq!(state.player().pos.x, GAME_WIDTH + state.player().radius);
        assert_eq!(state.player().vel.y, JUMP_SPEED);
    }

    #[test]
    fn test_score_tracks_climb() {
        let player = player_at(40.0, PLAYER_START_Y, Vec2::new(0.0, -300.0));
        let mut state = GameState::with_platforms(1, player, vec![sentinel()]);
        for _ in 0..30 {
            state.step(false, false);
        }
        assert!(state.highest_y() < PLAYER_START_Y - 50.0);
        assert_eq!(state.score(), score_for_height(state.highest_y()));
        assert!(state.score() >= 5);
        assert!(state.camera().y < 0.0);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput { left: true, right: false },
            TickInput::default(),
            TickInput { left: false, right: true },
            TickInput::default(),
        ];

        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        for input in inputs.iter().cycle().take(2000) {
            tick(&mut state1, input);
            tick(&mut state2, input);
        }
        assert_eq!(state1, state2);
    }

    proptest! {
        #[test]
        fn prop_monotonic_progress(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(any::<(bool, bool)>(), 1..400),
        ) {
            let mut state = GameState::new(seed);
            for (left, right) in inputs {
                let camera_before = state.camera().y;
                let highest_before = state.highest_y();
                let score_before = state.score();

                state.step(left, right);

                prop_assert!(state.camera().y <= camera_before);
                prop_assert!(state.highest_y() <= highest_before);
                prop_assert!(state.score() >= score_before);
                prop_assert_eq!(state.score(), score_for_height(state.highest_y()));
                let limit = prune_limit(state.camera().y);
                prop_assert!(state.platforms().iter().all(|p| p.pos.y <= limit));
            }
        }
    }
}
