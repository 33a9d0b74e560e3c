//! Bean Jump headless driver
//!
//! Usage: `bean-jump [seed] [max_ticks]`
//!
//! Plays a single run with a simple autopilot at the fixed tick rate (no
//! rendering, no wall-clock pacing) and prints the final snapshot as JSON.
//! Set `RUST_LOG=debug` to watch platform generation.

use std::process::ExitCode;
use std::str::FromStr;

use bean_jump::consts::*;
use bean_jump::sim::GameState;
use bean_jump::{KeyCommand, Session};

/// Default run length: five minutes of game time
const DEFAULT_MAX_TICKS: u64 = 5 * 60 * 60;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = parse_arg(args.next(), "seed").unwrap_or_else(rand::random);
    let max_ticks = parse_arg(args.next(), "max_ticks").unwrap_or(DEFAULT_MAX_TICKS);

    log::info!("Bean Jump (headless) starting, seed {}", seed);
    let mut session = Session::new(seed);

    for n in 0..max_ticks {
        if session.game().is_game_over() {
            break;
        }
        if let Some(command) = autopilot(session.game()) {
            session.key(command);
        }
        session.on_tick();

        if n % 600 == 0 {
            let game = session.game();
            log::info!(
                "tick {}: score {}, camera y {:.1}, {} platforms",
                game.ticks(),
                game.score(),
                game.camera().y,
                game.platforms().len()
            );
        }
    }

    let game = session.game();
    log::info!(
        "Finished after {} ticks with score {} (game over: {})",
        game.ticks(),
        game.score(),
        game.is_game_over()
    );

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to encode snapshot: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Parse an optional positional argument, warning on garbage
fn parse_arg<T: FromStr>(arg: Option<String>, name: &str) -> Option<T> {
    let raw = arg?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring invalid {} {:?}, using default", name, raw);
            None
        }
    }
}

/// Steer toward the next platform worth landing on
///
/// Rising: the lowest platform above within jump reach. Falling: the nearest
/// platform below. Direction takes the shorter way around the screen wrap.
fn autopilot(game: &GameState) -> Option<KeyCommand> {
    let player = game.player();
    let reach = JUMP_SPEED * JUMP_SPEED / (2.0 * GRAVITY);

    let rising = player.vel.y < 0.0;
    let target = game
        .platforms()
        .iter()
        .filter(|p| {
            if rising {
                p.pos.y < player.pos.y && p.pos.y > player.pos.y - reach
            } else {
                p.pos.y > player.pos.y
            }
        })
        .min_by(|a, b| {
            let da = (a.pos.y - player.pos.y).abs();
            let db = (b.pos.y - player.pos.y).abs();
            da.total_cmp(&db)
        })?;

    let mut dx = target.center_x() - player.pos.x;
    if dx > GAME_WIDTH / 2.0 {
        dx -= GAME_WIDTH;
    } else if dx < -GAME_WIDTH / 2.0 {
        dx += GAME_WIDTH;
    }

    if dx.abs() < target.width / 4.0 {
        None
    } else if dx < 0.0 {
        Some(KeyCommand::Left)
    } else {
        Some(KeyCommand::Right)
    }
}
