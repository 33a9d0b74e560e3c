//! Host-facing session wrapper
//!
//! The host loop forwards key events as they arrive and calls `on_tick` at
//! the fixed rate. Key events between ticks are latched, consumed by the next
//! tick and cleared. A session outlives individual runs: restarting swaps in
//! a fresh `GameState` and finished runs are offered to the leaderboard.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::highscores::HighScores;
use crate::sim::{GameState, TickInput};

/// Commands the host can forward from raw key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Left,
    Right,
    /// Start a new run; ignored unless the current run is over
    Restart,
}

/// Direction keys seen since the last tick
///
/// Only the latest direction survives: pressing one clears the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputLatch {
    left: bool,
    right: bool,
}

impl InputLatch {
    pub fn press_left(&mut self) {
        self.left = true;
        self.right = false;
    }

    pub fn press_right(&mut self) {
        self.right = true;
        self.left = false;
    }

    /// Hand the latched state to a tick and clear it
    pub fn take(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
        };
        *self = Self::default();
        input
    }
}

/// One player's sitting: the current run plus everything that spans runs
#[derive(Debug, Clone)]
pub struct Session {
    game: GameState,
    latch: InputLatch,
    high_scores: HighScores,
    /// Seeds for successive runs
    seeds: Pcg32,
    runs: u32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        let mut seeds = Pcg32::seed_from_u64(seed);
        let game = GameState::new(seeds.random());
        Self {
            game,
            latch: InputLatch::default(),
            high_scores: HighScores::new(),
            seeds,
            runs: 1,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Number of runs started in this session
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Handle a key event; returns true if it started a new run
    pub fn key(&mut self, command: KeyCommand) -> bool {
        match command {
            KeyCommand::Left => self.latch.press_left(),
            KeyCommand::Right => self.latch.press_right(),
            KeyCommand::Restart => {
                if self.game.is_game_over() {
                    self.restart();
                    return true;
                }
                log::debug!("Restart ignored: run still in progress");
            }
        }
        false
    }

    /// Advance the current run by one tick with the latched input
    pub fn on_tick(&mut self) {
        let input = self.latch.take();
        let was_over = self.game.is_game_over();
        self.game.step(input.left, input.right);

        if !was_over && self.game.is_game_over() {
            let rank =
                self.high_scores
                    .add_score(self.game.score(), self.game.seed(), self.game.ticks());
            match rank {
                Some(rank) => log::info!("Score {} ranked #{}", self.game.score(), rank),
                None => log::info!("Score {} did not make the board", self.game.score()),
            }
        }
    }

    fn restart(&mut self) {
        self.game = GameState::new(self.seeds.random());
        self.latch = InputLatch::default();
        self.runs += 1;
        log::info!("Run {} started (seed {})", self.runs, self.game.seed());
    }
}
