//! Per-player turn state and match tallies.

use std::fmt;

/// A player's current-turn state plus cumulative wins and losses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    number: u32,
    rolls_used: u32,
    score: i32,
    wins: u32,
    losses: u32,
}

impl Player {
    /// Creates a player with the given 1-based number.
    pub fn new(number: u32) -> Self {
        Player {
            number,
            rolls_used: 0,
            score: 0,
            wins: 0,
            losses: 0,
        }
    }

    /// Counts one roll. The roll limit is enforced by the game.
    pub fn record_roll(&mut self) {
        self.rolls_used += 1;
    }

    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    pub fn add_loss(&mut self) {
        self.losses += 1;
    }

    /// Clears the turn state. Wins and losses carry over.
    pub fn reset(&mut self) {
        self.rolls_used = 0;
        self.score = 0;
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn rolls_used(&self) -> u32 {
        self.rolls_used
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player {}: score {}, wins {}, losses {}",
            self.number, self.score, self.wins, self.losses
        )
    }
}
