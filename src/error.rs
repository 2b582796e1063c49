//! Error types shared by the game controller and the series simulator.

use crate::game::die::DieId;

/// Errors that can occur while setting up or driving a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("no die with identifier '{0}'")]
    DieNotFound(DieId),

    #[error("face value out of range 1-6: {0}")]
    InvalidFace(u8),

    #[error("player {player} cannot roll after {rolls_used} rolls")]
    RollNotAllowed { player: u32, rolls_used: u32 },
}
