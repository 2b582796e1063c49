//! Dicegame library.
//!
//! Exposes the dice, player and turn-controller types, the scoring rule,
//! automated turn play and the match series simulator for use by
//! integration tests and the binary entry point.

pub mod config;
pub mod error;
pub mod game;
pub mod series;
pub mod strategy;

pub use config::{GameConfig, SeriesConfig};
pub use error::GameError;
pub use game::{Die, DieId, Game, Player};
