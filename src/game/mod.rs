//! Dice, players and the turn controller.
//!
//! Contains the core data structures for dice and players, the fixed
//! scoring rule, and the `Game` that ties them together.

pub mod die;
pub mod player;
pub mod scoring;
pub mod state;

pub use die::{Die, DieId, FACES};
pub use player::Player;
pub use scoring::{qualifies, score, QUALIFYING_FACES, SCORE_OFFSET};
pub use state::Game;
