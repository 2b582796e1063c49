//! Automated turn play.
//!
//! Plays one player's turn on a [`Game`]: roll while rolling is allowed,
//! hold dice after each roll according to a [`HoldStrategy`], then score.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::game::{Game, QUALIFYING_FACES};

/// Which dice an automated player holds after each roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldStrategy {
    /// Hold a 6 first, then a 5 once a 6 is held, then a 4 once a 5 is held.
    #[default]
    Sequential,
    /// Hold any 6, 5 or 4 as soon as it shows, in any order.
    Greedy,
    /// Never hold; use every roll.
    Never,
}

impl HoldStrategy {
    pub const fn name(self) -> &'static str {
        match self {
            HoldStrategy::Sequential => "sequential",
            HoldStrategy::Greedy => "greedy",
            HoldStrategy::Never => "never",
        }
    }

    /// Applies the strategy to the dice currently on the table.
    pub fn apply(self, game: &mut Game) {
        match self {
            HoldStrategy::Sequential => {
                // Stop at the first face that is not available yet.
                for face in QUALIFYING_FACES {
                    if !game.auto_hold(face) {
                        break;
                    }
                }
            }
            HoldStrategy::Greedy => {
                for face in QUALIFYING_FACES {
                    game.auto_hold(face);
                }
            }
            HoldStrategy::Never => {}
        }
    }
}

impl FromStr for HoldStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(HoldStrategy::Sequential),
            "greedy" => Ok(HoldStrategy::Greedy),
            "never" => Ok(HoldStrategy::Never),
            other => Err(format!("unknown hold strategy '{}'", other)),
        }
    }
}

/// Outcome of one automated turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    pub player: u32,
    pub rolls_used: u32,
    /// Faces on the table when the turn was scored.
    pub faces: Vec<u8>,
    pub qualified: bool,
    /// The player's score after the turn.
    pub score: i32,
}

/// Plays the current player's turn to completion and scores it.
///
/// The dice are used as they are; callers reset them between turns.
pub fn play_turn(game: &mut Game, strategy: HoldStrategy) -> TurnRecord {
    while game.current_player_can_roll() {
        game.roll_dice();
        strategy.apply(game);
    }
    let qualified = game.score_current_player().is_some();
    let player = game.current_player();
    TurnRecord {
        player: player.number(),
        rolls_used: player.rolls_used(),
        faces: game.faces(),
        qualified,
        score: player.score(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn game_with_faces(faces: &[u8], max_rolls: u32) -> Game {
        let config = GameConfig {
            players: 2,
            dice: faces.len(),
            max_rolls,
        };
        Game::from_faces(&config, faces, SmallRng::seed_from_u64(42)).unwrap()
    }

    #[test]
    fn sequential_needs_six_before_five() {
        let mut game = game_with_faces(&[5, 4, 1, 2, 3], 3);
        HoldStrategy::Sequential.apply(&mut game);
        assert!(game.dice().iter().all(|d| !d.is_held()));

        let mut game = game_with_faces(&[5, 6, 1, 4, 3], 3);
        HoldStrategy::Sequential.apply(&mut game);
        assert!(game.is_holding_face(6));
        assert!(game.is_holding_face(5));
        assert!(game.is_holding_face(4));
        assert!(!game.dice()[2].is_held());
    }

    #[test]
    fn sequential_stops_at_missing_captain() {
        let mut game = game_with_faces(&[6, 4, 1, 2, 3], 3);
        HoldStrategy::Sequential.apply(&mut game);
        assert!(game.is_holding_face(6));
        assert!(!game.is_holding_face(4));
    }

    #[test]
    fn greedy_holds_any_qualifier() {
        let mut game = game_with_faces(&[5, 4, 1, 2, 3], 3);
        HoldStrategy::Greedy.apply(&mut game);
        assert!(game.is_holding_face(5));
        assert!(game.is_holding_face(4));
        assert!(!game.dice()[2].is_held());
    }

    #[test]
    fn never_holds_nothing() {
        let mut game = game_with_faces(&[6, 5, 4], 3);
        HoldStrategy::Never.apply(&mut game);
        assert!(game.dice().iter().all(|d| !d.is_held()));
    }

    #[test]
    fn turn_respects_roll_limit() {
        for seed in 0..20 {
            let config = GameConfig::default();
            let mut game = Game::with_seed(&config, seed).unwrap();
            let record = play_turn(&mut game, HoldStrategy::Sequential);
            assert!(record.rolls_used >= 1);
            assert!(record.rolls_used <= game.max_rolls());
            assert_eq!(record.player, 1);
            assert_eq!(record.faces.len(), config.dice);
            assert_eq!(record.qualified, crate::game::qualifies(&record.faces));
        }
    }

    #[test]
    fn never_strategy_uses_every_roll() {
        let mut game = Game::with_seed(&GameConfig::default(), 3).unwrap();
        let record = play_turn(&mut game, HoldStrategy::Never);
        assert_eq!(record.rolls_used, 3);
    }

    #[test]
    fn strategy_names_round_trip() {
        for strategy in [
            HoldStrategy::Sequential,
            HoldStrategy::Greedy,
            HoldStrategy::Never,
        ] {
            assert_eq!(strategy.name().parse::<HoldStrategy>(), Ok(strategy));
        }
        assert!("random".parse::<HoldStrategy>().is_err());
    }
}
