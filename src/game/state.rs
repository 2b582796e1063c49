//! Game state and turn orchestration.
//!
//! `Game` owns the players, the dice and the random source. It tracks the
//! current player as an index into the player list, rolls and holds dice,
//! applies the scoring rule and tallies round results. It never decides on
//! its own when a match is over; the caller drives turns and rounds.

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::die::{Die, DieId};
use super::player::Player;
use super::scoring;
use crate::config::GameConfig;
use crate::error::GameError;

/// A table of players sharing one set of dice.
#[derive(Debug, Clone)]
pub struct Game {
    players: Vec<Player>,
    dice: Vec<Die>,
    max_rolls: u32,
    current: usize,
    rng: SmallRng,
}

impl Game {
    /// Creates a game with an entropy-seeded random source.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Creates a game whose dice are driven by a seeded random source.
    pub fn with_seed(config: &GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    /// Creates a game using the given random source for every roll.
    pub fn with_rng(config: &GameConfig, mut rng: SmallRng) -> Result<Self, GameError> {
        config.validate()?;
        let dice: Vec<Die> = (0..config.dice)
            .map(|i| Die::new(DieId::from_index(i), &mut rng))
            .collect();
        Ok(Game {
            players: numbered_players(config.players),
            dice,
            max_rolls: config.max_rolls,
            current: 0,
            rng,
        })
    }

    /// Creates a game whose dice show the given faces, in order.
    ///
    /// The number of faces must match `config.dice`.
    pub fn from_faces(
        config: &GameConfig,
        faces: &[u8],
        rng: SmallRng,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if faces.len() != config.dice {
            return Err(GameError::InvalidConfiguration(format!(
                "expected {} die faces, got {}",
                config.dice,
                faces.len()
            )));
        }
        let dice = faces
            .iter()
            .enumerate()
            .map(|(i, &face)| Die::with_face(DieId::from_index(i), face))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Game {
            players: numbered_players(config.players),
            dice,
            max_rolls: config.max_rolls,
            current: 0,
            rng,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn max_rolls(&self) -> u32 {
        self.max_rolls
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn current_player_number(&self) -> u32 {
        self.current_player().number()
    }

    pub fn current_player_score(&self) -> i32 {
        self.current_player().score()
    }

    /// Current faces of every die, in table order.
    pub fn faces(&self) -> Vec<u8> {
        self.dice.iter().map(Die::face).collect()
    }

    /// True if every die is held. Vacuously true with no dice.
    pub fn all_dice_held(&self) -> bool {
        self.dice.iter().all(Die::is_held)
    }

    /// True if at least one held die shows `face`.
    pub fn is_holding_face(&self, face: u8) -> bool {
        self.dice.iter().any(|d| d.is_held() && d.face() == face)
    }

    /// Holds every die showing `face` as soon as an unheld one turns up.
    ///
    /// Returns true if `face` is held after the call, false if no die shows
    /// it (in which case nothing is held).
    pub fn auto_hold(&mut self, face: u8) -> bool {
        if self.is_holding_face(face) {
            return true;
        }
        if !self.dice.iter().any(|d| !d.is_held() && d.face() == face) {
            return false;
        }
        for die in self.dice.iter_mut().filter(|d| d.face() == face) {
            die.hold();
        }
        debug!(
            "player {}: auto-held {}s",
            self.current_player_number(),
            face
        );
        true
    }

    /// The only gate on rolling: rolls remain and some die is unheld.
    pub fn current_player_can_roll(&self) -> bool {
        self.current_player().rolls_used() < self.max_rolls && !self.all_dice_held()
    }

    /// Rolls every unheld die and counts the roll for the current player.
    ///
    /// Does not check the roll limit; see [`Game::try_roll_dice`].
    pub fn roll_dice(&mut self) {
        debug!(
            "player {}: rolling, current dice: {}",
            self.current_player_number(),
            self.dice_results_summary()
        );
        let rng = &mut self.rng;
        for die in self.dice.iter_mut() {
            die.roll(rng);
        }
        self.players[self.current].record_roll();
    }

    /// Rolls only if [`Game::current_player_can_roll`] allows it.
    pub fn try_roll_dice(&mut self) -> Result<(), GameError> {
        if !self.current_player_can_roll() {
            let player = self.current_player();
            return Err(GameError::RollNotAllowed {
                player: player.number(),
                rolls_used: player.rolls_used(),
            });
        }
        self.roll_dice();
        Ok(())
    }

    /// Holds the die with the given identifier.
    pub fn hold_die(&mut self, id: DieId) -> Result<(), GameError> {
        match self.dice.iter_mut().find(|d| d.id() == id) {
            Some(die) => {
                die.hold();
                debug!("held die {} showing {}", id, die.face());
                Ok(())
            }
            None => {
                warn!("hold requested for unknown die {}", id);
                Err(GameError::DieNotFound(id))
            }
        }
    }

    /// Scores the current player from the dice on the table.
    ///
    /// Returns the new score for a qualifying roll. A roll that does not
    /// qualify leaves the player's previous score in place and returns
    /// `None`.
    pub fn score_current_player(&mut self) -> Option<i32> {
        let score = scoring::score(&self.faces())?;
        self.players[self.current].set_score(score);
        debug!(
            "player {} scored {}",
            self.current_player_number(),
            score
        );
        Some(score)
    }

    /// Moves to the next player in turn order.
    ///
    /// Returns false, without moving, when the current player is the last.
    pub fn advance_to_next_player(&mut self) -> bool {
        if self.current + 1 < self.players.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Releases every die and gives each a fresh face.
    pub fn reset_dice(&mut self) {
        let rng = &mut self.rng;
        for die in self.dice.iter_mut() {
            die.reset(rng);
        }
    }

    /// Clears every player's rolls and score.
    pub fn reset_players(&mut self) {
        for player in self.players.iter_mut() {
            player.reset();
        }
    }

    /// Resets the players and hands the dice to the first player.
    pub fn start_new_round(&mut self) {
        self.reset_players();
        self.current = 0;
    }

    /// The player with the highest score this round.
    ///
    /// On a tie the first player in turn order leads.
    pub fn round_leader(&self) -> &Player {
        &self.players[first_max_index(&self.players, Player::score)]
    }

    /// Awards the round: the leader gains a win, everyone else a loss.
    ///
    /// Returns every player's summary joined with `", "`.
    pub fn compute_round_results(&mut self) -> String {
        let winner = first_max_index(&self.players, Player::score);
        for (i, player) in self.players.iter_mut().enumerate() {
            if i == winner {
                player.add_win();
            } else {
                player.add_loss();
            }
        }
        info!(
            "round won by player {} with {}",
            self.players[winner].number(),
            self.players[winner].score()
        );
        self.players_summary()
    }

    /// The player with the most wins so far, first in turn order on ties.
    pub fn match_leader(&self) -> &Player {
        &self.players[first_max_index(&self.players, Player::wins)]
    }

    /// Summary of the player with the most wins across the match.
    pub fn final_winner(&self) -> String {
        self.match_leader().to_string()
    }

    /// Faces of every die, in table order, joined with `", "`.
    pub fn dice_results_summary(&self) -> String {
        join(self.dice.iter().map(Die::to_string))
    }

    fn players_summary(&self) -> String {
        join(self.players.iter().map(Player::to_string))
    }
}

fn numbered_players(count: usize) -> Vec<Player> {
    (1..=count as u32).map(Player::new).collect()
}

/// Index of the first player holding the maximum key.
fn first_max_index<K: Ord>(players: &[Player], key: impl Fn(&Player) -> K) -> usize {
    let mut best = 0;
    for (i, player) in players.iter().enumerate().skip(1) {
        if key(player) > key(&players[best]) {
            best = i;
        }
    }
    best
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}
