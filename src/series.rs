//! Match series simulation.
//!
//! Plays whole matches with automated players: every round each player
//! takes a turn on fresh dice, the round is awarded, and wins and losses
//! accumulate across the match. Matches are independent, so a series can
//! be played on a rayon thread pool. Records are written as JSONL.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::SeriesConfig;
use crate::error::GameError;
use crate::game::Game;
use crate::strategy::{play_turn, HoldStrategy, TurnRecord};

/// Errors that can stop a series run.
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// One round: every player's turn and the awarded result.
#[derive(Debug, Clone, Serialize)]
pub struct RoundRecord {
    /// 1-based round number within the match.
    pub round: usize,
    pub turns: Vec<TurnRecord>,
    /// Number of the player awarded the round.
    pub winner: u32,
    /// Player summaries after the round was awarded.
    pub results: String,
}

/// A player's standing at the end of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerTally {
    pub player: u32,
    pub wins: u32,
    pub losses: u32,
}

/// A complete match record.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    /// Sequential match ID.
    pub match_id: usize,
    pub rounds: Vec<RoundRecord>,
    pub tallies: Vec<PlayerTally>,
    /// Number of the player with the most wins.
    pub winner: u32,
    /// Summary of that player.
    pub final_winner: String,
}

/// Plays one round on `game`, starting from the first player.
pub fn play_round(game: &mut Game, strategy: HoldStrategy, round: usize) -> RoundRecord {
    game.start_new_round();
    let mut turns = Vec::with_capacity(game.players().len());
    loop {
        game.reset_dice();
        turns.push(play_turn(game, strategy));
        if !game.advance_to_next_player() {
            break;
        }
    }
    let winner = game.round_leader().number();
    let results = game.compute_round_results();
    RoundRecord {
        round,
        turns,
        winner,
        results,
    }
}

/// Plays a full match of `config.rounds` rounds.
pub fn play_match(
    config: &SeriesConfig,
    match_id: usize,
    rng: SmallRng,
) -> Result<MatchRecord, GameError> {
    let mut game = Game::with_rng(&config.game, rng)?;
    let rounds: Vec<RoundRecord> = (1..=config.rounds)
        .map(|round| play_round(&mut game, config.strategy, round))
        .collect();
    let tallies: Vec<PlayerTally> = game
        .players()
        .iter()
        .map(|p| PlayerTally {
            player: p.number(),
            wins: p.wins(),
            losses: p.losses(),
        })
        .collect();
    Ok(MatchRecord {
        match_id,
        rounds,
        tallies,
        winner: game.match_leader().number(),
        final_winner: game.final_winner(),
    })
}

/// Runs a series, producing every match record ordered by match ID.
///
/// When `config.threads > 1`, matches are played concurrently using rayon.
pub fn run_series(config: &SeriesConfig) -> Result<Vec<MatchRecord>, SeriesError> {
    let mut matches = Vec::with_capacity(config.num_matches);
    run_series_with_callback(config, |record| {
        matches.push(record);
    })?;
    matches.sort_by_key(|m| m.match_id);
    Ok(matches)
}

/// Runs a series, calling `on_match` with each completed match record.
///
/// Records arrive in completion order, which differs from match order when
/// playing in parallel.
pub fn run_series_with_callback<F>(config: &SeriesConfig, on_match: F) -> Result<(), SeriesError>
where
    F: FnMut(MatchRecord),
{
    config.game.validate()?;
    if config.threads > 1 {
        run_series_parallel(config, on_match)
    } else {
        run_series_sequential(config, on_match)
    }
}

/// Seeds match `i` from the series seed, or from entropy when it is 0.
fn match_rng(seed: u64, match_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(match_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn log_progress(config: &SeriesConfig, completed: usize, record: &MatchRecord) {
    if config.quiet {
        return;
    }
    let wins: Vec<String> = record.tallies.iter().map(|t| t.wins.to_string()).collect();
    info!(
        "Match {}/{}: player {} wins ({})",
        completed,
        config.num_matches,
        record.winner,
        wins.join("-")
    );
}

fn run_series_sequential<F>(config: &SeriesConfig, mut on_match: F) -> Result<(), SeriesError>
where
    F: FnMut(MatchRecord),
{
    for i in 0..config.num_matches {
        let record = play_match(config, i, match_rng(config.seed, i))?;
        log_progress(config, i + 1, &record);
        on_match(record);
    }
    Ok(())
}

/// Plays matches on a rayon pool and hands records to `on_match` on the
/// calling thread as they complete.
fn run_series_parallel<F>(config: &SeriesConfig, mut on_match: F) -> Result<(), SeriesError>
where
    F: FnMut(MatchRecord),
{
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<Result<MatchRecord, GameError>>();
    let mut first_error = None;

    thread::scope(|s| {
        s.spawn(move || {
            pool.install(|| {
                (0..config.num_matches)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let result = play_match(config, i, match_rng(config.seed, i));
                        if let Ok(record) = &result {
                            let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                            log_progress(config, n, record);
                        }
                        let _ = tx.send(result);
                    });
            });
        });

        for result in rx {
            match result {
                Ok(record) => on_match(record),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
    });

    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Writes match records as JSONL (one JSON object per match, one per line).
pub fn write_jsonl<W: Write>(matches: &[MatchRecord], out: &mut W) -> std::io::Result<()> {
    for record in matches {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints a summary of series results to stderr.
pub fn print_summary(matches: &[MatchRecord]) {
    let total = matches.len();
    let players = matches.first().map_or(0, |m| m.tallies.len());
    let mut match_wins = vec![0usize; players];
    let mut round_wins = vec![0u32; players];
    let mut turns = 0usize;
    let mut qualified = 0usize;
    let mut winning_score_total = 0i64;
    let mut rounds = 0usize;

    for record in matches {
        if let Some(slot) = match_wins.get_mut(record.winner as usize - 1) {
            *slot += 1;
        }
        for tally in &record.tallies {
            if let Some(slot) = round_wins.get_mut(tally.player as usize - 1) {
                *slot += tally.wins;
            }
        }
        for round in &record.rounds {
            rounds += 1;
            turns += round.turns.len();
            qualified += round.turns.iter().filter(|t| t.qualified).count();
            if let Some(turn) = round.turns.iter().find(|t| t.player == round.winner) {
                winning_score_total += turn.score as i64;
            }
        }
    }

    eprintln!("=== Series Summary ===");
    eprintln!("Matches: {}", total);
    eprintln!("Rounds: {}", rounds);
    eprintln!(
        "Qualifying turns: {} of {} ({:.1}%)",
        qualified,
        turns,
        100.0 * qualified as f64 / turns.max(1) as f64
    );
    eprintln!(
        "Avg winning score: {:.2}",
        winning_score_total as f64 / rounds.max(1) as f64
    );
    eprintln!("Match wins:");
    for (i, &wins) in match_wins.iter().enumerate() {
        let pct = 100.0 * wins as f64 / total.max(1) as f64;
        eprintln!(
            "  player {:>2}: {} ({:.1}%), {} rounds won",
            i + 1,
            wins,
            pct,
            round_wins[i]
        );
    }
}
