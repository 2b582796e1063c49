//! Match series simulator CLI.
//!
//! Plays dice matches between automated players and outputs match records
//! as JSONL on stdout, with a summary on stderr.
//!
//! Usage:
//!   cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --players N      Players per game (default: 2)
//!   --dice N         Dice on the table (default: 5)
//!   --max-rolls N    Rolls per turn (default: 3)
//!   --rounds N       Rounds per match (default: 5)
//!   --matches N      Number of matches to play (default: 10)
//!   --strategy S     sequential, greedy or never (default: sequential)
//!   --threads N      Number of parallel threads (default: 1)
//!   --seed N         Random seed, 0 for entropy (default: 0)
//!   --config FILE    JSON series config; later flags override it
//!   --quiet          Suppress progress and summary output

use std::env;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use log::error;

use dicegame::config::SeriesConfig;
use dicegame::series;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let mut config = SeriesConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--players" => config.game.players = flag_value(&args, &mut i),
            "--dice" => config.game.dice = flag_value(&args, &mut i),
            "--max-rolls" => config.game.max_rolls = flag_value(&args, &mut i),
            "--rounds" => config.rounds = flag_value(&args, &mut i),
            "--matches" => config.num_matches = flag_value(&args, &mut i),
            "--strategy" => config.strategy = flag_value(&args, &mut i),
            "--threads" => config.threads = flag_value(&args, &mut i),
            "--seed" => config.seed = flag_value(&args, &mut i),
            "--config" => {
                let path: String = flag_value(&args, &mut i);
                config = match SeriesConfig::from_json_file(&path) {
                    Ok(c) => c,
                    Err(e) => {
                        error!("{}: {}", path, e);
                        process::exit(1);
                    }
                };
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if !config.quiet {
        eprintln!(
            "Series: {} matches of {} rounds, {} players, {} dice, {} rolls, {} strategy, {} threads",
            config.num_matches,
            config.rounds,
            config.game.players,
            config.game.dice,
            config.game.max_rolls,
            config.strategy.name(),
            config.threads
        );
    }

    let start = Instant::now();
    let matches = match series::run_series(&config) {
        Ok(m) => m,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if !config.quiet {
        eprintln!(
            "Completed {} matches in {:.2}s",
            matches.len(),
            elapsed.as_secs_f64()
        );
        series::print_summary(&matches);
    }

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    if let Err(e) = series::write_jsonl(&matches, &mut writer) {
        error!("failed to write output: {}", e);
        process::exit(1);
    }
}

/// Advances past a flag and parses its value, exiting on a missing or
/// malformed value.
fn flag_value<T>(args: &[String], i: &mut usize) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let flag = &args[*i];
    *i += 1;
    let Some(raw) = args.get(*i) else {
        eprintln!("Missing value for {}", flag);
        process::exit(1);
    };
    match raw.parse() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid {} value '{}': {}", flag, raw, e);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: dicegame [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --players N      Players per game (default: 2)");
    eprintln!("  --dice N         Dice on the table (default: 5)");
    eprintln!("  --max-rolls N    Rolls per turn (default: 3)");
    eprintln!("  --rounds N       Rounds per match (default: 5)");
    eprintln!("  --matches N      Number of matches to play (default: 10)");
    eprintln!("  --strategy S     sequential, greedy or never (default: sequential)");
    eprintln!("  --threads N      Number of parallel threads (default: 1)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --config FILE    JSON series config; later flags override it");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
