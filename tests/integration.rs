//! Integration tests for the dicegame binary.
//!
//! Spawns the simulator with various flags and checks the JSONL it writes
//! to stdout and its exit status.

use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Runs the binary with the given arguments and collects its output.
fn run_dicegame(args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_dicegame");
    Command::new(exe)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to start dicegame")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn writes_one_line_per_match() {
    let output = run_dicegame(&["--matches", "4", "--rounds", "3", "--seed", "7", "--quiet"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 4);
    for (i, line) in lines.iter().enumerate() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["match_id"], i as u64);
        assert_eq!(value["rounds"].as_array().unwrap().len(), 3);
    }
}

#[test]
fn seeded_runs_are_identical() {
    let args = ["--matches", "3", "--rounds", "4", "--players", "3", "--seed", "21", "--quiet"];
    let a = run_dicegame(&args);
    let b = run_dicegame(&args);
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn threads_do_not_change_seeded_results() {
    let sequential = run_dicegame(&["--matches", "5", "--seed", "3", "--threads", "1", "--quiet"]);
    let parallel = run_dicegame(&["--matches", "5", "--seed", "3", "--threads", "4", "--quiet"]);
    assert!(parallel.status.success());
    assert_eq!(sequential.stdout, parallel.stdout);
}

#[test]
fn turns_respect_roll_limit() {
    let output = run_dicegame(&[
        "--matches", "2", "--max-rolls", "2", "--dice", "6", "--seed", "9", "--quiet",
    ]);
    assert!(output.status.success());

    for line in stdout_lines(&output) {
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        for round in value["rounds"].as_array().unwrap() {
            for turn in round["turns"].as_array().unwrap() {
                assert!(turn["rolls_used"].as_u64().unwrap() <= 2);
                assert_eq!(turn["faces"].as_array().unwrap().len(), 6);
            }
        }
    }
}

#[test]
fn single_player_is_rejected() {
    let output = run_dicegame(&["--players", "1", "--quiet"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn unknown_argument_fails() {
    let output = run_dicegame(&["--bogus"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown argument: --bogus"));
}

#[test]
fn invalid_strategy_fails() {
    let output = run_dicegame(&["--strategy", "random"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown hold strategy 'random'"));
}

#[test]
fn config_file_is_applied() {
    let path = std::env::temp_dir().join(format!("dicegame-config-{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"{{"game": {{"players": 3}}, "rounds": 2, "num_matches": 2, "seed": 4, "quiet": true}}"#
    )
    .unwrap();
    drop(file);

    let output = run_dicegame(&["--config", path.to_str().unwrap(), "--matches", "3"]);
    std::fs::remove_file(&path).ok();
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3, "flag after --config should override it");
    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(value["tallies"].as_array().unwrap().len(), 3);
    assert_eq!(value["rounds"].as_array().unwrap().len(), 2);
}
