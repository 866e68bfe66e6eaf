// A-series: argument handling and exit codes

use crate::helpers::{clear_config_env, run_cli, temp_path};
use serial_test::serial;

#[test]
#[serial]
fn a1_help_lists_all_commands() {
    let res = run_cli(&["--help"]);
    assert_eq!(res.exit_code, 0, "--help should exit with code 0");
    for cmd in ["play", "sim", "train", "eval", "cfg", "rng"] {
        assert!(res.stdout.contains(cmd), "help should list `{}`", cmd);
    }
}

#[test]
#[serial]
fn a2_version_prints_version_and_exits_zero() {
    let res = run_cli(&["--version"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
#[serial]
fn a3_unknown_subcommand_shows_commands_on_stderr() {
    let res = run_cli(&["split"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Commands:"), "{}", res.stderr);
    assert!(res.stdout.is_empty());
}

#[test]
#[serial]
fn a4_invalid_table_is_a_configuration_error() {
    clear_config_env();
    let res = run_cli(&["sim", "--players", "1", "--episodes", "3"]);
    assert_eq!(res.exit_code, 2);
    assert!(
        res.stderr.contains("Error: Configuration error: players must be >= 2"),
        "{}",
        res.stderr
    );

    let res = run_cli(&["eval", "--decks", "-1"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stdout.is_empty());
}

#[test]
#[serial]
fn a4b_large_shoe_is_accepted() {
    clear_config_env();
    let res = run_cli(&["sim", "--decks", "100", "--episodes", "3", "--seed", "1"]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stdout.contains("Simulated: 3 episodes"));
}

#[test]
#[serial]
fn a4c_command_errors_are_reported_once() {
    clear_config_env();
    let (_dir, file) = temp_path("plain");
    std::fs::write(&file, "x").unwrap();
    let sim_out = file.join("sub").join("x.jsonl");
    let eval_out = file.join("sub").join("x.csv");
    for args in [
        ["sim", "--episodes", "2", "--output", sim_out.to_str().unwrap()],
        ["eval", "--episodes", "2", "--output", eval_out.to_str().unwrap()],
    ] {
        let res = run_cli(&args);
        assert_eq!(res.exit_code, 2);
        assert_eq!(res.stderr.matches("Error:").count(), 1, "{}", res.stderr);
        assert!(res.stderr.contains("Failed to create directory"), "{}", res.stderr);
    }

    unsafe {
        std::env::set_var("BLACKJACK_PLAYERS", "1");
    }
    let res = run_cli(&["cfg"]);
    clear_config_env();
    assert_eq!(res.exit_code, 2);
    assert_eq!(res.stderr.lines().count(), 1, "{}", res.stderr);
}

#[test]
#[serial]
fn a5_unknown_policy_is_invalid_input() {
    clear_config_env();
    let res = run_cli(&["play", "--policy", "card-counter", "--seed", "1"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid input"), "{}", res.stderr);
}

#[test]
#[serial]
fn a6_missing_value_table_is_an_io_error() {
    clear_config_env();
    let res = run_cli(&[
        "eval",
        "--policy",
        "greedy:target/definitely_missing_table.json",
        "--episodes",
        "10",
    ]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("I/O error"), "{}", res.stderr);
}

#[test]
#[serial]
fn a7_rng_is_reproducible() {
    let r1 = run_cli(&["rng", "--seed", "42"]);
    let r2 = run_cli(&["rng", "--seed", "42"]);
    assert_eq!(r1.exit_code, 0);
    assert_eq!(r1.stdout, r2.stdout);
    let r3 = run_cli(&["rng", "--seed", "43"]);
    assert_ne!(r1.stdout, r3.stdout);
}
