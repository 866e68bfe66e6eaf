use crate::helpers::{clear_config_env, run_cli, temp_path};
use serde_json::Value;
use serial_test::serial;

fn cfg_json() -> Value {
    let res = run_cli(&["cfg"]);
    assert_eq!(res.exit_code, 0, "cfg failed: {}", res.stderr);
    serde_json::from_str(&res.stdout).expect("cfg prints JSON")
}

#[test]
#[serial]
fn i1_cfg_shows_defaults() {
    clear_config_env();
    let json = cfg_json();
    assert_eq!(json["decks"]["value"].as_u64(), Some(0));
    assert_eq!(json["players"]["value"].as_u64(), Some(2));
    assert_eq!(json["episodes"]["value"].as_u64(), Some(1000));
    assert!(json["seed"]["value"].is_null());
    for key in ["decks", "players", "seed", "episodes"] {
        assert_eq!(json[key]["source"].as_str(), Some("default"));
    }
}

#[test]
#[serial]
fn i2_env_overrides_file() {
    clear_config_env();
    let (_dir, cfg_path) = temp_path("blackjack.toml");
    std::fs::write(&cfg_path, "decks = 6\nplayers = 5\nseed = 456\n").unwrap();
    unsafe {
        std::env::set_var("BLACKJACK_CONFIG", &cfg_path);
    }

    let json1 = cfg_json();
    assert_eq!(json1["decks"]["value"].as_u64(), Some(6));
    assert_eq!(json1["decks"]["source"].as_str(), Some("file"));
    assert_eq!(json1["seed"]["value"].as_u64(), Some(456));
    assert_eq!(json1["seed"]["source"].as_str(), Some("file"));
    assert_eq!(json1["episodes"]["source"].as_str(), Some("default"));

    unsafe {
        std::env::set_var("BLACKJACK_SEED", "123");
        std::env::set_var("BLACKJACK_PLAYERS", "3");
    }
    let json2 = cfg_json();
    assert_eq!(json2["seed"]["value"].as_u64(), Some(123));
    assert_eq!(json2["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json2["players"]["value"].as_u64(), Some(3));
    assert_eq!(json2["players"]["source"].as_str(), Some("env"));
    assert_eq!(json2["decks"]["source"].as_str(), Some("file"));

    clear_config_env();
}

#[test]
#[serial]
fn i3_command_line_overrides_env() {
    clear_config_env();
    unsafe {
        std::env::set_var("BLACKJACK_PLAYERS", "1");
        std::env::set_var("BLACKJACK_EPISODES", "4");
    }
    // env alone is invalid
    assert_eq!(run_cli(&["cfg"]).exit_code, 2);

    let (_dir, out) = temp_path("sim.jsonl");
    let out_s = out.to_string_lossy().into_owned();
    let res = run_cli(&["sim", "--players", "3", "--seed", "5", "--output", &out_s]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stdout.contains("Simulated: 4 episodes"));
    let first = std::fs::read_to_string(&out).unwrap();
    let record: Value = serde_json::from_str(first.lines().next().unwrap()).unwrap();
    assert_eq!(record["seats"].as_array().unwrap().len(), 3);
    assert_eq!(record["seed"].as_u64(), Some(5));

    clear_config_env();
}

#[test]
#[serial]
fn i4_bad_values_are_reported() {
    clear_config_env();
    unsafe {
        std::env::set_var("BLACKJACK_DECKS", "six");
    }
    let res = run_cli(&["cfg"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid configuration: Invalid decks: six"), "{}", res.stderr);
    clear_config_env();

    let (_dir, cfg_path) = temp_path("broken.toml");
    std::fs::write(&cfg_path, "players = [\n").unwrap();
    unsafe {
        std::env::set_var("BLACKJACK_CONFIG", &cfg_path);
    }
    assert_eq!(run_cli(&["cfg"]).exit_code, 2);
    clear_config_env();
}
