// W-series: multi-command workflows

use crate::helpers::{clear_config_env, run_cli, temp_path};
use blackjack_ai::qtable::QTable;
use serial_test::serial;

#[test]
#[serial]
fn w1_train_then_evaluate_the_greedy_table() {
    clear_config_env();
    let (_dir, table) = temp_path("mc.json");
    let table_s = table.to_string_lossy().into_owned();

    let res = run_cli(&[
        "train",
        "--algo",
        "mc",
        "--episodes",
        "2000",
        "--players",
        "3",
        "--seed",
        "11",
        "--epsilon",
        "1.0",
        "--no-early-stop",
        "--output",
        &table_s,
    ]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stdout.contains("Trained mc for 2000 episodes"));
    let q = QTable::load(&table).expect("saved table loads");
    assert!(q.unseen() < 400);

    let policy = format!("greedy:{}", table_s);
    let res = run_cli(&[
        "eval",
        "--policy",
        &policy,
        "--episodes",
        "300",
        "--workers",
        "2",
        "--seed",
        "3",
    ]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    let mut lines = res.stdout.lines();
    assert_eq!(
        lines.next(),
        Some("player_points,dealer_showing,usable_ace,value,visits")
    );
    assert!(lines.count() > 0);
}

#[test]
#[serial]
fn w2_sim_records_replay_with_the_same_seed() {
    clear_config_env();
    let (_d1, a) = temp_path("a.jsonl");
    let (_d2, b) = temp_path("b.jsonl");
    for p in [&a, &b] {
        let s = p.to_string_lossy().into_owned();
        let res = run_cli(&[
            "sim", "--episodes", "20", "--decks", "2", "--players", "4", "--seed", "77",
            "--policy", "random", "--output", &s,
        ]);
        assert_eq!(res.exit_code, 0, "{}", res.stderr);
    }
    let strip = |p: &std::path::Path| -> Vec<serde_json::Value> {
        std::fs::read_to_string(p)
            .unwrap()
            .lines()
            .map(|l| {
                let mut v: serde_json::Value = serde_json::from_str(l).unwrap();
                v.as_object_mut().unwrap().remove("ts");
                v.as_object_mut().unwrap().remove("episode_id");
                v
            })
            .collect()
    };
    let ra = strip(&a);
    assert_eq!(ra.len(), 20);
    assert_eq!(ra, strip(&b));
    assert!(ra.iter().all(|r| r["decks"].as_u64() == Some(2)));
}
