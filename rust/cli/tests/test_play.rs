use blackjack_cli::run;

#[test]
fn play_with_a_policy_prints_each_episode() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        [
            "blackjack", "play", "--episodes", "3", "--players", "3", "--seed", "42", "--policy",
            "threshold:17",
        ],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 0, "{}", String::from_utf8_lossy(&err));
    let stdout = String::from_utf8_lossy(&out);
    assert_eq!(stdout.matches("Result: ").count(), 3);
    assert_eq!(stdout.matches("seat 0 gambler").count(), 3);
    assert_eq!(stdout.matches("seat 2 dealer").count(), 3);
    assert!(stdout.contains("Played: 3 episodes"));
}

#[test]
fn play_output_is_reproducible_for_a_seed() {
    let once = || {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(
            ["blackjack", "play", "--episodes", "4", "--decks", "1", "--seed", "9"],
            &mut out,
            &mut err,
        );
        assert_eq!(code, 0);
        out
    };
    assert_eq!(once(), once());
}

#[test]
fn play_with_every_builtin_policy() {
    for policy in ["threshold", "random", "dealer", "mc", "sarsa", "qlearning"] {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(
            ["blackjack", "play", "--seed", "5", "--policy", policy],
            &mut out,
            &mut err,
        );
        assert_eq!(code, 0, "{}: {}", policy, String::from_utf8_lossy(&err));
    }
}
