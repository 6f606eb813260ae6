use std::fs;

use assert_cmd::Command;
use assert_matches::assert_matches;

use reflex::game_mode::GameMode;
use reflex::highscores::{Highscores, LoadOutcome, MAX_ENTRIES};

#[test]
fn many_submissions_keep_only_the_best_ten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highscores.json");
    let mut store = Highscores::empty(&path);

    // Deterministic but unordered sequence of times
    let times: Vec<f64> = (0..40u32).map(|i| ((i * 37) % 41) as f64 / 100.0 + 0.1).collect();
    for (i, t) in times.iter().enumerate() {
        store
            .add_score_on(&format!("p{}", i), *t, GameMode::Extended, "07/08/24".into())
            .unwrap();
    }

    let mut best = times.clone();
    best.sort_by(|a, b| a.total_cmp(b));
    best.truncate(MAX_ENTRIES);

    let (reloaded, outcome) = Highscores::load(&path);
    assert_eq!(outcome, LoadOutcome::Loaded);
    let kept: Vec<f64> = reloaded
        .get_top(GameMode::Extended, MAX_ENTRIES)
        .iter()
        .map(|e| e.time)
        .collect();
    assert_eq!(kept, best);
    assert_eq!(reloaded.last_player(), "p39");
}

#[test]
fn clear_all_empties_every_mode_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highscores.json");
    let mut store = Highscores::empty(&path);
    for mode in GameMode::ALL {
        store.add_score_on("x", 0.4, mode, "07/08/24".into()).unwrap();
    }

    store.clear(None).unwrap();

    let (reloaded, _) = Highscores::load(&path);
    for mode in GameMode::ALL {
        assert!(reloaded.get_top(mode, MAX_ENTRIES).is_empty());
    }
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["scores"].as_object().unwrap().len(), 4);
}

#[test]
fn corrupt_store_recovers_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highscores.json");
    fs::write(&path, "garbage").unwrap();

    let (mut store, outcome) = Highscores::load(&path);
    assert_matches!(outcome, LoadOutcome::Defaulted(_));

    // The next write replaces the corrupt file
    store.add_score_on("ok", 0.3, GameMode::Quick, "07/08/24".into()).unwrap();
    let (_, outcome) = Highscores::load(&path);
    assert_eq!(outcome, LoadOutcome::Loaded);
}

#[test]
fn list_flag_prints_leaderboards() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highscores.json");
    let mut store = Highscores::empty(&path);
    store.add_score_on("neo", 0.256, GameMode::Burst, "09/10/24".into()).unwrap();

    let output = Command::cargo_bin("reflex")
        .unwrap()
        .arg("--scores")
        .arg(&path)
        .arg("--list")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Burst - 30 Targets - Top Scores:\n  #1. neo: 0.256s (09/10/24)"));
    assert!(stdout.contains("10 Targets - Top Scores:\n  No scores yet"));
}
