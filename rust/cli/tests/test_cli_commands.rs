use pazaak_cli::{run, run_with_input};

use serial_test::serial;
use std::io::Cursor;

const ENV_KEYS: [&str; 5] = [
    "PAZAAK_CONFIG",
    "PAZAAK_SEED",
    "PAZAAK_AI_DELAY_MS",
    "PAZAAK_DATA_DIR",
    "PAZAAK_AI",
];

struct TempEnvVar {
    key: &'static str,
    previous: Option<String>,
}

impl TempEnvVar {
    fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        unsafe {
            std::env::set_var(key, value);
        }
        Self { key, previous }
    }

    fn unset(key: &'static str) -> Self {
        let previous = std::env::var(key).ok();
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, previous }
    }
}

impl Drop for TempEnvVar {
    fn drop(&mut self) {
        unsafe {
            match &self.previous {
                Some(prev) => std::env::set_var(self.key, prev),
                None => std::env::remove_var(self.key),
            }
        }
    }
}

/// Clears every PAZAAK_* variable and points the data directory at `dir`.
fn isolated_env(dir: &std::path::Path) -> Vec<TempEnvVar> {
    let mut guards: Vec<TempEnvVar> = ENV_KEYS
        .iter()
        .filter(|k| **k != "PAZAAK_DATA_DIR")
        .map(|k| TempEnvVar::unset(k))
        .collect();
    guards.push(TempEnvVar::set(
        "PAZAAK_DATA_DIR",
        dir.to_str().expect("utf-8 temp path"),
    ));
    guards
}

fn run_cmd(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
#[serial]
fn help_lists_expected_commands() {
    let (code, stdout, _) = run_cmd(&["pazaak", "--help"]);
    assert_eq!(code, 0);
    for cmd in ["play", "sim", "deck", "stats", "cfg"] {
        assert!(stdout.contains(cmd), "help should list subcommand `{}`", cmd);
    }
}

#[test]
#[serial]
fn cfg_shows_default_settings() {
    let _cleared: Vec<TempEnvVar> = ENV_KEYS.iter().map(|k| TempEnvVar::unset(k)).collect();

    let (code, stdout, stderr) = run_cmd(&["pazaak", "cfg"]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["ai_delay_ms"]["value"].as_u64(), Some(400));
    assert_eq!(json["ai_delay_ms"]["source"].as_str(), Some("default"));
    assert_eq!(json["ai"]["value"].as_str(), Some("baseline"));
    assert!(json["seed"]["value"].is_null());
}

#[test]
#[serial]
fn cfg_reads_file_then_env() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("pazaak.toml");
    std::fs::write(&cfg_path, "seed = 5\nai_delay_ms = 100\n").unwrap();

    let _cleared: Vec<TempEnvVar> = ENV_KEYS.iter().map(|k| TempEnvVar::unset(k)).collect();
    let _file = TempEnvVar::set("PAZAAK_CONFIG", cfg_path.to_str().unwrap());
    let _delay = TempEnvVar::set("PAZAAK_AI_DELAY_MS", "0");

    let (code, stdout, _) = run_cmd(&["pazaak", "cfg"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["seed"]["value"].as_u64(), Some(5));
    assert_eq!(json["seed"]["source"].as_str(), Some("file"));
    assert_eq!(json["ai_delay_ms"]["value"].as_u64(), Some(0));
    assert_eq!(json["ai_delay_ms"]["source"].as_str(), Some("env"));
}

#[test]
#[serial]
fn invalid_config_fails_every_command() {
    let dir = tempfile::tempdir().unwrap();
    let _env = isolated_env(dir.path());
    let _bad = TempEnvVar::set("PAZAAK_AI_DELAY_MS", "soon");

    let (code, _, stderr) = run_cmd(&["pazaak", "stats"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Invalid AI delay"));
}

#[test]
#[serial]
fn deck_set_show_reset_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let _env = isolated_env(dir.path());

    let (code, stdout, stderr) = run_cmd(&["pazaak", "deck", "set", "-2", "+5", "+-1", "*6"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("Saved side deck"));
    assert!(dir.path().join("deck.json").is_file());

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("deck.json")).unwrap())
            .unwrap();
    assert_eq!(saved[0]["kind"], "minus");
    assert_eq!(saved[2]["kind"], "plusminus");
    assert_eq!(saved[3]["value"], 6);

    let (_, stdout, _) = run_cmd(&["pazaak", "deck", "show"]);
    assert!(stdout.contains("-2 +5"));

    let (code, _, _) = run_cmd(&["pazaak", "deck", "reset"]);
    assert_eq!(code, 0);
    assert!(!dir.path().join("deck.json").exists());
}

#[test]
#[serial]
fn deck_set_rejects_three_cards() {
    let dir = tempfile::tempdir().unwrap();
    let _env = isolated_env(dir.path());

    let (code, _, stderr) = run_cmd(&["pazaak", "deck", "set", "+1", "+2", "+3"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("exactly 4"));
    assert!(!dir.path().join("deck.json").exists());
}

#[test]
#[serial]
fn sim_prints_tallies() {
    let dir = tempfile::tempdir().unwrap();
    let _env = isolated_env(dir.path());

    let (code, stdout, stderr) = run_cmd(&["pazaak", "sim", "--matches", "4", "--seed", "3"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("Matches: player"));
    assert!(stdout.contains("Rounds: player"));
    assert!(stdout.contains("Simulated: 4 matches"));
}

#[test]
#[serial]
fn play_records_stats_in_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let _env = isolated_env(dir.path());

    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut stdin = Cursor::new("s\nn\n".repeat(80).into_bytes());
    let code = run_with_input(
        ["pazaak", "play", "--seed", "8", "--delay-ms", "0"],
        &mut out,
        &mut err,
        &mut stdin,
    );
    assert_eq!(code, 0, "stderr: {}", String::from_utf8_lossy(&err));

    let (code, stdout, _) = run_cmd(&["pazaak", "stats", "--json"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["total_matches"], 1);
    let rounds = json["rounds_won"].as_u64().unwrap() + json["rounds_lost"].as_u64().unwrap();
    assert!(rounds >= 3);
}

#[test]
#[serial]
fn play_without_input_exits_130() {
    let dir = tempfile::tempdir().unwrap();
    let _env = isolated_env(dir.path());

    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut stdin = Cursor::new(Vec::new());
    let code = run_with_input(
        ["pazaak", "play", "--seed", "8", "--delay-ms", "0"],
        &mut out,
        &mut err,
        &mut stdin,
    );
    assert_eq!(code, 130);
    assert!(String::from_utf8_lossy(&err).contains("Interrupted"));
}

#[test]
#[serial]
fn play_rejects_excessive_delay() {
    let dir = tempfile::tempdir().unwrap();
    let _env = isolated_env(dir.path());

    let (code, _, stderr) = run_cmd(&["pazaak", "play", "--delay-ms", "20000"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("delay-ms"));
}

#[test]
#[serial]
fn stats_reset_writes_zeroes() {
    let dir = tempfile::tempdir().unwrap();
    let _env = isolated_env(dir.path());
    std::fs::write(dir.path().join("stats.json"), r#"{"matches_won": 9, "total_matches": 9}"#)
        .unwrap();

    let (_, stdout, _) = run_cmd(&["pazaak", "stats"]);
    assert!(stdout.contains("Matches: 9 played, 9 won"));

    let (code, _, _) = run_cmd(&["pazaak", "stats", "--reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cmd(&["pazaak", "stats"]);
    assert!(stdout.contains("Matches: 0 played"));
}
