//! Loading match configuration from JSON files.

use dino_jockey::core::{CollisionPolicy, ConfigError, GameConfig, MatchRule, Vec2, Viewport};
use dino_jockey::runner::Match;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::PathBuf;

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "dino-jockey-{}-{}.json",
        name,
        std::process::id()
    ));
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn test_load_partial_config_keeps_defaults() {
    let path = temp_config(
        "partial",
        r#"{
            "gravity": 1500.0,
            "collision_policy": "immediate_kill",
            "match_rule": "high_score",
            "player_size": { "width": 64.0, "height": 80.0 }
        }"#,
    );
    let config = GameConfig::load(&path).expect("valid config");
    fs::remove_file(&path).ok();

    let defaults = GameConfig::default();
    assert_eq!(config.gravity, 1500.0);
    assert_eq!(config.collision_policy, CollisionPolicy::ImmediateKill);
    assert_eq!(config.match_rule, MatchRule::HighScore);
    assert_eq!(config.player_size.height, 80.0);
    assert_eq!(config.jump_force, defaults.jump_force);
    assert_eq!(config.countdown_seconds, defaults.countdown_seconds);
}

#[test]
fn test_load_rejects_out_of_range_values() {
    let path = temp_config("negative", r#"{ "gravity": -10.0 }"#);
    let result = GameConfig::load(&path);
    fs::remove_file(&path).ok();
    assert!(matches!(
        result,
        Err(ConfigError::OutOfRange {
            field: "gravity",
            ..
        })
    ));
}

#[test]
fn test_load_reports_parse_and_io_errors() {
    let path = temp_config("garbage", "not json at all");
    let result = GameConfig::load(&path);
    fs::remove_file(&path).ok();
    assert!(matches!(result, Err(ConfigError::Parse(_))));

    let missing = std::env::temp_dir().join("dino-jockey-does-not-exist.json");
    assert!(matches!(
        GameConfig::load(&missing),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_match_rejects_lane_too_short_for_player() {
    let lanes = [
        Viewport::sized(1280.0, 352.0),
        Viewport::new(Vec2::new(0.0, 352.0), 1280.0, 60.0),
    ];
    let result = Match::new(
        lanes,
        GameConfig::default(),
        ChaCha8Rng::seed_from_u64(1),
    );
    assert!(matches!(result, Err(ConfigError::Viewport { .. })));
}
