//! CLI-level smoke tests

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_presets_lists_catalog() {
    Command::cargo_bin("squeeze")
        .unwrap()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("discord-8"))
        .stdout(predicate::str::contains("Discord Nitro"));
}

#[test]
fn test_presets_json_output() {
    Command::cargo_bin("squeeze")
        .unwrap()
        .args(["presets", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"target_size_mb\": 8"));
}

#[test]
fn test_compress_rejects_missing_input() {
    Command::cargo_bin("squeeze")
        .unwrap()
        .args(["compress", "--input", "/nonexistent/video.mp4"])
        .assert()
        .failure();
}

#[test]
fn test_compress_rejects_unknown_preset() {
    Command::cargo_bin("squeeze")
        .unwrap()
        .args(["compress", "--input", "video.mp4", "--preset", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preset"));
}
