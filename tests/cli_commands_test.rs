// Integration tests for CLI commands
// Run with: cargo test --test cli_commands_test

use std::process::Command;
use tempfile::TempDir;

fn life_totals() -> Command {
    Command::new(env!("CARGO_BIN_EXE_life-totals"))
}

/// Test the config command with no config file
#[test]
fn test_config_command_prints_defaults() {
    let temp_dir = TempDir::new().unwrap();

    let output = life_totals()
        .arg("config")
        .env("LIFE_TOTALS_CONFIG_DIR", temp_dir.path())
        .env("LIFE_TOTALS_LOG_FILE", temp_dir.path().join("test.log"))
        .output()
        .expect("Failed to execute config command");

    assert!(output.status.success(), "Command should succeed");
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["initial_life"], 40);
    assert_eq!(config["long_press_ms"], 3000);
    assert_eq!(config["queue_capacity"], 8);
}

/// Test that file values and env overrides both reach the config command
#[test]
fn test_config_command_merges_file_and_env() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("config.json"),
        r#"{"initial_life": 20, "blink_interval_ms": 250}"#,
    )
    .unwrap();

    let output = life_totals()
        .arg("config")
        .env("LIFE_TOTALS_CONFIG_DIR", temp_dir.path())
        .env("LIFE_TOTALS_LOG_FILE", temp_dir.path().join("test.log"))
        .env("LIFE_TOTALS_INITIAL_LIFE", "30")
        .output()
        .expect("Failed to execute config command");

    assert!(output.status.success(), "Command should succeed");
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["initial_life"], 30);
    assert_eq!(config["blink_interval_ms"], 250);
}

/// Test that an invalid config aborts startup
#[test]
fn test_invalid_config_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = life_totals()
        .arg("config")
        .env("LIFE_TOTALS_CONFIG_DIR", temp_dir.path())
        .env("LIFE_TOTALS_LOG_FILE", temp_dir.path().join("test.log"))
        .env("LIFE_TOTALS_QUEUE_CAPACITY", "0")
        .output()
        .expect("Failed to execute config command");

    assert!(!output.status.success(), "Zero queue capacity should be rejected");
}
