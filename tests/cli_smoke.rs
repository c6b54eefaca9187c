#![allow(clippy::unwrap_used)]
//! CLI smoke tests for startup behavior.
//!
//! None of these reach the network: each run either prints help/version or
//! stops at startup validation before the chat begins.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Runs the binary with an isolated, empty config directory.
#[allow(deprecated)]
fn openrchat(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("openrchat").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    openrchat(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("OpenRouter"))
        .stdout(predicate::str::contains("--xml"))
        .stdout(predicate::str::contains("--models"))
        .stdout(predicate::str::contains("--model"))
        .stdout(predicate::str::contains("--temperature"))
        .stdout(predicate::str::contains("--title"))
        .stdout(predicate::str::contains("--referer"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    openrchat(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_api_key_exits_with_config_error() {
    let home = TempDir::new().unwrap();
    openrchat(&home)
        .env_remove(API_KEY_ENV)
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains(API_KEY_ENV));
}

#[test]
fn test_blank_api_key_exits_with_config_error() {
    let home = TempDir::new().unwrap();
    openrchat(&home)
        .env(API_KEY_ENV, "   ")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains(API_KEY_ENV));
}

#[test]
fn test_missing_api_key_reported_before_missing_prompt() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    openrchat(&home)
        .env_remove(API_KEY_ENV)
        .arg("--xml")
        .arg(work.path().join("absent.xml"))
        .assert()
        .code(exitcode::CONFIG);
}

#[test]
fn test_missing_system_prompt_exits_with_noinput() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    openrchat(&home)
        .env(API_KEY_ENV, "sk-or-test")
        .arg("--xml")
        .arg(work.path().join("absent.xml"))
        .assert()
        .code(exitcode::NOINPUT)
        .stderr(predicate::str::contains("system prompt"));
}

#[test]
fn test_empty_system_prompt_exits_with_noinput() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let prompt = work.path().join("system.xml");
    fs::write(&prompt, "<system>   </system>").unwrap();

    openrchat(&home)
        .env(API_KEY_ENV, "sk-or-test")
        .arg("--xml")
        .arg(&prompt)
        .assert()
        .code(exitcode::NOINPUT);
}

#[test]
fn test_default_system_prompt_is_read_from_working_directory() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    openrchat(&home)
        .current_dir(work.path())
        .env(API_KEY_ENV, "sk-or-test")
        .assert()
        .code(exitcode::NOINPUT)
        .stderr(predicate::str::contains("system.xml"));
}

#[test]
fn test_out_of_range_temperature_fails() {
    let home = TempDir::new().unwrap();
    openrchat(&home)
        .env(API_KEY_ENV, "sk-or-test")
        .args(["--temperature", "3.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid temperature"));
}

#[test]
fn test_non_numeric_temperature_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    openrchat(&home)
        .args(["-t", "warm"])
        .assert()
        .code(2);
}

#[test]
fn test_config_file_api_key_env_is_honored() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("openrchat");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[chat]\napi_key_env = \"MY_ROUTER_KEY\"\n",
    )
    .unwrap();

    openrchat(&home)
        .env(API_KEY_ENV, "sk-or-test")
        .env_remove("MY_ROUTER_KEY")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("MY_ROUTER_KEY"));
}
