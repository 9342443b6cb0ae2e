//! Command-line integration tests.

mod support;

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use bushtalk_bridge::adapter::outbound::notifier::{StatusConfig, StatusWriter};
use bushtalk_bridge::domain::AircraftState;
use bushtalk_bridge::infrastructure::config::Config;
use bushtalk_bridge::port::{Event, Notifier};
use predicates::prelude::*;
use support::http::{HttpStub, StubResponse};
use tempfile::TempDir;

fn bridge() -> Command {
    let mut cmd = cargo_bin_cmd!("bushtalk-bridge");
    cmd.env_remove("BUSHTALK_API_TOKEN")
        .env_remove("BUSHTALK_PASSWORD")
        .env("NO_COLOR", "1");
    cmd
}

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    path
}

fn write_status(path: &Path) {
    let writer = StatusWriter::new(
        path.to_path_buf(),
        StatusConfig {
            simulator: "localhost:8086".into(),
            api_url: "https://bushtalkradio.com".into(),
        },
    );
    writer.notify(Event::Connected);
    writer.notify(Event::StateUpdated(AircraftState {
        latitude: 61.17,
        longitude: -149.99,
        altitude_agl: 100.0,
        groundspeed: 10.0,
        magnetic_heading: 90.0,
        tail_number: "N4567Q".into(),
        updated_at: None,
    }));
}

#[test]
fn test_help() {
    bridge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bushtalk-bridge"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_version() {
    bridge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_check_config_without_file_uses_defaults() {
    let dir = TempDir::new().unwrap();

    bridge()
        .args(["check", "config", "-c"])
        .arg(dir.path().join("missing.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("localhost:8086"))
        .stdout(predicate::str::contains("No API token configured"));
}

#[test]
fn test_check_config_rejects_invalid_port() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[simulator]\nport = 0\n");

    bridge()
        .args(["check", "config", "-c"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("simulator.port"));
}

#[test]
fn test_run_without_token_fails_with_hint() {
    let dir = TempDir::new().unwrap();

    bridge()
        .args(["run", "-c"])
        .arg(dir.path().join("missing.toml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("bushtalk-bridge login"))
        .stderr(predicate::str::contains("credentials.api_token"));
}

#[test]
fn test_status_reads_file() {
    let dir = TempDir::new().unwrap();
    let status = dir.path().join("status.json");
    write_status(&status);

    bridge()
        .args(["status", "--file"])
        .arg(&status)
        .assert()
        .success()
        .stdout(predicate::str::contains("connected"))
        .stdout(predicate::str::contains("N4567Q"))
        .stdout(predicate::str::contains("61.17000, -149.99000"))
        .stdout(predicate::str::contains("never"));
}

#[test]
fn test_status_json_prints_raw_file() {
    let dir = TempDir::new().unwrap();
    let status = dir.path().join("status.json");
    write_status(&status);

    let output = bridge()
        .args(["--json", "status", "--file"])
        .arg(&status)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["version"], "1");
    assert_eq!(value["simulator_connected"], true);
    assert_eq!(value["position"]["tail_number"], "N4567Q");
}

#[test]
fn test_status_uses_configured_path() {
    let dir = TempDir::new().unwrap();
    let status = dir.path().join("status.json");
    write_status(&status);
    let config = write_config(
        &dir,
        &format!("status_file = {:?}\n", status.display().to_string()),
    );

    bridge()
        .args(["status", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("N4567Q"));
}

#[test]
fn test_status_without_file_fails() {
    let dir = TempDir::new().unwrap();

    bridge()
        .args(["status", "-c"])
        .arg(dir.path().join("missing.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("status_file"));
}

#[test]
fn test_logout_clears_credentials() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "[simulator]\nport = 8087\n\n[credentials]\nusername = \"pilot\"\napi_token = \"secret\"\n",
    );

    bridge()
        .args(["logout", "-c"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));

    let config = Config::parse_toml(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(config.credentials.username.is_empty());
    assert!(config.credentials.api_token.is_empty());
    assert_eq!(config.simulator.port, 8087);
}

#[test]
fn test_logout_without_file_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");

    bridge()
        .args(["logout", "-c"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to clear"));

    assert!(!path.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_saves_token() {
    let stub = HttpStub::start(|_| {
        StubResponse::json(
            200,
            r#"{"id_token":"tok-123","refresh_token":"r","userId":"42","username":"pilot","expires_in":86400}"#,
        )
    })
    .await;
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &format!("[tracker]\napi_url = \"{}\"\n", stub.base_url()));

    let login_path = path.clone();
    let output = tokio::task::spawn_blocking(move || {
        bridge()
            .args(["login", "-u", "pilot", "-c"])
            .arg(&login_path)
            .env("BUSHTALK_PASSWORD", "hunter2")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Logged in as pilot"));

    let config = Config::parse_toml(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(config.credentials.username, "pilot");
    assert_eq!(config.credentials.api_token, "tok-123");

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].json(),
        serde_json::json!({"username": "pilot", "password": "hunter2"})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_no_remember_leaves_config_untouched() {
    let stub = HttpStub::start(|_| StubResponse::json(200, r#"{"id_token":"tok-123"}"#)).await;
    let dir = TempDir::new().unwrap();
    let contents = format!("[tracker]\napi_url = \"{}\"\n", stub.base_url());
    let path = write_config(&dir, &contents);

    let login_path = path.clone();
    let output = tokio::task::spawn_blocking(move || {
        bridge()
            .args(["login", "-u", "pilot", "--no-remember", "-c"])
            .arg(&login_path)
            .env("BUSHTALK_PASSWORD", "hunter2")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&path).unwrap(), contents);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_rejected_reports_status() {
    let stub = HttpStub::start(|_| StubResponse::json(401, "{}")).await;
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &format!("[tracker]\napi_url = \"{}\"\n", stub.base_url()));

    let output = tokio::task::spawn_blocking(move || {
        bridge()
            .args(["login", "-u", "pilot", "-c"])
            .arg(&path)
            .env("BUSHTALK_PASSWORD", "wrong")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("authentication failed: status 401"));
}
