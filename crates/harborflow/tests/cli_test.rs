#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use predicates::prelude::*;

/// HARBOR_* 環境変数の影響を受けないコマンドを作る
fn harbor() -> Command {
    let mut cmd = Command::cargo_bin("harbor").unwrap();
    for var in [
        "HARBOR_ADDR",
        "HARBOR_USER",
        "HARBOR_PASSWORD",
        "HARBOR_PORT",
        "HARBOR_DIR",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// CLIヘルプが正しく表示されることを確認
#[test]
fn test_cli_help() {
    harbor()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("プライベートレジストリ"))
        .stdout(predicate::str::contains("up"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("version"));
}

/// バージョン表示が正しく動作することを確認
#[test]
fn test_cli_version() {
    harbor()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("harborflow"));
}

/// upコマンドのヘルプが正しく表示されることを確認
#[test]
fn test_up_help() {
    harbor()
        .arg("up")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--skip"))
        .stdout(predicate::str::contains("--addr"))
        .stdout(predicate::str::contains("--port"));
}

/// render --stdout が Compose 定義を出力することを確認
#[test]
fn test_render_stdout() {
    harbor()
        .arg("render")
        .arg("--stdout")
        .env("HARBOR_ADDR", "203.0.113.10")
        .assert()
        .success()
        .stdout(predicate::str::contains("image: registry:2"))
        .stdout(predicate::str::contains("5000:5000"))
        .stdout(predicate::str::contains("restart: always"))
        .stdout(predicate::str::contains("REGISTRY_AUTH=htpasswd"));
}

/// ポート指定が published ポートに反映されることを確認
#[test]
fn test_render_custom_port() {
    harbor()
        .arg("render")
        .arg("--stdout")
        .env("HARBOR_ADDR", "203.0.113.10")
        .env("HARBOR_PORT", "8443")
        .assert()
        .success()
        .stdout(predicate::str::contains("8443:5000"));
}

/// アドレス未指定（プロンプトも応答なし）で失敗することを確認
#[test]
fn test_render_missing_addr_fails() {
    harbor()
        .arg("render")
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(predicate::str::contains("addr"));
}

/// render を2回実行してもバイト一致の出力になることを確認（決定性）
#[test]
fn test_render_is_deterministic() {
    let tmp = tempfile::tempdir().unwrap();

    for _ in 0..2 {
        harbor()
            .arg("render")
            .env("HARBOR_ADDR", "203.0.113.10")
            .env("HARBOR_DIR", tmp.path())
            .assert()
            .success();
    }

    let first = std::fs::read(tmp.path().join("compose.yaml")).unwrap();

    harbor()
        .arg("render")
        .env("HARBOR_ADDR", "203.0.113.10")
        .env("HARBOR_DIR", tmp.path())
        .assert()
        .success();

    let second = std::fs::read(tmp.path().join("compose.yaml")).unwrap();
    assert_eq!(first, second);
}

/// 不正なコマンドでエラーになることを確認
#[test]
fn test_invalid_command() {
    harbor().arg("invalid-command").assert().failure();
}
