//! 外部コマンド実行のラッパー
//!
//! すべての協調先（apt-get, openssl, docker, systemctl）は終了コードの
//! 規約（0 = 成功）だけを信頼する。タイムアウトは設けない。

use crate::error::{ProvisionError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// コマンドを実行して stdout を返す。非ゼロ終了は [`ProvisionError::CommandFailed`]。
pub async fn run(program: &str, args: &[&str]) -> Result<String> {
    run_in(program, args, None).await
}

/// 作業ディレクトリを指定してコマンドを実行する
pub async fn run_in(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("Running: {} {}", program, args.join(" "));

    let output = cmd.output().await.map_err(|e| not_found(program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProvisionError::CommandFailed {
            program: program.to_string(),
            stderr: stderr.to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// 標準入力に secret を書き込んでコマンドを実行する。
/// パスワードを argv に載せると ps(1) で他ユーザーから見えるため、
/// 秘密情報はこちらを使って stdin 経由で渡す。
pub async fn run_with_stdin(program: &str, args: &[&str], input: &str) -> Result<String> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdin(Stdio::piped());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    // secret は意図的にログへ出さない
    tracing::debug!("Running (with stdin): {} {}", program, args.join(" "));

    let mut child = cmd.spawn().map_err(|e| not_found(program, e))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
        // drop で stdin を閉じて EOF を伝える
    }

    let output = child.wait_with_output().await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProvisionError::CommandFailed {
            program: program.to_string(),
            stderr: stderr.to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

fn not_found(program: &str, e: std::io::Error) -> ProvisionError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ProvisionError::CommandNotFound(program.to_string())
    } else {
        ProvisionError::Io(e)
    }
}

/// PATH 上にコマンドが存在するか
pub async fn exists(program: &str) -> bool {
    Command::new("which")
        .arg(program)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let output = run("echo", &["hello"]).await.unwrap();
        assert_eq!(output.trim(), "hello");
    }

    #[tokio::test]
    async fn test_run_failure_carries_stderr() {
        let result = run("sh", &["-c", "echo boom >&2; exit 3"]).await;
        match result {
            Err(ProvisionError::CommandFailed { program, stderr }) => {
                assert_eq!(program, "sh");
                assert!(stderr.contains("boom"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_with_stdin_feeds_input() {
        let output = run_with_stdin("cat", &[], "secret-line").await.unwrap();
        assert_eq!(output.trim(), "secret-line");
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let result = run("harborflow-no-such-command", &[]).await;
        assert!(matches!(result, Err(ProvisionError::CommandNotFound(_))));
    }

    #[tokio::test]
    async fn test_exists() {
        assert!(exists("sh").await);
        assert!(!exists("harborflow-no-such-command").await);
    }
}
