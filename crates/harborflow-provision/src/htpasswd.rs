//! htpasswd 資格情報ファイルの生成
//!
//! bcrypt ハッシュの計算は使い捨ての httpd コンテナに委譲する。
//! パスワードは argv ではなく stdin で渡す（元の設計では argv 渡しだった。
//! 意図的な変更 — DESIGN.md 参照）。

use crate::command;
use crate::error::Result;
use harborflow_core::{HTPASSWD_IMAGE, RegistryConfig};
use std::path::Path;

/// htpasswd を実行する docker run の引数。
/// `-n` で stdout に出力、`-i` で stdin からパスワードを読む、`-B` で bcrypt。
pub fn docker_run_args(username: &str) -> Vec<String> {
    vec![
        "run".to_string(),
        "--rm".to_string(),
        "-i".to_string(),
        "--entrypoint".to_string(),
        "htpasswd".to_string(),
        HTPASSWD_IMAGE.to_string(),
        "-niB".to_string(),
        username.to_string(),
    ]
}

/// 資格情報ファイルを生成する。常に全体を書き換える（追記ではない）ため、
/// 別ユーザー名で再実行すると旧ユーザーのエントリは消える（単一ユーザーモデル）。
pub async fn write_credentials(config: &RegistryConfig) -> Result<()> {
    let args = docker_run_args(&config.username);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let entry = command::run_with_stdin("docker", &arg_refs, &config.password).await?;

    write_file(&config.layout().htpasswd_path(), &entry).await
}

/// htpasswd ファイルを書き出す（上書き）
pub async fn write_file(path: &Path, entry: &str) -> Result<()> {
    tokio::fs::write(path, entry).await?;
    Ok(())
}
