//! Compose 定義の書き出しとサービスの起動

use crate::command;
use crate::error::Result;
use harborflow_core::{ComposeFile, RegistryConfig};
use std::path::{Path, PathBuf};

/// compose.yaml を root_dir に書き出す。常に全体を再生成する。
pub async fn write_definition(config: &RegistryConfig) -> Result<PathBuf> {
    let path = config.layout().compose_path();
    let yaml = ComposeFile::for_registry(config).to_yaml()?;
    tokio::fs::write(&path, yaml).await?;
    Ok(path)
}

/// 定義ファイルのあるディレクトリで docker compose up -d を実行する。
/// restart: always は定義側に入っているので、以降の自己復旧は compose 任せ。
pub async fn compose_up(root_dir: &Path) -> Result<()> {
    command::run_in("docker", &["compose", "up", "-d"], Some(root_dir)).await?;
    Ok(())
}
