//! Docker デーモンの信頼ストアへの証明書登録
//!
//! /etc/docker/certs.d 以下の書き換えとデーモン再起動を伴う。
//! どちらもホスト全体に影響する副作用（このツールの管理ディレクトリ外）。

use crate::command;
use crate::error::Result;
use harborflow_core::{RegistryConfig, RegistryLayout};

/// 生成済みの証明書を `/etc/docker/certs.d/<addr>:<port>/ca.crt` に配置し、
/// 信頼アンカーを即時反映させるためにデーモンを再起動する。
pub async fn install(config: &RegistryConfig) -> Result<()> {
    let host = config.registry_host();
    let trust_dir = RegistryLayout::docker_trust_dir(&host);
    tokio::fs::create_dir_all(&trust_dir).await?;

    tokio::fs::copy(
        config.layout().cert_path(),
        RegistryLayout::docker_trust_cert(&host),
    )
    .await?;

    command::run("systemctl", &["restart", "docker"]).await?;

    Ok(())
}
