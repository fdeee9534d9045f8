//! 生成物ディレクトリの準備

use crate::error::Result;
use harborflow_core::RegistryLayout;

/// certs / auth / data の各ディレクトリを作成する。
/// 既存レイアウトに対して再実行しても安全（冪等）。
pub async fn directories(layout: &RegistryLayout) -> Result<()> {
    for dir in [layout.cert_dir(), layout.auth_dir(), layout.data_dir()] {
        tokio::fs::create_dir_all(&dir).await?;
    }
    Ok(())
}
