//! 起動したレジストリへの認証ログイン確認

use crate::command;
use crate::error::{ProvisionError, Result};
use harborflow_core::RegistryConfig;

/// 設定済みの資格情報で docker login を試みる。
/// パスワードは --password-stdin で渡す（argv には載せない）。
pub async fn login(config: &RegistryConfig) -> Result<()> {
    let registry = config.registry_host();
    let args = [
        "login",
        registry.as_str(),
        "-u",
        config.username.as_str(),
        "--password-stdin",
    ];

    match command::run_with_stdin("docker", &args, &config.password).await {
        Ok(_) => Ok(()),
        Err(ProvisionError::CommandFailed { .. }) => Err(ProvisionError::LoginFailed {
            registry,
            dir: config.root_dir.display().to_string(),
        }),
        Err(e) => Err(e),
    }
}
