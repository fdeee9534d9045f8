//! Provisioning error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("コマンドが見つかりません: {0}")]
    CommandNotFound(String),

    #[error("コマンド実行に失敗しました: {program}\n{stderr}")]
    CommandFailed { program: String, stderr: String },

    #[error("サポート外の OS です: {0}\nヒント: Debian 系ディストリビューションのみ対応しています")]
    UnsupportedOs(String),

    #[error(
        "docker login に失敗しました: {registry}\nヒント: cd {dir} && docker compose logs でレジストリのログを確認してください"
    )]
    LoginFailed { registry: String, dir: String },

    #[error("Compose 定義の生成に失敗しました: {0}")]
    Render(#[from] harborflow_core::HarborError),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
