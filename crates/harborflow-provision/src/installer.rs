//! Docker と Compose プラグインのインストール（Debian 系）
//!
//! インストール済みであれば何もしない（冪等）。インストール中にどこかで
//! 失敗した場合、追加済みの apt リポジトリエントリは巻き戻さない。

use crate::command;
use crate::error::{ProvisionError, Result};

/// Docker 公式 GPG キーの置き場
const DOCKER_KEYRING: &str = "/etc/apt/keyrings/docker.asc";
/// apt リポジトリ定義の置き場
const DOCKER_APT_LIST: &str = "/etc/apt/sources.list.d/docker.list";

/// docker 本体と compose プラグインが使える状態か
pub async fn is_installed() -> bool {
    command::exists("docker").await
        && command::run("docker", &["compose", "version"]).await.is_ok()
}

/// Docker Engine と Compose プラグインをインストールする。
/// 手順は公式の apt リポジトリ経由: インデックス更新 → 前提パッケージ →
/// GPG キー登録 → リポジトリ登録 → 本体インストール → サービス有効化。
pub async fn install() -> Result<()> {
    command::run("apt-get", &["update", "-y"]).await?;
    command::run(
        "apt-get",
        &["install", "-y", "ca-certificates", "curl", "gnupg"],
    )
    .await?;

    // Docker 公式 GPG キーを登録
    tokio::fs::create_dir_all("/etc/apt/keyrings").await?;
    command::run(
        "curl",
        &[
            "-fsSL",
            "https://download.docker.com/linux/ubuntu/gpg",
            "-o",
            DOCKER_KEYRING,
        ],
    )
    .await?;
    command::run("chmod", &["a+r", DOCKER_KEYRING]).await?;

    // apt リポジトリを登録
    let arch = command::run("dpkg", &["--print-architecture"]).await?;
    let os_release = tokio::fs::read_to_string("/etc/os-release").await?;
    let codename = parse_codename(&os_release)
        .ok_or_else(|| ProvisionError::UnsupportedOs("VERSION_CODENAME が見つかりません".into()))?;
    let entry = format!(
        "deb [arch={} signed-by={}] https://download.docker.com/linux/ubuntu {} stable\n",
        arch.trim(),
        DOCKER_KEYRING,
        codename
    );
    tokio::fs::write(DOCKER_APT_LIST, entry).await?;

    // 本体インストール
    command::run("apt-get", &["update", "-y"]).await?;
    command::run(
        "apt-get",
        &[
            "install",
            "-y",
            "docker-ce",
            "docker-ce-cli",
            "containerd.io",
            "docker-buildx-plugin",
            "docker-compose-plugin",
        ],
    )
    .await?;

    // サービス有効化（起動も同時に行う）
    command::run("systemctl", &["enable", "--now", "docker"]).await?;

    Ok(())
}

/// /etc/os-release の内容から VERSION_CODENAME を取り出す
fn parse_codename(os_release: &str) -> Option<String> {
    os_release
        .lines()
        .find_map(|line| line.strip_prefix("VERSION_CODENAME="))
        .map(|value| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}
