//! レジストリ構築の設定モデル
//!
//! 起動時に一度だけ解決され、以降は不変。ここには値とパスの導出だけを置き、
//! 副作用（ディレクトリ作成・コマンド実行）は harborflow-provision 側に置く。

use crate::error::{HarborError, Result};
use std::path::{Path, PathBuf};

/// ユーザー名のデフォルト値
pub const DEFAULT_USERNAME: &str = "admin";
/// 公開ポートのデフォルト値
pub const DEFAULT_PORT: u16 = 5000;
/// 生成物を置くディレクトリのデフォルト値
pub const DEFAULT_ROOT_DIR: &str = "/opt/harbor-registry";

/// レジストリ本体のイメージ（TLS・認証はレジストリ側に委譲）
pub const REGISTRY_IMAGE: &str = "registry:2";
/// htpasswd の計算に使う使い捨てコンテナのイメージ
pub const HTPASSWD_IMAGE: &str = "httpd:2";
/// Basic 認証の realm（固定値）
pub const AUTH_REALM: &str = "Registry Realm";
/// 証明書の有効日数
pub const CERT_DAYS: u32 = 365;
/// RSA 鍵長
pub const KEY_BITS: u32 = 2048;

/// 構築に必要な設定値一式
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// サーバーの IP アドレス（証明書の CN / SAN に入る）
    pub addr: String,
    /// Basic 認証のユーザー名
    pub username: String,
    /// Basic 認証のパスワード（render 系の操作では空のまま）
    pub password: String,
    /// ホスト側に公開するポート
    pub port: u16,
    /// 生成物を置くディレクトリ
    pub root_dir: PathBuf,
}

impl RegistryConfig {
    /// 設定を組み立てる。addr が空の場合はエラー。
    /// パスワードの必須チェックは入力解決側（プロンプト後）で行う。
    pub fn new(
        addr: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        port: u16,
        root_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let addr = addr.into();
        if addr.trim().is_empty() {
            return Err(HarborError::MissingInput("addr"));
        }
        let username = username.into();
        if username.trim().is_empty() {
            return Err(HarborError::MissingInput("username"));
        }
        Ok(Self {
            addr,
            username,
            password: password.into(),
            port,
            root_dir: root_dir.into(),
        })
    }

    /// `addr:port` 形式のレジストリホスト名
    pub fn registry_host(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }

    /// ファイルレイアウトを導出
    pub fn layout(&self) -> RegistryLayout {
        RegistryLayout::new(&self.root_dir)
    }
}

/// root_dir 以下の生成物パスと、Docker デーモンの信頼ストアパス
#[derive(Debug, Clone)]
pub struct RegistryLayout {
    root_dir: PathBuf,
}

impl RegistryLayout {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// 証明書・秘密鍵の置き場
    pub fn cert_dir(&self) -> PathBuf {
        self.root_dir.join("certs")
    }

    /// htpasswd の置き場
    pub fn auth_dir(&self) -> PathBuf {
        self.root_dir.join("auth")
    }

    /// レジストリの永続データの置き場
    pub fn data_dir(&self) -> PathBuf {
        self.root_dir.join("data")
    }

    pub fn key_path(&self) -> PathBuf {
        self.cert_dir().join("registry.key")
    }

    pub fn cert_path(&self) -> PathBuf {
        self.cert_dir().join("registry.crt")
    }

    pub fn htpasswd_path(&self) -> PathBuf {
        self.auth_dir().join("htpasswd")
    }

    pub fn compose_path(&self) -> PathBuf {
        self.root_dir.join("compose.yaml")
    }

    /// Docker デーモンがレジストリごとの信頼アンカーを探すディレクトリ。
    /// このツールの管理ディレクトリ外（ホスト全体に影響する）。
    pub fn docker_trust_dir(registry_host: &str) -> PathBuf {
        Path::new("/etc/docker/certs.d").join(registry_host)
    }

    /// 信頼ストア内の証明書パス
    pub fn docker_trust_cert(registry_host: &str) -> PathBuf {
        Self::docker_trust_dir(registry_host).join("ca.crt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_addr() {
        let result = RegistryConfig::new("", "admin", "pass", 5000, "/opt/harbor-registry");
        assert!(matches!(result, Err(HarborError::MissingInput("addr"))));

        let result = RegistryConfig::new("  ", "admin", "pass", 5000, "/opt/harbor-registry");
        assert!(matches!(result, Err(HarborError::MissingInput("addr"))));
    }

    #[test]
    fn test_registry_host() {
        let config =
            RegistryConfig::new("203.0.113.10", "admin", "Secr3t!", 5000, "/opt/harbor-registry")
                .unwrap();
        assert_eq!(config.registry_host(), "203.0.113.10:5000");
    }

    #[test]
    fn test_layout_paths() {
        let layout = RegistryLayout::new("/opt/harbor-registry");
        assert_eq!(
            layout.key_path(),
            PathBuf::from("/opt/harbor-registry/certs/registry.key")
        );
        assert_eq!(
            layout.htpasswd_path(),
            PathBuf::from("/opt/harbor-registry/auth/htpasswd")
        );
        assert_eq!(
            layout.compose_path(),
            PathBuf::from("/opt/harbor-registry/compose.yaml")
        );
    }

    #[test]
    fn test_docker_trust_paths() {
        assert_eq!(
            RegistryLayout::docker_trust_cert("203.0.113.10:5000"),
            PathBuf::from("/etc/docker/certs.d/203.0.113.10:5000/ca.crt")
        );
    }
}
