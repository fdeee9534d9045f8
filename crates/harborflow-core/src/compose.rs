//! Compose 定義の生成
//!
//! 同一の設定からは常にバイト一致の YAML を出力する（タイムスタンプ・乱数なし）。
//! 再実行時の diff 確認を成立させるための不変条件。

use crate::config::{AUTH_REALM, REGISTRY_IMAGE, RegistryConfig};
use crate::error::Result;
use serde::Serialize;

/// compose.yaml 全体
#[derive(Debug, Clone, Serialize)]
pub struct ComposeFile {
    services: Services,
}

#[derive(Debug, Clone, Serialize)]
struct Services {
    registry: RegistryService,
}

/// registry サービスの定義
#[derive(Debug, Clone, Serialize)]
pub struct RegistryService {
    image: String,
    /// ホスト再起動・クラッシュからの自己復旧は compose に委譲する
    restart: String,
    ports: Vec<String>,
    environment: Vec<String>,
    volumes: Vec<String>,
}

impl ComposeFile {
    /// 設定から registry サービス一式を組み立てる
    pub fn for_registry(config: &RegistryConfig) -> Self {
        let environment = vec![
            "REGISTRY_AUTH=htpasswd".to_string(),
            format!("REGISTRY_AUTH_HTPASSWD_REALM={}", AUTH_REALM),
            "REGISTRY_AUTH_HTPASSWD_PATH=/auth/htpasswd".to_string(),
            "REGISTRY_HTTP_TLS_CERTIFICATE=/certs/registry.crt".to_string(),
            "REGISTRY_HTTP_TLS_KEY=/certs/registry.key".to_string(),
        ];

        let volumes = vec![
            "./data:/var/lib/registry".to_string(),
            "./certs:/certs:ro".to_string(),
            "./auth:/auth:ro".to_string(),
        ];

        Self {
            services: Services {
                registry: RegistryService {
                    image: REGISTRY_IMAGE.to_string(),
                    restart: "always".to_string(),
                    ports: vec![format!("{}:5000", config.port)],
                    environment,
                    volumes,
                },
            },
        }
    }

    /// YAML 文字列に変換する
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> RegistryConfig {
        RegistryConfig::new("203.0.113.10", "admin", "Secr3t!", 5000, "/opt/harbor-registry")
            .unwrap()
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = test_config();
        let first = ComposeFile::for_registry(&config).to_yaml().unwrap();
        let second = ComposeFile::for_registry(&config).to_yaml().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_contains_port_mapping() {
        let mut config = test_config();
        config.port = 8443;
        let yaml = ComposeFile::for_registry(&config).to_yaml().unwrap();
        assert!(yaml.contains("8443:5000"));
        assert!(yaml.contains("image: registry:2"));
        assert!(yaml.contains("restart: always"));
    }

    #[test]
    fn test_render_embeds_auth_and_tls() {
        let yaml = ComposeFile::for_registry(&test_config()).to_yaml().unwrap();
        assert!(yaml.contains("REGISTRY_AUTH=htpasswd"));
        assert!(yaml.contains("REGISTRY_AUTH_HTPASSWD_REALM=Registry Realm"));
        assert!(yaml.contains("REGISTRY_HTTP_TLS_CERTIFICATE=/certs/registry.crt"));
        assert!(yaml.contains("./certs:/certs:ro"));
        assert!(yaml.contains("./auth:/auth:ro"));
    }

    #[test]
    fn test_render_has_no_secrets() {
        // パスワードは compose 定義に入らない（htpasswd 側に入る）
        let yaml = ComposeFile::for_registry(&test_config()).to_yaml().unwrap();
        assert!(!yaml.contains("Secr3t!"));
        assert!(!yaml.contains("admin"));
    }
}
