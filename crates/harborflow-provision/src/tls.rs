//! 自己署名証明書の生成（openssl CLI に委譲）
//!
//! CN とあわせて IP 型の SAN を必ず埋め込む。CN だけでは最近の TLS
//! クライアント（Docker 含む）が照合してくれない。

use crate::command;
use crate::error::Result;
use harborflow_core::{CERT_DAYS, KEY_BITS, RegistryConfig};
use std::path::Path;

/// openssl req の引数を組み立てる
pub fn openssl_args(addr: &str, key_path: &Path, cert_path: &Path) -> Vec<String> {
    vec![
        "req".to_string(),
        "-x509".to_string(),
        "-newkey".to_string(),
        format!("rsa:{}", KEY_BITS),
        "-nodes".to_string(),
        "-sha256".to_string(),
        "-days".to_string(),
        CERT_DAYS.to_string(),
        "-keyout".to_string(),
        key_path.display().to_string(),
        "-out".to_string(),
        cert_path.display().to_string(),
        "-subj".to_string(),
        format!("/CN={}", addr),
        "-addext".to_string(),
        format!("subjectAltName=IP:{}", addr),
    ]
}

/// 鍵と証明書を生成する。既存の鍵・証明書は無条件に上書きされる
/// （配布済みの旧証明書を信頼しているクライアントは再配布が必要になる）。
pub async fn generate(config: &RegistryConfig) -> Result<()> {
    let layout = config.layout();
    let key_path = layout.key_path();
    let cert_path = layout.cert_path();

    let args = openssl_args(&config.addr, &key_path, &cert_path);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    command::run("openssl", &arg_refs).await?;

    // 秘密鍵は所有者のみ、証明書は全員が読める
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(&key_path, Permissions::from_mode(0o600)).await?;
    tokio::fs::set_permissions(&cert_path, Permissions::from_mode(0o644)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_openssl_args_embed_san_ip() {
        let args = openssl_args(
            "203.0.113.10",
            &PathBuf::from("/opt/harbor-registry/certs/registry.key"),
            &PathBuf::from("/opt/harbor-registry/certs/registry.crt"),
        );
        assert!(args.contains(&"subjectAltName=IP:203.0.113.10".to_string()));
        assert!(args.contains(&"/CN=203.0.113.10".to_string()));
    }

    #[test]
    fn test_openssl_args_key_and_validity() {
        let args = openssl_args(
            "192.0.2.1",
            &PathBuf::from("/tmp/k.key"),
            &PathBuf::from("/tmp/c.crt"),
        );
        assert!(args.contains(&"rsa:2048".to_string()));
        assert!(args.contains(&"365".to_string()));
        assert!(args.contains(&"-nodes".to_string()));
    }
}
