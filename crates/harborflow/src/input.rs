//! 入力解決
//!
//! 優先順位: CLI 引数 > 環境変数 > 対話プロンプト > デフォルト値。
//! プロンプト後も空のままなら MissingInput で中断する（ファイルシステムへの
//! 書き込みが始まる前に必ず確定させる）。

use clap::Args;
use harborflow_core::{
    DEFAULT_PORT, DEFAULT_ROOT_DIR, DEFAULT_USERNAME, HarborError, RegistryConfig,
};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// サーバーの IP アドレス（証明書の CN / SAN に入る）
    #[arg(long, env = "HARBOR_ADDR")]
    pub addr: Option<String>,

    /// Basic 認証のユーザー名
    #[arg(short, long, env = "HARBOR_USER", default_value = DEFAULT_USERNAME)]
    pub username: String,

    /// Basic 認証のパスワード（未指定なら非表示プロンプト）
    #[arg(long, env = "HARBOR_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// ホスト側に公開するポート
    #[arg(short, long, env = "HARBOR_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// 生成物を置くディレクトリ
    #[arg(long = "dir", env = "HARBOR_DIR", default_value = DEFAULT_ROOT_DIR)]
    pub root_dir: PathBuf,
}

impl ConfigArgs {
    /// 設定を確定する。require_password が false の操作（render 等）では
    /// パスワードを要求しない。
    pub fn resolve(self, require_password: bool) -> Result<RegistryConfig, HarborError> {
        let addr = match self.addr {
            Some(a) if !a.trim().is_empty() => a,
            _ => prompt_line("サーバーの IP アドレス")?,
        };
        if addr.trim().is_empty() {
            return Err(HarborError::MissingInput("addr"));
        }

        let password = if require_password {
            let pass = match self.password {
                Some(p) if !p.is_empty() => p,
                _ => prompt_password("レジストリのパスワード")?,
            };
            if pass.is_empty() {
                return Err(HarborError::MissingInput("password"));
            }
            pass
        } else {
            self.password.unwrap_or_default()
        };

        RegistryConfig::new(addr, self.username, password, self.port, self.root_dir)
    }
}

/// 1 行プロンプト。EOF・未入力は空文字で返す（呼び出し側で MissingInput にする）
fn prompt_line(label: &str) -> Result<String, HarborError> {
    print!("{}: ", label);
    std::io::stdout().flush()?;

    let mut buf = String::new();
    std::io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}

/// 非表示のパスワードプロンプト
fn prompt_password(label: &str) -> Result<String, HarborError> {
    rpassword::prompt_password(format!("{}: ", label)).map_err(HarborError::Io)
}
