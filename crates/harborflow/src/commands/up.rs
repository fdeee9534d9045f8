//! harbor up コマンドハンドラ
//!
//! レジストリ構築の一連のステップを順に実行する。フローは一直線で、
//! どこかで失敗したら残りは実行せずに exit 1 で終了する。
//! 作成済みの生成物は後始末しない。

use crate::input::ConfigArgs;
use crate::steps::{ProvisionStep, StepLogger, parse_skip_steps};
use colored::Colorize;
use harborflow_core::HarborError;
use harborflow_provision::{ProvisionError, htpasswd, installer, launcher, prepare, tls, trust, verify};

pub async fn handle(args: ConfigArgs, skip: Option<&str>) -> anyhow::Result<()> {
    // 副作用を伴う処理の前に必ず権限を確認する
    ensure_root()?;

    let config = args.resolve(true)?;
    let layout = config.layout();
    let skip_steps = parse_skip_steps(skip);

    println!(
        "{}  {}",
        "Harbor Registry:".bold(),
        config.registry_host().cyan().bold()
    );
    println!(
        "  {} {}",
        "Dir:".dimmed(),
        layout.root_dir().display().to_string().dimmed()
    );
    println!();

    let mut logger = StepLogger::new();

    for step in ProvisionStep::all() {
        logger.start_step(step);

        if skip_steps.contains(&step) {
            logger.step_skipped("--skip 指定");
            continue;
        }

        let outcome: Result<Option<String>, ProvisionError> = match step {
            ProvisionStep::EnsureDocker => {
                if installer::is_installed().await {
                    logger.step_skipped("インストール済み");
                    continue;
                }
                logger.log_detail("Docker が見つかりません。apt リポジトリ経由でインストールします");
                installer::install()
                    .await
                    .map(|_| Some("Docker をインストールしました".to_string()))
            }
            ProvisionStep::PrepareDirs => prepare::directories(&layout).await.map(|_| None),
            ProvisionStep::GenerateCert => tls::generate(&config)
                .await
                .map(|_| Some(format!("SAN: IP:{}", config.addr))),
            ProvisionStep::WriteHtpasswd => htpasswd::write_credentials(&config)
                .await
                .map(|_| Some(format!("ユーザー: {}", config.username))),
            ProvisionStep::WriteCompose => launcher::write_definition(&config)
                .await
                .map(|path| Some(path.display().to_string())),
            ProvisionStep::LaunchService => {
                launcher::compose_up(layout.root_dir()).await.map(|_| None)
            }
            ProvisionStep::InstallTrust => trust::install(&config).await.map(|_| None),
            ProvisionStep::VerifyLogin => verify::login(&config)
                .await
                .map(|_| Some(format!("{} で認証できました", config.username))),
        };

        match outcome {
            Ok(message) => logger.step_success(message.as_deref()),
            Err(e) => {
                logger.step_failed(&e.to_string());
                logger.print_summary(&config.registry_host());
                return Err(e.into());
            }
        }
    }

    logger.print_summary(&config.registry_host());

    println!();
    println!("{}", "✓ レジストリの構築が完了しました".green().bold());
    println!(
        "  URL:  {}",
        format!("https://{}", config.registry_host()).cyan()
    );
    println!("  Push: docker push {}/<image>", config.registry_host());
    println!();
    println!(
        "{}",
        format!(
            "注意: /etc/docker/certs.d/{} を作成し、Docker デーモンを再起動しました（このホストの全ユーザーに影響します）",
            config.registry_host()
        )
        .yellow()
    );

    Ok(())
}

/// root 権限チェック
fn ensure_root() -> Result<(), HarborError> {
    if is_root() {
        Ok(())
    } else {
        Err(HarborError::NotRoot)
    }
}

fn is_root() -> bool {
    // SAFETY: geteuid は引数を取らず常に呼び出し可能
    unsafe { libc::geteuid() == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_root_follows_euid() {
        // CI は root / 非 root どちらでも走るため、euid と突き合わせる
        if is_root() {
            assert!(ensure_root().is_ok());
        } else {
            assert!(matches!(ensure_root(), Err(HarborError::NotRoot)));
        }
    }
}
