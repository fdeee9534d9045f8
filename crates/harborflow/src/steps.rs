//! 構築ステップの定義と進捗ログ
//!
//! 各ステップの進捗・所要時間を記録する。フローは一直線で、リトライは
//! 行わない（最初の失敗で打ち切る）。

use chrono::Local;
use colored::Colorize;
use std::time::{Duration, Instant};

/// 構築フローの各ステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStep {
    /// Docker / Compose プラグインの確認とインストール
    EnsureDocker,
    /// ディレクトリ作成
    PrepareDirs,
    /// 自己署名証明書の生成
    GenerateCert,
    /// 認証ファイル生成
    WriteHtpasswd,
    /// Compose 定義の書き出し
    WriteCompose,
    /// レジストリ起動
    LaunchService,
    /// 信頼ストア登録
    InstallTrust,
    /// ログイン確認
    VerifyLogin,
}

impl ProvisionStep {
    /// ステップの日本語名
    pub fn name(&self) -> &'static str {
        match self {
            Self::EnsureDocker => "Docker インストール確認",
            Self::PrepareDirs => "ディレクトリ作成",
            Self::GenerateCert => "自己署名証明書の生成",
            Self::WriteHtpasswd => "認証ファイル生成",
            Self::WriteCompose => "Compose 定義の書き出し",
            Self::LaunchService => "レジストリ起動",
            Self::InstallTrust => "信頼ストア登録",
            Self::VerifyLogin => "ログイン確認",
        }
    }

    /// ステップのID（--skipで使用）
    pub fn id(&self) -> &'static str {
        match self {
            Self::EnsureDocker => "docker",
            Self::PrepareDirs => "dirs",
            Self::GenerateCert => "cert",
            Self::WriteHtpasswd => "htpasswd",
            Self::WriteCompose => "compose",
            Self::LaunchService => "up",
            Self::InstallTrust => "trust",
            Self::VerifyLogin => "verify",
        }
    }

    /// 実行順の全ステップ
    pub fn all() -> Vec<Self> {
        vec![
            Self::EnsureDocker,
            Self::PrepareDirs,
            Self::GenerateCert,
            Self::WriteHtpasswd,
            Self::WriteCompose,
            Self::LaunchService,
            Self::InstallTrust,
            Self::VerifyLogin,
        ]
    }
}

/// ステップの実行結果
#[derive(Debug, Clone)]
pub enum StepResult {
    /// 成功
    Success { duration: Duration },
    /// スキップ（インストール済み、--skip 指定等）
    Skipped { reason: String },
    /// 失敗
    Failed { error: String, duration: Duration },
}

impl StepResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Skipped { .. })
    }

    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::Success { duration } => Some(*duration),
            Self::Failed { duration, .. } => Some(*duration),
            Self::Skipped { .. } => None,
        }
    }
}

/// ステップログ出力器
pub struct StepLogger {
    start_time: Instant,
    step_results: Vec<(ProvisionStep, StepResult)>,
    current_step: Option<(ProvisionStep, Instant)>,
}

impl StepLogger {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            step_results: Vec::new(),
            current_step: None,
        }
    }

    /// ステップ開始をログ出力
    pub fn start_step(&mut self, step: ProvisionStep) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        println!("[{}] {} {}", timestamp.dimmed(), "▶".cyan(), step.name());
        self.current_step = Some((step, Instant::now()));
    }

    /// ステップ成功をログ出力
    pub fn step_success(&mut self, message: Option<&str>) {
        if let Some((step, start)) = self.current_step.take() {
            let duration = start.elapsed();
            let timestamp = Local::now().format("%H:%M:%S").to_string();
            let duration_str = format_duration(duration);

            if let Some(msg) = message {
                println!(
                    "[{}] {} {} ({})",
                    timestamp.dimmed(),
                    "✓".green().bold(),
                    msg,
                    duration_str.dimmed()
                );
            } else {
                println!(
                    "[{}] {} {} 完了 ({})",
                    timestamp.dimmed(),
                    "✓".green().bold(),
                    step.name(),
                    duration_str.dimmed()
                );
            }

            self.step_results.push((step, StepResult::Success { duration }));
        }
    }

    /// ステップスキップをログ出力
    pub fn step_skipped(&mut self, reason: &str) {
        if let Some((step, _)) = self.current_step.take() {
            let timestamp = Local::now().format("%H:%M:%S").to_string();
            println!(
                "[{}] {} {} ({})",
                timestamp.dimmed(),
                "⏭".yellow(),
                step.name(),
                reason.dimmed()
            );

            self.step_results.push((
                step,
                StepResult::Skipped {
                    reason: reason.to_string(),
                },
            ));
        }
    }

    /// ステップ失敗をログ出力
    pub fn step_failed(&mut self, error: &str) {
        if let Some((step, start)) = self.current_step.take() {
            let duration = start.elapsed();
            let timestamp = Local::now().format("%H:%M:%S").to_string();

            println!(
                "[{}] {} {}: {}",
                timestamp.dimmed(),
                "✗".red().bold(),
                step.name(),
                error.red()
            );

            self.step_results.push((
                step,
                StepResult::Failed {
                    error: error.to_string(),
                    duration,
                },
            ));
        }
    }

    /// 詳細メッセージをログ出力
    pub fn log_detail(&self, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        println!("[{}]   → {}", timestamp.dimmed(), message.cyan());
    }

    /// サマリーを出力
    pub fn print_summary(&self, registry_host: &str) {
        let total_duration = self.start_time.elapsed();

        let error_count = self
            .step_results
            .iter()
            .filter(|(_, result)| matches!(result, StepResult::Failed { .. }))
            .count();

        let slowest_step = self
            .step_results
            .iter()
            .filter_map(|(step, result)| result.duration().map(|d| (step, d)))
            .max_by_key(|(_, d)| *d);

        println!();
        println!("{}", "═".repeat(44));
        println!("Provision Summary: {}", registry_host.cyan().bold());
        println!("{}", "─".repeat(44));
        println!("Total time:    {}", format_duration(total_duration).green());

        if let Some((step, duration)) = slowest_step {
            println!(
                "Slowest step:  {} ({})",
                step.name(),
                format_duration(duration)
            );
        }

        if error_count > 0 {
            println!("Errors:        {}", error_count.to_string().red().bold());
        } else {
            println!("Errors:        {}", "0".green());
        }
        println!("{}", "═".repeat(44));
    }

    /// 全ステップが成功したか
    pub fn all_success(&self) -> bool {
        self.step_results
            .iter()
            .all(|(_, result)| result.is_success())
    }
}

impl Default for StepLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Duration を読みやすい形式にフォーマット
fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 60 {
        let minutes = total_secs / 60;
        let secs = total_secs % 60;
        format!("{}m {}s", minutes, secs)
    } else if total_secs >= 1 {
        format!("{}.{}s", total_secs, millis / 100)
    } else {
        format!("{}ms", millis)
    }
}

/// スキップするステップを解析
pub fn parse_skip_steps(skip_arg: Option<&str>) -> Vec<ProvisionStep> {
    let Some(skip_str) = skip_arg else {
        return Vec::new();
    };

    skip_str
        .split(',')
        .filter_map(|s| {
            let s = s.trim();
            ProvisionStep::all().into_iter().find(|step| step.id() == s)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
    }

    #[test]
    fn test_parse_skip_steps() {
        let steps = parse_skip_steps(Some("trust,verify"));
        assert_eq!(steps.len(), 2);
        assert!(steps.contains(&ProvisionStep::InstallTrust));
        assert!(steps.contains(&ProvisionStep::VerifyLogin));
    }

    #[test]
    fn test_parse_skip_steps_ignores_unknown() {
        let steps = parse_skip_steps(Some("nosuch, cert"));
        assert_eq!(steps, vec![ProvisionStep::GenerateCert]);
    }

    #[test]
    fn test_step_order_starts_with_docker() {
        let steps = ProvisionStep::all();
        assert_eq!(steps.first(), Some(&ProvisionStep::EnsureDocker));
        assert_eq!(steps.last(), Some(&ProvisionStep::VerifyLogin));
    }

    #[test]
    fn test_logger_records_failure() {
        let mut logger = StepLogger::new();
        logger.start_step(ProvisionStep::GenerateCert);
        logger.step_failed("openssl が見つかりません");
        assert!(!logger.all_success());
    }
}
