mod commands;
mod input;
mod steps;

use clap::{Parser, Subcommand};
use input::ConfigArgs;

#[derive(Parser)]
#[command(name = "harbor")]
#[command(about = "積んで、配る。プライベートレジストリは、ひとつのコマンドで。", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// レジストリを構築して起動（root 必須）
    Up {
        #[command(flatten)]
        config: ConfigArgs,
        /// スキップするステップID（カンマ区切り。例: trust,verify）
        #[arg(long)]
        skip: Option<String>,
    },
    /// Compose 定義だけを書き出す（root 不要、diff 確認用）
    Render {
        #[command(flatten)]
        config: ConfigArgs,
        /// ファイルに書かず標準出力へ
        #[arg(long)]
        stdout: bool,
    },
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    match cli.command {
        Commands::Up { config, skip } => {
            commands::up::handle(config, skip.as_deref()).await?;
        }
        Commands::Render { config, stdout } => {
            commands::render::handle(config, stdout).await?;
        }
        Commands::Version => {
            println!("harborflow {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
