//! harbor render コマンドハンドラ
//!
//! Compose 定義のみを書き出す。出力は同一設定でバイト一致するため、
//! 再実行前に diff で変更点を確認できる。

use crate::input::ConfigArgs;
use colored::Colorize;
use harborflow_core::ComposeFile;

pub async fn handle(args: ConfigArgs, to_stdout: bool) -> anyhow::Result<()> {
    let config = args.resolve(false)?;
    let yaml = ComposeFile::for_registry(&config).to_yaml()?;

    if to_stdout {
        print!("{}", yaml);
        return Ok(());
    }

    tokio::fs::create_dir_all(&config.root_dir).await?;
    let path = config.layout().compose_path();
    tokio::fs::write(&path, &yaml).await?;

    println!("{} Compose 定義を書き出しました", "✓".green().bold());
    println!("  {}", path.display().to_string().cyan());

    Ok(())
}
