use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarborError {
    #[error(
        "入力が不足しています: {0}\nヒント: 引数、環境変数、またはプロンプトで指定してください"
    )]
    MissingInput(&'static str),

    #[error("root 権限が必要です\nヒント: sudo harbor up で実行してください")]
    NotRoot,

    #[error("ファイル読み込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML 生成エラー: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, HarborError>;
