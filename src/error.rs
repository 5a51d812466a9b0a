use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReclassifyError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("データベースに接続できません: {0}")]
    Connection(String),

    #[error("データベースエラー: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("不正な列名・テーブル名: {0}")]
    InvalidIdentifier(String),

    #[error("商品が見つかりません: ID {0}")]
    ProductNotFound(i64),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] reclassify_common::Error),
}

pub type Result<T> = std::result::Result<T, ReclassifyError>;
