//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// 分類処理そのものは失敗しない。カタログの読み込み・構築時のみ発生する。
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
