//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use product_reclassifier::config::TableConfig;
use product_reclassifier::error::ReclassifyError;
use product_reclassifier::storage::SqliteStore;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないデータベースを開いた場合
#[test]
fn test_open_nonexistent_database() {
    let result = SqliteStore::open(Path::new("/nonexistent/path/12345.db"), TableConfig::default());
    assert!(matches!(result, Err(ReclassifyError::Connection(_))));
}

/// テーブルの無いデータベースを開いた場合
#[test]
fn test_open_database_without_table() {
    let dir = tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("empty.db");
    rusqlite::Connection::open(&db_path)
        .unwrap()
        .execute_batch("CREATE TABLE otra (id INTEGER);")
        .unwrap();

    let result = SqliteStore::open(&db_path, TableConfig::default());
    assert!(matches!(result, Err(ReclassifyError::Connection(_))));
}

/// 不正な列名は接続前に拒否
#[test]
fn test_open_with_invalid_column() {
    let dir = tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("productos.db");
    rusqlite::Connection::open(&db_path)
        .unwrap()
        .execute_batch("CREATE TABLE articulos (art_consecutivo INTEGER);")
        .unwrap();

    let table = TableConfig {
        description_column: "art_descripcion; DROP TABLE articulos".into(),
        ..Default::default()
    };
    let result = SqliteStore::open(&db_path, table);
    assert!(matches!(result, Err(ReclassifyError::InvalidIdentifier(_))));
}

/// ReclassifyErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ReclassifyError::Config("テスト設定エラー".to_string()),
        ReclassifyError::FileNotFound("catalog.json".to_string()),
        ReclassifyError::Connection("productos.db".to_string()),
        ReclassifyError::InvalidIdentifier("a b".to_string()),
        ReclassifyError::ProductNotFound(42),
        ReclassifyError::Prompt("入力中断".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

#[test]
fn test_product_not_found_message() {
    let display = format!("{}", ReclassifyError::ProductNotFound(42));
    assert!(display.contains("42"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: ReclassifyError = io_err.into();

    assert!(matches!(err, ReclassifyError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: ReclassifyError = json_err.into();

    assert!(matches!(err, ReclassifyError::JsonParse(_)));
}

/// SQLiteエラーからの変換
#[test]
fn test_database_error_conversion() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let db_err = conn.execute("SELECT * FROM nada", []).unwrap_err();
    let err: ReclassifyError = db_err.into();

    assert!(matches!(err, ReclassifyError::Database(_)));
}

/// 共通エラーは透過的に表示される
#[test]
fn test_common_error_transparent() {
    let common_err = reclassify_common::Error::Catalog("カテゴリが1件もありません".to_string());
    let err: ReclassifyError = common_err.into();

    assert!(matches!(err, ReclassifyError::Common(_)));
    assert!(format!("{}", err).contains("カテゴリが1件もありません"));
}
