//! 商品ストア
//!
//! 商品の読み出しとカテゴリ更新だけを行う。テーブル名・列名は設定から受け取る。

use crate::config::TableConfig;
use crate::error::{ReclassifyError, Result};
use rusqlite::types::Value;
use rusqlite::{params, Connection, OpenFlags, Row};
use std::path::Path;

/// 再分類対象の商品
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub description: String,
    pub name: Option<String>,
    /// 現在保存されているカテゴリID
    pub category_id: Option<i64>,
}

/// 商品ストアのインターフェース
pub trait ProductStore {
    /// 説明が空でない商品をID順に取得
    fn fetch_products(&self) -> Result<Vec<Product>>;

    /// 商品のカテゴリを更新
    fn update_category(&self, product_id: i64, category_id: u32) -> Result<()>;
}

/// SQLite実装
pub struct SqliteStore {
    conn: Connection,
    table: TableConfig,
}

impl SqliteStore {
    /// 既存のデータベースを開く（新規作成はしない）
    pub fn open(path: &Path, table: TableConfig) -> Result<Self> {
        if !path.exists() {
            return Err(ReclassifyError::Connection(format!(
                "{} が存在しません",
                path.display()
            )));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| ReclassifyError::Connection(format!("{}: {}", path.display(), e)))?;

        Self::from_connection(conn, table)
    }

    /// 既存の接続から作成（テーブルの存在を確認する）
    pub fn from_connection(conn: Connection, table: TableConfig) -> Result<Self> {
        table.validate()?;

        let exists: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![&table.name],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(ReclassifyError::Connection(format!(
                "テーブル {} がありません",
                table.name
            )));
        }

        Ok(Self { conn, table })
    }

    fn select_sql(&self) -> String {
        let t = &self.table;
        let name_expr = t.name_column.as_deref().unwrap_or("NULL");
        format!(
            "SELECT {id}, {desc}, {name}, {cat} FROM {table}
             WHERE {desc} IS NOT NULL AND {desc} != ''
             ORDER BY {id}",
            id = t.id_column,
            desc = t.description_column,
            name = name_expr,
            cat = t.category_column,
            table = t.name,
        )
    }

    fn map_product(row: &Row) -> std::result::Result<Product, rusqlite::Error> {
        Ok(Product {
            id: row.get(0)?,
            description: row.get(1)?,
            name: row.get(2)?,
            category_id: Self::category_value(row.get(3)?),
        })
    }

    /// 整数として読めないカテゴリ値は未設定として扱う（"Desconocida"表示）
    fn category_value(value: Value) -> Option<i64> {
        match value {
            Value::Integer(id) => Some(id),
            Value::Text(text) => text.trim().parse().ok(),
            other => {
                tracing::debug!(value = ?other, "整数でないカテゴリ値");
                None
            }
        }
    }
}

impl ProductStore for SqliteStore {
    fn fetch_products(&self) -> Result<Vec<Product>> {
        let mut stmt = self.conn.prepare(&self.select_sql())?;
        let rows = stmt.query_map([], Self::map_product)?;

        let mut products = Vec::new();
        for product in rows {
            products.push(product?);
        }

        Ok(products)
    }

    fn update_category(&self, product_id: i64, category_id: u32) -> Result<()> {
        let sql = format!(
            "UPDATE {} SET {} = ?1 WHERE {} = ?2",
            self.table.name, self.table.category_column, self.table.id_column
        );
        let changed = self.conn.execute(&sql, params![category_id, product_id])?;
        if changed == 0 {
            return Err(ReclassifyError::ProductNotFound(product_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store(table: TableConfig) -> SqliteStore {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE articulos (
                art_consecutivo INTEGER PRIMARY KEY,
                art_descripcion TEXT,
                art_nombre TEXT,
                art_clase INTEGER
            );
            INSERT INTO articulos VALUES (3, 'moto yamaha', 'Moto', 2);
            INSERT INTO articulos VALUES (1, 'anillo de oro', NULL, 1);
            INSERT INTO articulos VALUES (2, '', 'vacío', 2);
            INSERT INTO articulos VALUES (4, NULL, NULL, NULL);
            INSERT INTO articulos VALUES (5, 'mesa', NULL, NULL);
            ",
        )
        .unwrap();
        SqliteStore::from_connection(conn, table).unwrap()
    }

    #[test]
    fn test_fetch_skips_empty_and_orders_by_id() {
        let store = memory_store(TableConfig::default());
        let products = store.fetch_products().unwrap();
        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert_eq!(products[0].category_id, Some(1));
        assert_eq!(products[2].category_id, None);
        assert!(products.iter().all(|p| p.name.is_none()));
    }

    #[test]
    fn test_fetch_with_name_column() {
        let table = TableConfig {
            name_column: Some("art_nombre".into()),
            ..Default::default()
        };
        let store = memory_store(table);
        let products = store.fetch_products().unwrap();
        assert_eq!(products[1].name.as_deref(), Some("Moto"));
    }

    #[test]
    fn test_non_integer_category_is_unknown() {
        let store = memory_store(TableConfig::default());
        store
            .conn
            .execute_batch(
                "
                INSERT INTO articulos VALUES (6, 'collar', NULL, 'joyeria');
                INSERT INTO articulos VALUES (7, 'carro', NULL, ' 3 ');
                INSERT INTO articulos VALUES (8, 'silla', NULL, 2.5);
                ",
            )
            .unwrap();

        let products = store.fetch_products().unwrap();
        let category = |id: i64| products.iter().find(|p| p.id == id).unwrap().category_id;
        assert_eq!(category(6), None);
        assert_eq!(category(7), Some(3));
        assert_eq!(category(8), None);
    }

    #[test]
    fn test_update_category() {
        let store = memory_store(TableConfig::default());
        store.update_category(3, 3).unwrap();
        let products = store.fetch_products().unwrap();
        let moto = products.iter().find(|p| p.id == 3).unwrap();
        assert_eq!(moto.category_id, Some(3));
    }

    #[test]
    fn test_update_missing_product() {
        let store = memory_store(TableConfig::default());
        let result = store.update_category(99, 1);
        assert!(matches!(result, Err(ReclassifyError::ProductNotFound(99))));
    }

    #[test]
    fn test_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        let result = SqliteStore::from_connection(conn, TableConfig::default());
        assert!(matches!(result, Err(ReclassifyError::Connection(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let result = SqliteStore::open(Path::new("/nonexistent/productos.db"), TableConfig::default());
        assert!(matches!(result, Err(ReclassifyError::Connection(_))));
    }
}
