use crate::error::{ReclassifyError, Result};
use reclassify_common::{CatalogFile, Classifier, KeywordCatalog};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// データベースパスを上書きする環境変数
pub const DATABASE_ENV: &str = "RECLASSIFY_DB";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLiteデータベースファイル
    pub database: PathBuf,
    /// JSONレポートの出力先
    pub report_path: PathBuf,
    /// カスタムカタログ（未指定なら組み込みカタログ）
    pub catalog_path: Option<PathBuf>,
    /// 商品テーブルの列対応
    pub table: TableConfig,
    /// 分析モードで表示する変更例の件数
    pub examples_shown: usize,
}

/// 商品テーブルの列対応
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub name: String,
    pub id_column: String,
    pub description_column: String,
    /// 商品名の列（無い場合は説明のみで分類）
    pub name_column: Option<String>,
    pub category_column: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "articulos".into(),
            id_column: "art_consecutivo".into(),
            description_column: "art_descripcion".into(),
            name_column: None,
            category_column: "art_clase".into(),
        }
    }
}

impl TableConfig {
    /// テーブル名・列名がSQL識別子として安全か検証
    pub fn validate(&self) -> Result<()> {
        lazy_static::lazy_static! {
            static ref IDENT_RE: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
        }

        let names = [
            Some(&self.name),
            Some(&self.id_column),
            Some(&self.description_column),
            self.name_column.as_ref(),
            Some(&self.category_column),
        ];

        for name in names.into_iter().flatten() {
            if !IDENT_RE.is_match(name) {
                return Err(ReclassifyError::InvalidIdentifier(name.clone()));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("productos.db"),
            report_path: PathBuf::from("scripts/reporte_reclasificacion.json"),
            catalog_path: None,
            table: TableConfig::default(),
            examples_shown: 10,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（無ければデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ReclassifyError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("product-reclassifier").join("config.json"))
    }

    /// 使用するデータベースパス
    ///
    /// 優先順位: 引数 > 環境変数 > 設定ファイル
    pub fn database_path(&self, cli_override: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_override {
            return path.to_path_buf();
        }
        // 環境変数を優先
        if let Ok(path) = std::env::var(DATABASE_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }
        self.database.clone()
    }

    pub fn set_database(&mut self, path: PathBuf) -> Result<()> {
        self.database = path;
        self.save()
    }

    /// カタログを読み込んで分類器を作る
    pub fn classifier(&self, cli_override: Option<&Path>) -> Result<Classifier> {
        let path = cli_override.or(self.catalog_path.as_deref());
        let catalog = match path {
            Some(path) => load_catalog(path)?,
            None => KeywordCatalog::reference(),
        };
        Ok(Classifier::new(catalog))
    }
}

/// カタログJSONを読み込んで検証
pub fn load_catalog(path: &Path) -> Result<KeywordCatalog> {
    if !path.exists() {
        return Err(ReclassifyError::FileNotFound(path.display().to_string()));
    }
    let catalog = CatalogFile::from_file(path)?.into_catalog()?;
    Ok(catalog)
}
