//! カタログファイル（JSON）
//!
//! 参照カタログ以外のカテゴリ構成をコード変更なしで使うための形式。
//!
//! ```json
//! {
//!   "categories": [
//!     { "id": 1, "name": "Joyas", "keywords": ["oro", "plata"],
//!       "bonuses": [{ "label": "quilates", "pattern": "\\b18k\\b", "bonus": 5 }] }
//!   ],
//!   "fallback": { "chain": [{ "category_id": 1, "words": ["oro"] }], "default_id": 1 }
//! }
//! ```

use crate::catalog::{Category, CategoryEntry, Fallback, KeywordCatalog};
use crate::error::{Error, Result};
use crate::rules::{BonusRule, RuleMatcher};
use serde::{Deserialize, Serialize};

/// ボーナス規則の定義（`pattern` と `contains_any` のどちらか一方）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusSpec {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_any: Option<Vec<String>>,
    pub bonus: f64,
}

/// カテゴリ定義
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub id: u32,
    pub name: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub bonuses: Vec<BonusSpec>,
}

/// カタログファイル全体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub categories: Vec<CategorySpec>,
    pub fallback: Fallback,
}

impl CatalogFile {
    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let file: Self = serde_json::from_str(json)?;
        Ok(file)
    }

    /// JSON文字列に変換
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 検証してカタログを構築
    pub fn into_catalog(self) -> Result<KeywordCatalog> {
        let mut entries = Vec::with_capacity(self.categories.len());
        for spec in self.categories {
            let rules = spec
                .bonuses
                .iter()
                .map(BonusSpec::to_rule)
                .collect::<Result<Vec<_>>>()?;
            entries.push(CategoryEntry::new(
                Category::new(spec.id, &spec.name),
                spec.keywords.as_slice(),
                rules,
            )?);
        }
        KeywordCatalog::new(entries, self.fallback)
    }

    /// 既存カタログからファイル形式へ
    pub fn from_catalog(catalog: &KeywordCatalog) -> Self {
        let categories = catalog
            .entries()
            .iter()
            .map(|entry| CategorySpec {
                id: entry.category.id,
                name: entry.category.name.clone(),
                keywords: entry.keywords.clone(),
                bonuses: entry.rules.iter().map(BonusSpec::from_rule).collect(),
            })
            .collect();

        Self {
            categories,
            fallback: catalog.fallback().clone(),
        }
    }
}

impl BonusSpec {
    fn to_rule(&self) -> Result<BonusRule> {
        match (&self.pattern, &self.contains_any) {
            (Some(pattern), None) => BonusRule::pattern(&self.label, pattern, self.bonus),
            (None, Some(words)) => BonusRule::contains_any(&self.label, words.as_slice(), self.bonus),
            _ => Err(Error::Catalog(format!(
                "ボーナス規則「{}」は pattern か contains_any のどちらか一方を指定してください",
                self.label
            ))),
        }
    }

    fn from_rule(rule: &BonusRule) -> Self {
        let (pattern, contains_any) = match &rule.matcher {
            RuleMatcher::Pattern(re) => (Some(re.as_str().to_string()), None),
            RuleMatcher::ContainsAny(words) => (None, Some(words.clone())),
        };
        Self {
            label: rule.label.clone(),
            pattern,
            contains_any,
            bonus: rule.bonus,
        }
    }
}
