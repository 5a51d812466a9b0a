//! 分類器
//!
//! 全カテゴリのスコアを計算し、最大のものを採用する。
//! 同点はカタログ順で先のカテゴリ。全て0ならフォールバックを使う。

use crate::catalog::{Category, KeywordCatalog};
use crate::normalize::normalize;
use crate::scorer::score_normalized;
use serde::Serialize;

/// フォールバック時の信頼度
pub const FALLBACK_CONFIDENCE: f64 = 1.0;

/// 分類結果の根拠
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    /// キーワードスコアによる判定
    Keywords,
    /// スコアが全て0でフォールバックを使用
    Fallback,
    /// テキストが空で判定不能
    Empty,
}

impl std::fmt::Display for Basis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Basis::Keywords => write!(f, "keywords"),
            Basis::Fallback => write!(f, "fallback"),
            Basis::Empty => write!(f, "empty"),
        }
    }
}

/// 分類結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub category: Option<Category>,
    /// 採用カテゴリのスコア（確率ではない）
    pub confidence: f64,
    pub basis: Basis,
}

impl Classification {
    fn empty() -> Self {
        Self {
            category: None,
            confidence: 0.0,
            basis: Basis::Empty,
        }
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    pub fn category_id(&self) -> Option<u32> {
        self.category.as_ref().map(|c| c.id)
    }
}

/// カテゴリ別スコア
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: f64,
}

/// キーワード分類器
#[derive(Debug, Clone)]
pub struct Classifier {
    catalog: KeywordCatalog,
}

impl Classifier {
    pub fn new(catalog: KeywordCatalog) -> Self {
        Self { catalog }
    }

    /// 参照カタログを使う分類器
    pub fn reference() -> Self {
        Self::new(KeywordCatalog::reference())
    }

    pub fn catalog(&self) -> &KeywordCatalog {
        &self.catalog
    }

    /// カタログ順のカテゴリ一覧
    pub fn list_categories(&self) -> &[Category] {
        self.catalog.categories()
    }

    /// 商品を分類する
    ///
    /// 名前と説明を連結したテキストが空なら `category: None`、信頼度0。
    pub fn classify(&self, description: &str, name: Option<&str>) -> Classification {
        let combined = combine(description, name);
        if combined.is_empty() {
            return Classification::empty();
        }

        let normalized = normalize(&combined);

        let mut best: Option<(&Category, f64)> = None;
        for entry in self.catalog.entries() {
            let score = score_normalized(&normalized, entry);
            // 厳密に大きい場合のみ更新（同点はカタログ順で先のもの）
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((&entry.category, score));
            }
        }

        match best {
            Some((category, score)) if score > 0.0 => Classification {
                category: Some(category.clone()),
                confidence: score,
                basis: Basis::Keywords,
            },
            _ => self.fallback(&combined),
        }
    }

    /// カテゴリ別スコア（カタログ順）
    pub fn scores(&self, description: &str, name: Option<&str>) -> Vec<CategoryScore> {
        let normalized = normalize(&combine(description, name));
        self.catalog
            .entries()
            .iter()
            .map(|entry| CategoryScore {
                category: entry.category.clone(),
                score: score_normalized(&normalized, entry),
            })
            .collect()
    }

    /// 正規化前の小文字テキストで優先順位チェック
    fn fallback(&self, combined: &str) -> Classification {
        let lowered = combined.to_lowercase();
        let id = self.catalog.fallback().resolve(&lowered);
        Classification {
            category: self.catalog.category(id).cloned(),
            confidence: FALLBACK_CONFIDENCE,
            basis: Basis::Fallback,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::reference()
    }
}

/// 名前 + 説明（名前が先）
fn combine(description: &str, name: Option<&str>) -> String {
    format!("{} {}", name.unwrap_or(""), description).trim().to_string()
}
