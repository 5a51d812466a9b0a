//! キーワードカタログ
//!
//! カテゴリ → キーワード列・ボーナス規則の対応表と、
//! スコアが全て0のときに使う優先順位付きフォールバックを保持する。
//! 構築時に整合性を検証し、以後は変更しない。

use crate::error::{Error, Result};
use crate::rules::BonusRule;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 商品カテゴリ（IDと表示名）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

impl Category {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// カテゴリ1件分のキーワードと規則
#[derive(Debug, Clone)]
pub struct CategoryEntry {
    pub category: Category,
    /// キーワード列（小文字、順序・重複を保持）
    pub keywords: Vec<String>,
    /// ボーナス規則（定義順に評価）
    pub rules: Vec<BonusRule>,
    keyword_set: HashSet<String>,
}

impl CategoryEntry {
    pub fn new<S: AsRef<str>>(category: Category, keywords: &[S], rules: Vec<BonusRule>) -> Result<Self> {
        let mut normalized = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                return Err(Error::Catalog(format!(
                    "カテゴリ「{}」に空のキーワードがあります",
                    category.name
                )));
            }
            normalized.push(keyword);
        }

        let keyword_set = normalized.iter().cloned().collect();

        Ok(Self {
            category,
            keywords: normalized,
            rules,
            keyword_set,
        })
    }

    /// トークンがキーワードと完全一致するか
    pub fn is_keyword(&self, token: &str) -> bool {
        self.keyword_set.contains(token)
    }
}

/// フォールバックの1段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackStep {
    pub category_id: u32,
    pub words: Vec<String>,
}

/// 優先順位付きフォールバック
///
/// 先頭の段から順に、語のいずれかを含むかを調べる。
/// どれにも当たらなければ `default_id`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fallback {
    pub chain: Vec<FallbackStep>,
    pub default_id: u32,
}

impl Fallback {
    /// 小文字化済みの生テキストからカテゴリIDを決める
    pub fn resolve(&self, lowered: &str) -> u32 {
        self.chain
            .iter()
            .find(|step| step.words.iter().any(|w| lowered.contains(w.as_str())))
            .map(|step| step.category_id)
            .unwrap_or(self.default_id)
    }
}

/// キーワードカタログ
#[derive(Debug, Clone)]
pub struct KeywordCatalog {
    entries: Vec<CategoryEntry>,
    categories: Vec<Category>,
    fallback: Fallback,
}

impl KeywordCatalog {
    /// カタログを構築する
    ///
    /// ID・名前の重複、空カタログ、フォールバックが未知のカテゴリを
    /// 指している場合はエラー。
    pub fn new(entries: Vec<CategoryEntry>, mut fallback: Fallback) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::Catalog("カテゴリが1件もありません".into()));
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for entry in &entries {
            if !ids.insert(entry.category.id) {
                return Err(Error::Catalog(format!(
                    "カテゴリIDが重複しています: {}",
                    entry.category.id
                )));
            }
            if !names.insert(entry.category.name.as_str()) {
                return Err(Error::Catalog(format!(
                    "カテゴリ名が重複しています: {}",
                    entry.category.name
                )));
            }
        }

        let referenced = fallback
            .chain
            .iter()
            .map(|step| step.category_id)
            .chain(std::iter::once(fallback.default_id));
        for id in referenced {
            if !ids.contains(&id) {
                return Err(Error::Catalog(format!(
                    "フォールバックが未知のカテゴリIDを参照しています: {}",
                    id
                )));
            }
        }

        for step in &mut fallback.chain {
            let mut words = Vec::with_capacity(step.words.len());
            for word in &step.words {
                let word = word.trim().to_lowercase();
                if word.is_empty() {
                    return Err(Error::Catalog(format!(
                        "フォールバック語が空です (カテゴリID {})",
                        step.category_id
                    )));
                }
                words.push(word);
            }
            step.words = words;
        }

        let categories = entries.iter().map(|e| e.category.clone()).collect();

        Ok(Self {
            entries,
            categories,
            fallback,
        })
    }

    /// 組み込みの参照カタログ（Joyas / Mercancía / Vehículos）
    pub fn reference() -> Self {
        crate::reference::reference_catalog()
    }

    /// カタログ順のエントリ
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    /// カタログ順のカテゴリ一覧
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: u32) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }
}
