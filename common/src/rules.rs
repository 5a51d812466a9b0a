//! カテゴリ固有のボーナス規則
//!
//! 正規化済みテキストに対する判定条件と加点値の組。
//! カテゴリごとに順序付きリストとして保持し、スコア計算側は中身を知らない。

use crate::error::{Error, Result};
use regex::Regex;

/// 判定条件
#[derive(Debug, Clone)]
pub enum RuleMatcher {
    /// 正規表現に一致
    Pattern(Regex),
    /// いずれかの語を部分文字列として含む
    ContainsAny(Vec<String>),
}

impl RuleMatcher {
    /// 正規化済みテキストに一致するか
    pub fn matches(&self, normalized: &str) -> bool {
        match self {
            RuleMatcher::Pattern(re) => re.is_match(normalized),
            RuleMatcher::ContainsAny(words) => words.iter().any(|w| normalized.contains(w.as_str())),
        }
    }
}

/// ボーナス規則
#[derive(Debug, Clone)]
pub struct BonusRule {
    /// 表示用ラベル
    pub label: String,
    pub matcher: RuleMatcher,
    /// 加点値（0以上）
    pub bonus: f64,
}

impl BonusRule {
    /// 正規表現規則を作成
    pub fn pattern(label: &str, pattern: &str, bonus: f64) -> Result<Self> {
        Self::checked(label, RuleMatcher::Pattern(Regex::new(pattern)?), bonus)
    }

    /// 部分一致規則を作成（語は小文字化される）
    pub fn contains_any<S: AsRef<str>>(label: &str, words: &[S], bonus: f64) -> Result<Self> {
        let words: Vec<String> = words
            .iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Err(Error::Catalog(format!("ボーナス規則「{}」に語がありません", label)));
        }
        Self::checked(label, RuleMatcher::ContainsAny(words), bonus)
    }

    fn checked(label: &str, matcher: RuleMatcher, bonus: f64) -> Result<Self> {
        if !bonus.is_finite() || bonus < 0.0 {
            return Err(Error::Catalog(format!(
                "ボーナス規則「{}」の加点値が不正です: {}",
                label, bonus
            )));
        }
        Ok(Self {
            label: label.to_string(),
            matcher,
            bonus,
        })
    }

    /// 一致すれば加点値、しなければ0
    pub fn apply(&self, normalized: &str) -> f64 {
        if self.matcher.matches(normalized) {
            self.bonus
        } else {
            0.0
        }
    }
}
