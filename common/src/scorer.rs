//! カテゴリスコア計算
//!
//! ## 計算式
//! 1. 完全一致トークン数 × 2
//! 2. + テキストに部分文字列として含まれるキーワード数
//! 3. + カテゴリ固有のボーナス規則
//! 4. トークン数が5を超えたら最後に × 1.1

use crate::catalog::CategoryEntry;
use crate::normalize::normalize;

/// 完全一致1件あたりの重み
pub const EXACT_MATCH_WEIGHT: f64 = 2.0;
/// この数を超えるトークンがあれば長文倍率を掛ける
pub const LONG_TEXT_TOKENS: usize = 5;
pub const LONG_TEXT_MULTIPLIER: f64 = 1.1;

/// スコアの内訳
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub exact_matches: usize,
    pub partial_matches: usize,
    pub bonus: f64,
    pub token_count: usize,
}

impl ScoreBreakdown {
    /// 最終スコア
    pub fn total(&self) -> f64 {
        let base = EXACT_MATCH_WEIGHT * self.exact_matches as f64 + self.partial_matches as f64;
        let score = base + self.bonus;
        if self.token_count > LONG_TEXT_TOKENS {
            score * LONG_TEXT_MULTIPLIER
        } else {
            score
        }
    }
}

/// 生テキストのスコアを計算
pub fn score(text: &str, entry: &CategoryEntry) -> f64 {
    score_normalized(&normalize(text), entry)
}

/// 正規化済みテキストのスコアを計算
pub fn score_normalized(normalized: &str, entry: &CategoryEntry) -> f64 {
    breakdown(normalized, entry).total()
}

/// 正規化済みテキストのスコア内訳
pub fn breakdown(normalized: &str, entry: &CategoryEntry) -> ScoreBreakdown {
    if normalized.is_empty() {
        return ScoreBreakdown::default();
    }

    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let exact_matches = tokens.iter().filter(|t| entry.is_keyword(t)).count();
    let partial_matches = entry
        .keywords
        .iter()
        .filter(|k| normalized.contains(k.as_str()))
        .count();
    let bonus = entry.rules.iter().map(|r| r.apply(normalized)).sum();

    ScoreBreakdown {
        exact_matches,
        partial_matches,
        bonus,
        token_count: tokens.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, KeywordCatalog};
    use crate::rules::BonusRule;

    fn plain(keywords: &[&str]) -> CategoryEntry {
        CategoryEntry::new(Category::new(1, "A"), keywords, vec![]).unwrap()
    }

    fn jewelry() -> CategoryEntry {
        KeywordCatalog::reference().entries()[0].clone()
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let entry = plain(&["oro"]);
        assert_eq!(score("", &entry), 0.0);
        assert_eq!(score(" ?! ", &entry), 0.0);
    }

    #[test]
    fn test_exact_counts_double() {
        // "oro" は完全一致(2) + 部分一致(1)
        let entry = plain(&["oro"]);
        assert_eq!(score("oro", &entry), 3.0);
        // "tesoro" は部分一致のみ
        assert_eq!(score("tesoro", &entry), 1.0);
    }

    #[test]
    fn test_exact_counts_every_token() {
        let entry = plain(&["oro"]);
        let b = breakdown("oro y oro", &entry);
        assert_eq!(b.exact_matches, 2);
        assert_eq!(b.partial_matches, 1);
        assert_eq!(b.total(), 5.0);
    }

    #[test]
    fn test_phrase_keyword_partial_match() {
        let entry = plain(&["oro blanco"]);
        let b = breakdown("anillo oro blanco", &entry);
        assert_eq!(b.exact_matches, 0);
        assert_eq!(b.partial_matches, 1);
    }

    #[test]
    fn test_repeated_keyword_counts_per_occurrence() {
        let entry = plain(&["moto", "moto"]);
        let b = breakdown("moto", &entry);
        assert_eq!(b.exact_matches, 1);
        assert_eq!(b.partial_matches, 2);
    }

    #[test]
    fn test_long_text_multiplier_applied_last() {
        // 6トークン、部分一致1 + ボーナス2 = 3 → 3.3
        let rule = BonusRule::contains_any("b", &["zz"], 2.0).unwrap();
        let entry = CategoryEntry::new(Category::new(1, "A"), &["xyz"], vec![rule]).unwrap();
        let s = score("axyz zz c d e f", &entry);
        assert!((s - 3.3).abs() < 1e-9, "score = {}", s);
    }

    #[test]
    fn test_five_tokens_no_multiplier() {
        let entry = plain(&["a"]);
        let b = breakdown("a b c d e", &entry);
        assert_eq!(b.token_count, 5);
        assert_eq!(b.total(), 3.0);
    }

    #[test]
    fn test_purity_bonus() {
        let entry = jewelry();
        let with = breakdown("cadena 18k", &entry);
        let without = breakdown("cadena 16k", &entry);
        assert!(with.bonus >= 5.0);
        assert_eq!(without.bonus, 0.0);
    }

    #[test]
    fn test_purity_bonus_with_space_and_kt() {
        let entry = jewelry();
        assert_eq!(breakdown("cadena 14 kt", &entry).bonus, 5.0);
        assert_eq!(breakdown("cadena 22kt", &entry).bonus, 5.0);
    }

    #[test]
    fn test_ring_bonus() {
        let entry = jewelry();
        assert_eq!(breakdown("argollas matrimonio", &entry).bonus, 3.0);
    }

    #[test]
    fn test_weight_bonus() {
        let entry = jewelry();
        assert_eq!(breakdown("cadena peso 12 gramos", &entry).bonus, 2.0);
        assert_eq!(breakdown("cadena peso ligero", &entry).bonus, 0.0);
    }

    #[test]
    fn test_weight_bonus_english() {
        let entry = jewelry();
        assert_eq!(breakdown("weight 12", &entry).bonus, 2.0);
        assert_eq!(breakdown("weight12", &entry).bonus, 0.0);
    }

    #[test]
    fn test_bonus_stacking() {
        let entry = jewelry();
        assert_eq!(breakdown("argolla 18k peso 4", &entry).bonus, 10.0);
    }
}
