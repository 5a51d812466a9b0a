//! 再分類レポート
//!
//! 変更計画を集計してJSONに保存し、コンソールに要約を表示する。

use crate::error::Result;
use crate::planner::Plan;
use reclassify_common::Basis;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// レポート詳細で残す説明の最大文字数
pub const DESCRIPTION_PREVIEW_CHARS: usize = 50;

/// 実行モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// 分析のみ（変更なし）
    Analysis,
    /// 変更を適用
    Apply,
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Analysis => write!(f, "analysis"),
            RunMode::Apply => write!(f, "apply"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportDetail {
    pub id: i64,
    pub description: String,
    pub current_category: String,
    pub new_category: String,
    pub confidence: f64,
    pub basis: Basis,
    pub change: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: String,
    pub mode: RunMode,
    pub total_products: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    /// "旧 → 新" ごとの件数
    pub changes_by_category: BTreeMap<String, usize>,
    pub details: Vec<ReportDetail>,
}

impl Report {
    pub fn build(plan: &Plan, mode: RunMode) -> Self {
        let mut changes_by_category = BTreeMap::new();
        let mut changed = 0;
        let mut unchanged = 0;
        let mut details = Vec::with_capacity(plan.changes.len());

        for change in &plan.changes {
            let needs_update = change.needs_update();
            if needs_update {
                changed += 1;
                let key = format!("{} → {}", change.current_category, change.new_category.name);
                *changes_by_category.entry(key).or_insert(0) += 1;
            } else {
                unchanged += 1;
            }

            details.push(ReportDetail {
                id: change.product_id,
                description: truncate_chars(&change.description, DESCRIPTION_PREVIEW_CHARS),
                current_category: change.current_category.clone(),
                new_category: change.new_category.name.clone(),
                confidence: change.confidence,
                basis: change.basis,
                change: needs_update,
            });
        }

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            mode,
            total_products: plan.total(),
            changed,
            unchanged,
            skipped: plan.skipped.len(),
            changes_by_category,
            details,
        }
    }

    /// 件数の多い順（同数は名前順）
    pub fn transitions_by_count(&self) -> Vec<(&str, usize)> {
        let mut transitions: Vec<(&str, usize)> = self
            .changes_by_category
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        transitions.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        transitions
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn print_summary(&self) {
        println!("{}", "=".repeat(60));
        println!("分析結果");
        println!("{}", "=".repeat(60));
        println!("分析した商品数: {}", format_count(self.total_products));
        println!("変更が必要な商品: {}", format_count(self.changed));
        println!("変更なしの商品: {}", format_count(self.unchanged));
        if self.skipped > 0 {
            println!("分類できなかった商品: {}", format_count(self.skipped));
        }
        println!();

        let transitions = self.transitions_by_count();
        if !transitions.is_empty() {
            println!("カテゴリ別の変更:");
            for (transition, count) in transitions {
                println!("  {}: {}", transition, format_count(count));
            }
            println!();
        }
    }
}

/// 文字数で切り詰め、超えた場合は "..." を付ける
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// 3桁区切り（12,345）
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
