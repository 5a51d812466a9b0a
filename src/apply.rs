//! 変更の適用
//!
//! 1件ずつ更新し、失敗してもログに残して続行する。

use crate::error::{ReclassifyError, Result};
use crate::planner::Plan;
use crate::storage::ProductStore;
use dialoguer::Input;
use indicatif::ProgressBar;

/// 適用結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyOutcome {
    pub updated: usize,
    pub errors: usize,
    /// 更新に失敗した商品ID
    pub failed_ids: Vec<i64>,
}

/// 更新が必要な商品だけを順に更新する
pub fn apply_changes<S: ProductStore + ?Sized>(
    store: &S,
    plan: &Plan,
    progress: Option<&ProgressBar>,
) -> ApplyOutcome {
    let mut outcome = ApplyOutcome::default();

    for change in plan.updates() {
        match store.update_category(change.product_id, change.new_category.id) {
            Ok(()) => outcome.updated += 1,
            Err(e) => {
                tracing::warn!(product_id = change.product_id, error = %e, "商品の更新に失敗");
                outcome.errors += 1;
                outcome.failed_ids.push(change.product_id);
            }
        }
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    outcome
}

/// 確認の回答が肯定か（sí / si / yes / y / s / はい）
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "sí" | "si" | "yes" | "y" | "s" | "はい"
    )
}

/// 適用前の確認プロンプト
pub fn confirm_apply(count: usize) -> Result<bool> {
    let input: String = Input::new()
        .with_prompt(format!("{}件の商品を更新します。続行しますか？ (sí/no)", count))
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ReclassifyError::Prompt(e.to_string()))?;

    Ok(is_affirmative(&input))
}
