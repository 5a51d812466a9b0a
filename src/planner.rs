//! 変更計画
//!
//! 商品ごとに分類器を実行し、保存済みカテゴリと比較して
//! 更新が必要かどうかを決める。永続化は行わない。

use crate::storage::Product;
use indicatif::ProgressBar;
use rayon::prelude::*;
use reclassify_common::{Basis, Category, Classifier, KeywordCatalog};
use serde::Serialize;

/// カタログに無いカテゴリIDの表示名
pub const UNKNOWN_CATEGORY: &str = "Desconocida";

/// 1商品分の分類結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedChange {
    pub product_id: i64,
    pub description: String,
    pub current_category_id: Option<i64>,
    /// 現在のカテゴリ名（未知なら `Desconocida`）
    pub current_category: String,
    pub new_category: Category,
    pub confidence: f64,
    pub basis: Basis,
}

impl PlannedChange {
    /// 保存済みIDと分類結果のIDが異なる
    pub fn needs_update(&self) -> bool {
        self.current_category_id != Some(i64::from(self.new_category.id))
    }
}

/// 変更計画
#[derive(Debug, Clone, Default)]
pub struct Plan {
    /// 入力順の分類結果
    pub changes: Vec<PlannedChange>,
    /// テキストが空で分類できなかった商品ID
    pub skipped: Vec<i64>,
}

impl Plan {
    /// 更新が必要な変更
    pub fn updates(&self) -> impl Iterator<Item = &PlannedChange> {
        self.changes.iter().filter(|c| c.needs_update())
    }

    pub fn update_count(&self) -> usize {
        self.updates().count()
    }

    pub fn total(&self) -> usize {
        self.changes.len() + self.skipped.len()
    }
}

/// 保存済みIDをカテゴリ名に変換
pub fn category_label(catalog: &KeywordCatalog, id: Option<i64>) -> String {
    id.and_then(|id| u32::try_from(id).ok())
        .and_then(|id| catalog.category(id))
        .map(|c| c.name.clone())
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
}

/// 全商品を分類して変更計画を作る
///
/// 分類は商品ごとに独立しているので並列に実行する。結果は入力順。
pub fn plan_changes(
    products: &[Product],
    classifier: &Classifier,
    progress: Option<&ProgressBar>,
) -> Plan {
    let classified: Vec<_> = products
        .par_iter()
        .map(|product| {
            let result = classifier.classify(&product.description, product.name.as_deref());
            if let Some(pb) = progress {
                pb.inc(1);
            }
            (product, result)
        })
        .collect();

    let catalog = classifier.catalog();
    let mut plan = Plan::default();

    for (product, result) in classified {
        let Some(category) = result.category else {
            tracing::debug!(product_id = product.id, "テキストが空のためスキップ");
            plan.skipped.push(product.id);
            continue;
        };

        plan.changes.push(PlannedChange {
            product_id: product.id,
            description: product.description.clone(),
            current_category_id: product.category_id,
            current_category: category_label(catalog, product.category_id),
            new_category: category,
            confidence: result.confidence,
            basis: result.basis,
        });
    }

    plan
}
