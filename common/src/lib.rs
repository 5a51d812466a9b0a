//! 商品再分類エンジン
//!
//! 商品名・説明の自由テキストをキーワードカタログに照らしてスコア化し、
//! カテゴリと信頼度を決める。I/Oは持たない純粋な処理のみ。

pub mod catalog;
pub mod classifier;
pub mod error;
pub mod file;
pub mod normalize;
pub mod reference;
pub mod rules;
pub mod scorer;

pub use catalog::{Category, CategoryEntry, Fallback, FallbackStep, KeywordCatalog};
pub use classifier::{Basis, Classification, CategoryScore, Classifier};
pub use error::{Error, Result};
pub use file::CatalogFile;
pub use normalize::normalize;
pub use rules::{BonusRule, RuleMatcher};
pub use scorer::{score, ScoreBreakdown};
