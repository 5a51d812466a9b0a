use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use product_reclassifier::{apply, cli, config, planner, report, storage};
use cli::{Cli, Commands};
use config::Config;
use reclassify_common::CatalogFile;
use report::{format_count, truncate_chars, Report, RunMode};
use storage::{ProductStore, SqliteStore};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Run { apply: apply_requested, yes, db, report: report_override, examples } => {
            let classifier = config.classifier(cli.catalog.as_deref())?;
            let mode = if apply_requested { RunMode::Apply } else { RunMode::Analysis };

            banner("商品再分類");
            println!();

            // 1. 接続・読み込み
            let db_path = config.database_path(db.as_deref());
            let store = SqliteStore::open(&db_path, config.table.clone())
                .with_context(|| format!("データベース接続に失敗しました: {}", db_path.display()))?;
            println!("✔ データベースに接続: {}", db_path.display());

            println!("[1/3] 商品を読み込み中...");
            let products = store.fetch_products()?;
            println!("✔ {}件の商品を検出\n", format_count(products.len()));
            tracing::info!(count = products.len(), "products loaded");

            // 2. 分類
            println!("[2/3] 分類中...");
            let pb = progress_bar(products.len() as u64);
            let plan = planner::plan_changes(&products, &classifier, Some(&pb));
            pb.finish_and_clear();
            println!("✔ 分類完了\n");

            // 3. レポート
            println!("[3/3] レポートを作成中...\n");
            let report = Report::build(&plan, mode);
            report.print_summary();

            let report_path = report_override.unwrap_or_else(|| config.report_path.clone());
            report.save(&report_path)?;
            println!("✔ レポートを保存: {}\n", report_path.display());

            match mode {
                RunMode::Analysis => {
                    banner("分析モード（変更は適用されていません）");
                    println!("変更を適用するには:");
                    println!("  reclassify run --apply\n");

                    let limit = examples.unwrap_or(config.examples_shown);
                    if limit > 0 && plan.update_count() > 0 {
                        println!("変更例（先頭{}件）:", limit);
                        println!("{}", "-".repeat(60));
                        for change in plan.updates().take(limit) {
                            println!(
                                "ID {:6} | {:12} → {:12} | 信頼度: {:.1}",
                                change.product_id,
                                change.current_category,
                                change.new_category.name,
                                change.confidence
                            );
                            println!("  説明: {}\n", truncate_chars(&change.description, 70));
                        }
                    }
                }
                RunMode::Apply => {
                    banner("変更の適用");
                    let count = plan.update_count();
                    if count == 0 {
                        println!("✔ 更新が必要な商品はありません");
                        return Ok(());
                    }
                    println!("{}件の商品を更新します\n", format_count(count));

                    if !yes && !apply::confirm_apply(count)? {
                        println!("操作をキャンセルしました");
                        return Ok(());
                    }

                    println!("\n変更を適用中...");
                    let pb = progress_bar(count as u64);
                    let outcome = apply::apply_changes(&store, &plan, Some(&pb));
                    pb.finish_and_clear();

                    println!();
                    banner("結果");
                    println!("✔ 更新した商品: {}", format_count(outcome.updated));
                    if outcome.errors > 0 {
                        println!("✗ エラー: {}", format_count(outcome.errors));
                        for id in &outcome.failed_ids {
                            println!("  ✗ 商品 {} の更新に失敗", id);
                        }
                    }
                    println!("\n✅ 再分類が完了しました");
                }
            }
        }

        Commands::Classify { text, name } => {
            let classifier = config.classifier(cli.catalog.as_deref())?;
            let result = classifier.classify(&text, name.as_deref());

            println!("カテゴリ別スコア:");
            for score in classifier.scores(&text, name.as_deref()) {
                println!("  {:3} {:12} {:.2}", score.category.id, score.category.name, score.score);
            }
            println!();

            match &result.category {
                Some(category) => println!(
                    "→ {} (ID {}) 信頼度: {:.2} [{}]",
                    category.name, category.id, result.confidence, result.basis
                ),
                None => println!("→ 分類できません（テキストが空です）"),
            }
        }

        Commands::Categories { export } => {
            let classifier = config.classifier(cli.catalog.as_deref())?;

            println!("カテゴリ:");
            for entry in classifier.catalog().entries() {
                println!(
                    "  {:3} {:12} キーワード{}件 / ボーナス規則{}件",
                    entry.category.id,
                    entry.category.name,
                    entry.keywords.len(),
                    entry.rules.len()
                );
            }

            if let Some(path) = export {
                let json = CatalogFile::from_catalog(classifier.catalog()).to_json()?;
                std::fs::write(&path, json)
                    .with_context(|| format!("カタログを書き出せません: {}", path.display()))?;
                println!("\n✔ カタログを書き出しました: {}", path.display());
            }
        }

        Commands::Config { set_db, show } => {
            let mut config = config;

            if let Some(path) = set_db {
                config.set_database(path)?;
                println!("✔ データベースパスを設定しました");
            }

            if show {
                println!("設定:");
                println!("  データベース: {}", config.database_path(None).display());
                println!("  レポート: {}", config.report_path.display());
                println!(
                    "  カタログ: {}",
                    config
                        .catalog_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込み".into())
                );
                println!(
                    "  テーブル: {} ({}, {}, {})",
                    config.table.name,
                    config.table.id_column,
                    config.table.description_column,
                    config.table.category_column
                );
                println!("  変更例の表示件数: {}", config.examples_shown);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn banner(title: &str) {
    println!("{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len}") {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}
