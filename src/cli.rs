use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reclassify")]
#[command(about = "商品カタログのキーワード再分類ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// カスタムカタログJSON（省略時は設定ファイルまたは組み込みカタログ）
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 全商品を再分類してレポートを出力（デフォルトは分析のみ）
    Run {
        /// 変更をデータベースに適用
        #[arg(long, visible_alias = "actualizar")]
        apply: bool,

        /// 確認プロンプトを省略
        #[arg(short = 'y', long, requires = "apply")]
        yes: bool,

        /// SQLiteデータベースファイル
        #[arg(long)]
        db: Option<PathBuf>,

        /// レポートJSONの出力先
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// 表示する変更例の件数
        #[arg(short, long)]
        examples: Option<usize>,
    },

    /// テキスト1件を分類してカテゴリ別スコアを表示
    Classify {
        /// 商品説明
        #[arg(required = true)]
        text: String,

        /// 商品名
        #[arg(short, long)]
        name: Option<String>,
    },

    /// カテゴリ一覧を表示
    Categories {
        /// カタログをJSONで書き出す
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// データベースパスを設定
        #[arg(long)]
        set_db: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
