use clap::{Parser, Subcommand};
use manifest_search_common::Flow;

#[derive(Parser)]
#[command(name = "manifest-search")]
#[command(about = "Destiny manifest definition search (hash + name)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 定義を検索（数値はハッシュ検索、3文字以上は名前検索）
    Search {
        /// 検索クエリ
        #[arg(required = true)]
        query: String,

        /// フロー (d1/d2)、省略時は設定のデフォルト
        #[arg(short, long)]
        flow: Option<Flow>,

        /// 1ソースあたりの最大件数
        #[arg(short, long)]
        limit: Option<u32>,

        /// 統合結果をJSONで出力
        #[arg(long)]
        json: bool,

        /// アイコンURLも表示
        #[arg(long)]
        icons: bool,
    },

    /// ハッシュで検索してレコード全体を表示
    Show {
        /// 定義ハッシュ
        #[arg(required = true)]
        hash: String,

        /// フロー (d1/d2)
        #[arg(short, long)]
        flow: Option<Flow>,

        /// 定義タイプで絞り込み（同じハッシュが複数タイプにある場合）
        #[arg(short = 't', long)]
        definition_type: Option<String>,
    },

    /// 対話的に検索
    Interactive {
        /// フロー (d1/d2)
        #[arg(short, long)]
        flow: Option<Flow>,
    },

    /// 設定を表示/編集
    Config {
        /// 検索サービスのベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// タイムアウト（ミリ秒）を設定
        #[arg(long)]
        set_timeout_ms: Option<u64>,

        /// デフォルトのフローを設定 (d1/d2)
        #[arg(long)]
        set_default_flow: Option<Flow>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
