//! 検索設定とフロー（Destiny 1 / Destiny 2）ごとのポリシー

use crate::error::{Error, Result};
use crate::types::SearchSource;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://manifest.report";
pub const DEFAULT_ICON_BASE_URL: &str = "https://www.bungie.net";
pub const DEFAULT_MISSING_ICON_PATH: &str = "/img/misc/missing_icon_d2.png";

/// 検索設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// 検索サービスのベースURL
    pub base_url: String,
    /// 1リクエストあたりの最大件数
    pub result_limit: u32,
    /// レコード本体を含めるか（D2のみ送信）
    pub include_data: bool,
    pub debounce_ms: u64,
    /// 1リクエストのタイムアウト
    pub timeout_ms: u64,
    pub icon_base_url: String,
    pub missing_icon_path: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            result_limit: 1000,
            include_data: true,
            debounce_ms: crate::debounce::DEFAULT_DEBOUNCE_MS,
            timeout_ms: 8000,
            icon_base_url: DEFAULT_ICON_BASE_URL.into(),
            missing_icon_path: DEFAULT_MISSING_ICON_PATH.into(),
        }
    }
}

impl SearchConfig {
    /// 設定値の検証
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)?;
        if self.result_limit == 0 {
            return Err(Error::Config("result_limit must be greater than zero".into()));
        }
        if self.timeout_ms == 0 {
            return Err(Error::Config("timeout_ms must be greater than zero".into()));
        }
        Ok(())
    }

    /// アイコンURL（アイコンが無い場合は欠損アイコン）
    pub fn icon_url(&self, display_icon: Option<&str>) -> String {
        let path = display_icon
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.missing_icon_path);
        format!("{}{}", self.icon_base_url.trim_end_matches('/'), path)
    }
}

/// クエリ分類ポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPolicy {
    /// 名前検索を有効にする最小文字数
    pub min_query_length: usize,
    /// 名前検索エンドポイントがあるか
    pub name_search: bool,
}

/// 検索フロー（ゲームごとのビュー）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Destiny1,
    #[default]
    Destiny2,
}

impl Flow {
    pub fn policy(&self) -> QueryPolicy {
        match self {
            // D1は空でなければ全てハッシュ検索へ
            Flow::Destiny1 => QueryPolicy {
                min_query_length: 1,
                name_search: false,
            },
            Flow::Destiny2 => QueryPolicy {
                min_query_length: 3,
                name_search: true,
            },
        }
    }

    /// ソースごとのエンドポイント（D1には名前検索が無い）
    pub fn endpoint(&self, base_url: &str, source: SearchSource) -> Option<String> {
        let base = base_url.trim_end_matches('/');
        let path = match (self, source) {
            (Flow::Destiny1, SearchSource::Hash) => "/d1/hash/search",
            (Flow::Destiny1, SearchSource::Name) => return None,
            (Flow::Destiny2, SearchSource::Hash) => "/search/hash",
            (Flow::Destiny2, SearchSource::Name) => "/search/name",
        };
        Some(format!("{}{}", base, path))
    }

    /// includeData パラメータを送るか
    pub fn sends_include_data(&self) -> bool {
        matches!(self, Flow::Destiny2)
    }

    /// ルートのパス名（"destiny1" / "destiny2"）
    pub fn route_name(&self) -> &'static str {
        match self {
            Flow::Destiny1 => "destiny1",
            Flow::Destiny2 => "destiny2",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Flow::Destiny1 => "Destiny 1 Definition Search",
            Flow::Destiny2 => "Destiny 2 Definition Search",
        }
    }
}

impl std::str::FromStr for Flow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "d1" | "destiny1" => Ok(Flow::Destiny1),
            "d2" | "destiny2" => Ok(Flow::Destiny2),
            _ => Err(format!("Unknown flow: {}. Use d1 or d2", s)),
        }
    }
}

impl std::fmt::Display for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.route_name())
    }
}
