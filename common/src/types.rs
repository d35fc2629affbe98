//! 検索結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - SearchResultItem: 検索サービスが返す定義レコード1件
//! - SearchSource / SourceSet: ハッシュ検索・名前検索の区別
//! - ReconciledResultSet: 重複除去・グループ化済みの表示用結果

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 定義タイプが取れなかったレコードのグループ名
pub const UNKNOWN_DEFINITION_TYPE: &str = "Unknown";

/// シリアライズ後の外枠のキー
const ENVELOPE_KEYS: [&str; 5] = ["hash", "definitionType", "displayName", "displayIcon", "payload"];

/// 定義レコード1件
///
/// 受信時は生のJSONオブジェクトから型付きの外枠を取り出し、
/// レコード全体を `payload` にそのまま保持する。
/// 外枠として書き出したJSON（`search --json` の出力）は `payload` から読み直す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct SearchResultItem {
    /// 定義タイプ内で一意な識別子
    pub hash: String,
    pub definition_type: String,
    pub display_name: Option<String>,
    /// アイコンの相対パス
    pub display_icon: Option<String>,
    pub payload: Value,
}

impl SearchResultItem {
    /// 表示名（無い場合はハッシュ）
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.hash)
    }
}

impl TryFrom<Value> for SearchResultItem {
    type Error = String;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        if let Some(payload) = envelope_payload(&raw) {
            return Self::try_from(payload.clone());
        }

        let (hash, definition_type, display_name, display_icon) = {
            let obj = raw
                .as_object()
                .ok_or_else(|| format!("result item is not an object: {}", raw))?;

            let hash = match obj.get("hash") {
                Some(Value::String(s)) if !s.is_empty() => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => return Err("result item has no hash".to_string()),
            };

            // D2は "definition"、D1は "type" で定義タイプを返す
            let definition_type = first_str(obj, &["definitionType", "definition", "type"])
                .unwrap_or_else(|| UNKNOWN_DEFINITION_TYPE.to_string());

            let display = obj.get("displayProperties").and_then(Value::as_object);
            let display_name = first_str(obj, &["displayName", "name"])
                .or_else(|| display.and_then(|d| first_str(d, &["name"])));
            let display_icon = first_str(obj, &["displayIcon", "icon"])
                .or_else(|| display.and_then(|d| first_str(d, &["icon"])));

            (hash, definition_type, display_name, display_icon)
        };

        Ok(Self {
            hash,
            definition_type,
            display_name,
            display_icon,
            payload: raw,
        })
    }
}

/// 外枠の形（外枠のキーのみ、かつ `payload` あり）ならレコード本体
fn envelope_payload(raw: &Value) -> Option<&Value> {
    let obj = raw.as_object()?;
    let payload = obj.get("payload")?;
    obj.keys()
        .all(|key| ENVELOPE_KEYS.contains(&key.as_str()))
        .then_some(payload)
}

/// 最初に見つかった空でない文字列フィールド
fn first_str(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// 検索サービスの成功レスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(deserialize_with = "skip_malformed")]
    pub data: Vec<SearchResultItem>,
}

/// 解釈できないレコードは捨てて残りを使う
fn skip_malformed<'de, D>(deserializer: D) -> Result<Vec<SearchResultItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let records = Vec::<Value>::deserialize(deserializer)?;
    Ok(records
        .into_iter()
        .filter_map(|record| match SearchResultItem::try_from(record) {
            Ok(item) => Some(item),
            Err(reason) => {
                tracing::warn!(%reason, "skipping malformed search record");
                None
            }
        })
        .collect())
}

/// 検索サービスのエラーレスポンス（400/その他）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub title: Option<String>,
    pub message: Option<String>,
    /// フィールド名 → エラーメッセージ
    pub errors: std::collections::BTreeMap<String, Vec<String>>,
}

/// 検索ソース
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSource {
    Hash,
    Name,
}

impl SearchSource {
    /// クエリパラメータ名（"hash" / "name"）
    pub fn param(&self) -> &'static str {
        match self {
            SearchSource::Hash => "hash",
            SearchSource::Name => "name",
        }
    }
}

impl std::fmt::Display for SearchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.param())
    }
}

/// 有効な検索ソースの集合（常にハッシュ→名前の順で列挙）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSet {
    pub hash: bool,
    pub name: bool,
}

impl SourceSet {
    pub fn only(source: SearchSource) -> Self {
        let mut set = Self::default();
        set.insert(source);
        set
    }

    pub fn insert(&mut self, source: SearchSource) {
        match source {
            SearchSource::Hash => self.hash = true,
            SearchSource::Name => self.name = true,
        }
    }

    pub fn contains(&self, source: SearchSource) -> bool {
        match source {
            SearchSource::Hash => self.hash,
            SearchSource::Name => self.name,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.hash && !self.name
    }

    pub fn len(&self) -> usize {
        usize::from(self.hash) + usize::from(self.name)
    }

    pub fn iter(&self) -> impl Iterator<Item = SearchSource> + '_ {
        [SearchSource::Hash, SearchSource::Name]
            .into_iter()
            .filter(move |s| self.contains(*s))
    }
}

/// 定義タイプごとのグループ
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultGroup {
    pub definition_type: String,
    pub items: Vec<SearchResultItem>,
}

/// 表示用の結果セット
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledResultSet {
    /// 定義タイプの昇順
    pub groups: Vec<ResultGroup>,
    pub total_count: usize,
}

impl ReconciledResultSet {
    /// グループ順に並べた全件
    pub fn flatten(&self) -> Vec<SearchResultItem> {
        self.groups
            .iter()
            .flat_map(|g| g.items.iter().cloned())
            .collect()
    }

    pub fn find(&self, hash: &str) -> Option<&SearchResultItem> {
        self.groups
            .iter()
            .flat_map(|g| g.items.iter())
            .find(|item| item.hash == hash)
    }
}
